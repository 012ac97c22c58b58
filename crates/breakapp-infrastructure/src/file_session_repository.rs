//! Directory-backed `ConversationSessionRepository`.
//!
//! Directory structure:
//! ```text
//! sessions_dir/
//! ├── <session-id-1>.json
//! └── <session-id-2>.json
//! ```
//!
//! Writes go to a temporary file first and are renamed into place, so a
//! reader never sees a half-written session.

use crate::paths::BreakAppPaths;
use async_trait::async_trait;
use breakapp_core::conversation::{ConversationSession, ConversationSessionRepository};
use breakapp_core::error::{BreakAppError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const EXTENSION: &str = "json";

pub struct FileSessionRepository {
    sessions_dir: PathBuf,
}

impl FileSessionRepository {
    /// Creates a repository at the default location (`<data_dir>/breakapp/sessions`).
    pub async fn default_location() -> Result<Self> {
        Self::new(BreakAppPaths::sessions_dir()?).await
    }

    /// Creates a repository storing sessions under `sessions_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn new(sessions_dir: impl AsRef<Path>) -> Result<Self> {
        let sessions_dir = sessions_dir.as_ref().to_path_buf();
        fs::create_dir_all(&sessions_dir).await.map_err(|e| {
            BreakAppError::data_access(format!(
                "Failed to create sessions directory {:?}: {}",
                sessions_dir, e
            ))
        })?;
        Ok(Self { sessions_dir })
    }

    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    fn session_path(&self, session_id: &str) -> Result<PathBuf> {
        let valid = !session_id.is_empty()
            && session_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(BreakAppError::invalid_input(format!(
                "Invalid session id '{}'",
                session_id
            )));
        }
        Ok(self
            .sessions_dir
            .join(format!("{}.{}", session_id, EXTENSION)))
    }

    async fn read_session(path: &Path) -> Result<Option<ConversationSession>> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ConversationSessionRepository for FileSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<ConversationSession>> {
        let path = self.session_path(session_id)?;
        Self::read_session(&path).await
    }

    async fn save(&self, session: &ConversationSession) -> Result<()> {
        let path = self.session_path(&session.id)?;
        let tmp_path = path.with_extension(format!("{}.tmp", EXTENSION));

        let content = serde_json::to_string_pretty(session)?;
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &path).await?;

        tracing::debug!("[FileSessionRepository] Saved session {}", session.id);
        Ok(())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ConversationSession>> {
        let mut entries = fs::read_dir(&self.sessions_dir).await?;
        let mut sessions = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            match Self::read_session(&path).await {
                Ok(Some(session)) if session.user_id == user_id => sessions.push(session),
                Ok(_) => {}
                Err(e) => {
                    // Continue loading other sessions
                    tracing::warn!("[FileSessionRepository] Skipping {:?}: {}", path, e);
                }
            }
        }

        sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(sessions)
    }
}
