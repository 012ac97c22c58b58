//! Local speech adapters.
//!
//! Real deployments call a cloud speech API behind the same traits. These
//! adapters treat "audio" as UTF-8 text so the pipeline can be driven from a
//! terminal or a test without audio hardware.

use async_trait::async_trait;
use breakapp_core::error::{BreakAppError, Result};
use breakapp_core::language::Language;
use breakapp_core::preference::VoiceType;
use breakapp_core::speech::{SynthesisService, SynthesizedAudio, Transcript, TranscriptionService};

const TRANSCRIPTION: &str = "transcription";

/// Decodes the audio payload as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8TranscriptionService;

#[async_trait]
impl TranscriptionService for Utf8TranscriptionService {
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<Transcript> {
        let text = std::str::from_utf8(audio)
            .map_err(|e| BreakAppError::collaborator(TRANSCRIPTION, e.to_string()))?
            .trim();
        if text.is_empty() {
            return Err(BreakAppError::collaborator(TRANSCRIPTION, "no speech detected"));
        }
        Ok(Transcript {
            text: text.to_string(),
            confidence: 1.0,
            language,
        })
    }
}

/// Returns the reply text itself as the "audio" payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPreviewSynthesisService;

impl TextPreviewSynthesisService {
    /// Roughly one second per ten characters.
    pub fn estimate_duration_secs(text: &str) -> u32 {
        u32::try_from(text.chars().count().div_ceil(10)).unwrap_or(u32::MAX)
    }
}

#[async_trait]
impl SynthesisService for TextPreviewSynthesisService {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        voice: VoiceType,
    ) -> Result<SynthesizedAudio> {
        tracing::debug!(
            "[TextPreviewSynthesis] {} chars, lang={}, voice={}",
            text.chars().count(),
            language,
            voice
        );
        Ok(SynthesizedAudio {
            audio: text.as_bytes().to_vec(),
            mime_type: "text/plain; charset=utf-8".to_string(),
            duration_secs: Self::estimate_duration_secs(text),
        })
    }
}
