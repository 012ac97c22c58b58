//! Speech collaborator contracts.
//!
//! Audio codecs and recognition models live outside the engine. These traits
//! are the request/response seam to whatever service performs them, so tests
//! can inject deterministic transcripts.

use crate::error::Result;
use crate::language::Language;
use crate::preference::VoiceType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Text recognised from an audio clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub confidence: f32,
    pub language: Language,
}

/// Audio produced for a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedAudio {
    pub audio: Vec<u8>,
    pub mime_type: String,
    pub duration_secs: u32,
}

/// Speech-to-text.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<Transcript>;
}

/// Text-to-speech.
#[async_trait]
pub trait SynthesisService: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        voice: VoiceType,
    ) -> Result<SynthesizedAudio>;
}
