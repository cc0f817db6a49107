use crate::domain::shared::ProviderError;
use crate::domain::transcription::{AudioPayload, Transcript};
use async_trait::async_trait;

/// Repository for speech-to-text operations.
#[async_trait]
pub trait TranscriptionRepository: Send + Sync {
    /// Transcribe a complete audio recording
    ///
    /// # Arguments
    /// * `audio` - Decoded audio and its mime type
    /// * `locales` - Recognition locale hints, primary locale first
    async fn transcribe(
        &self,
        audio: &AudioPayload,
        locales: &[String],
    ) -> Result<Transcript, ProviderError>;
}
