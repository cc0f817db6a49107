use crate::domain::shared::ProviderError;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider.
///
/// Implementations are responsible for:
/// - Looking up provider credentials at call time
/// - Provider-specific voice and model selection
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech
    ///
    /// Returns audio data ready for playback
    ///
    /// # Arguments
    /// * `text` - The trimmed, validated text to synthesize
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError>;

    /// Content type of the audio `synthesize` returns
    fn content_type(&self) -> &'static str;
}
