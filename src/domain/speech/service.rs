use super::error::SpeechServiceError;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Longest text accepted for a single synthesis call, in characters
pub const MAX_SPEECH_CHARACTERS: usize = 5000;

#[derive(Debug, Clone)]
pub struct SynthesizedSpeech {
    pub audio_data: Vec<u8>,
    pub content_type: &'static str,
    pub char_count: usize,
    pub cached: bool,
}

pub struct SpeechService {
    tts_repo: Arc<dyn TtsRepository>,
    cache: Option<Cache<String, Vec<u8>>>,
}

impl SpeechService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, cache_enabled: bool) -> Self {
        // Vocabulary words and short phrases are replayed a lot
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(500)
                    .time_to_idle(Duration::from_secs(30 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self { tts_repo, cache }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Synthesize text to speech
    ///
    /// Returns the provider's audio bytes along with their content type
    async fn synthesize(&self, text: Option<String>) -> Result<SynthesizedSpeech, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(&self, text: Option<String>) -> Result<SynthesizedSpeech, SpeechServiceError> {
        let text = validate_text(text)?;
        let char_count = text.chars().count();
        let content_type = self.tts_repo.content_type();

        tracing::info!(text_length = char_count, "Speech synthesis request");

        if let Some(cache) = &self.cache {
            if let Some(audio_data) = cache.get(&text).await {
                tracing::info!(
                    audio_size = audio_data.len(),
                    "Speech cache hit - returning cached audio"
                );
                return Ok(SynthesizedSpeech {
                    audio_data,
                    content_type,
                    char_count,
                    cached: true,
                });
            }
        }

        let audio_data = self.tts_repo.synthesize(&text).await?;

        if let Some(cache) = &self.cache {
            cache.insert(text, audio_data.clone()).await;
        }

        Ok(SynthesizedSpeech {
            audio_data,
            content_type,
            char_count,
            cached: false,
        })
    }
}

fn validate_text(text: Option<String>) -> Result<String, SpeechServiceError> {
    let text = text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SpeechServiceError::Invalid("Text is required".to_string()))?;

    if text.chars().count() > MAX_SPEECH_CHARACTERS {
        return Err(SpeechServiceError::TooLarge(format!(
            "Text must be {} characters or less",
            MAX_SPEECH_CHARACTERS
        )));
    }

    Ok(text)
}
