use super::dto::{AudioPayload, TranscriptionRequest, TranscriptionResponse};
use super::error::TranscriptionServiceError;
use super::language::{build_detector, detect_language};
use crate::infrastructure::repositories::TranscriptionRepository;
use async_trait::async_trait;
use lingua::LanguageDetector;
use std::sync::Arc;

pub struct TranscriptionService {
    transcription_repo: Arc<dyn TranscriptionRepository>,
    locales: Vec<String>,
    language_detector: LanguageDetector,
}

impl TranscriptionService {
    /// `locales` are the recognition hints, primary locale first
    pub fn new(transcription_repo: Arc<dyn TranscriptionRepository>, locales: Vec<String>) -> Self {
        Self {
            transcription_repo,
            locales,
            language_detector: build_detector(),
        }
    }

    fn primary_locale(&self) -> &str {
        self.locales.first().map(String::as_str).unwrap_or("ga-IE")
    }

    /// Locale for a transcript the provider did not label
    fn infer_locale(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return self.primary_locale().to_string();
        }

        match detect_language(&self.language_detector, text) {
            Some(language) => {
                let locale = language
                    .locale_in(&self.locales)
                    .unwrap_or(language.default_locale());
                tracing::debug!(language = %language, locale = locale, "Language detected from transcript");
                locale.to_string()
            }
            None => {
                tracing::warn!("Could not detect transcript language, falling back to primary locale");
                self.primary_locale().to_string()
            }
        }
    }
}

#[async_trait]
pub trait TranscriptionServiceApi: Send + Sync {
    /// Transcribe base64 audio
    ///
    /// Returns the transcript and the locale it was recognised in
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResponse, TranscriptionServiceError>;
}

#[async_trait]
impl TranscriptionServiceApi for TranscriptionService {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResponse, TranscriptionServiceError> {
        let audio = AudioPayload::from_request(request)?;

        tracing::info!(
            audio_size = audio.data.len(),
            mime_type = %audio.mime_type,
            "Transcription request"
        );

        let transcript = self
            .transcription_repo
            .transcribe(&audio, &self.locales)
            .await?;

        let language = match transcript.locale.filter(|l| !l.trim().is_empty()) {
            Some(locale) => locale,
            None => self.infer_locale(&transcript.text),
        };

        tracing::info!(
            text_length = transcript.text.len(),
            language = %language,
            "Transcription completed"
        );

        Ok(TranscriptionResponse {
            text: transcript.text,
            language,
        })
    }
}
