use super::tts_repository::TtsRepository;
use crate::domain::shared::ProviderError;
use crate::infrastructure::credentials::{Credential, CredentialStore};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

const PROVIDER: &str = "ElevenLabs";
const OUTPUT_FORMAT: &str = "mp3_44100_128";
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

/// ElevenLabs implementation of TTS repository
pub struct ElevenLabsTtsRepository {
    http_client: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
    base_url: String,
    voice_id: String,
    model_id: String,
}

impl ElevenLabsTtsRepository {
    pub fn new(
        http_client: reqwest::Client,
        credentials: Arc<dyn CredentialStore>,
        base_url: String,
        voice_id: String,
        model_id: String,
    ) -> Self {
        Self {
            http_client,
            credentials,
            base_url,
            voice_id,
            model_id,
        }
    }

    fn synthesis_url(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}?output_format={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.voice_id),
            OUTPUT_FORMAT
        )
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        let api_key = self.credentials.require(Credential::ElevenLabsApiKey)?;
        let start_time = Instant::now();
        let char_count = text.chars().count();

        tracing::info!(
            voice = %self.voice_id,
            model = %self.model_id,
            text_length = char_count,
            "Starting ElevenLabs TTS synthesis"
        );

        let request = SynthesisRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings::default(),
        };

        let response = self
            .http_client
            .post(self.synthesis_url())
            .header("xi-api-key", api_key)
            .header(ACCEPT, AUDIO_CONTENT_TYPE)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice = %self.voice_id, "ElevenLabs TTS request failed");
                ProviderError::transport(PROVIDER, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %error_body,
                voice = %self.voice_id,
                "ElevenLabs TTS API error"
            );
            return Err(ProviderError::upstream(PROVIDER, status.as_u16(), &error_body));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;

        tracing::info!(
            provider = "elevenlabs",
            voice = %self.voice_id,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = char_count,
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio.to_vec())
    }

    fn content_type(&self) -> &'static str {
        AUDIO_CONTENT_TYPE
    }
}
