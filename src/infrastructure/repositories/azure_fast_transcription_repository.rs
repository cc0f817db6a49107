use super::azure_endpoint::{resolve_base_url, PROVIDER};
use super::transcription_repository::TranscriptionRepository;
use crate::domain::shared::ProviderError;
use crate::domain::transcription::{AudioPayload, Transcript};
use crate::infrastructure::credentials::{Credential, CredentialStore};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

const API_VERSION: &str = "2024-11-15";
const HOST_SUFFIX: &str = "api.cognitive.microsoft.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FastTranscriptionResponse {
    #[serde(default)]
    combined_phrases: Vec<CombinedPhrase>,
    #[serde(default)]
    phrases: Vec<Phrase>,
}

#[derive(Debug, Deserialize)]
struct CombinedPhrase {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Phrase {
    #[serde(default)]
    text: String,
    #[serde(default)]
    locale: Option<String>,
}

/// Azure fast transcription: one multipart upload, locale hints in the definition part
pub struct AzureFastTranscriptionRepository {
    http_client: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
    endpoint: Option<String>,
}

impl AzureFastTranscriptionRepository {
    pub fn new(
        http_client: reqwest::Client,
        credentials: Arc<dyn CredentialStore>,
        endpoint: Option<String>,
    ) -> Self {
        Self {
            http_client,
            credentials,
            endpoint,
        }
    }

    fn build_form(audio: &AudioPayload, locales: &[String]) -> Result<Form, ProviderError> {
        let audio_part = Part::bytes(audio.data.clone())
            .file_name(audio.file_name())
            .mime_str(&audio.mime_type)
            .map_err(|e| ProviderError::decode(PROVIDER, e))?;

        Ok(Form::new()
            .part("audio", audio_part)
            .text("definition", definition(locales)))
    }
}

fn definition(locales: &[String]) -> String {
    serde_json::json!({ "locales": locales }).to_string()
}

fn parse_response(body: &[u8]) -> Result<Transcript, ProviderError> {
    let response: FastTranscriptionResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::decode(PROVIDER, e))?;

    let combined = response
        .combined_phrases
        .first()
        .map(|p| p.text.trim().to_string())
        .filter(|t| !t.is_empty());

    let text = combined.unwrap_or_else(|| {
        response
            .phrases
            .iter()
            .map(|p| p.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    });

    let locale = response
        .phrases
        .iter()
        .find_map(|p| p.locale.clone())
        .filter(|l| !l.trim().is_empty());

    Ok(Transcript { text, locale })
}

#[async_trait]
impl TranscriptionRepository for AzureFastTranscriptionRepository {
    async fn transcribe(
        &self,
        audio: &AudioPayload,
        locales: &[String],
    ) -> Result<Transcript, ProviderError> {
        let key = self.credentials.require(Credential::AzureSpeechKey)?;
        let base_url = resolve_base_url(self.endpoint.as_deref(), self.credentials.as_ref(), HOST_SUFFIX)?;
        let url = format!(
            "{}/speechtotext/transcriptions:transcribe?api-version={}",
            base_url, API_VERSION
        );
        let start_time = Instant::now();

        tracing::debug!(
            audio_bytes = audio.data.len(),
            locales = ?locales,
            "Starting Azure fast transcription"
        );

        let form = Self::build_form(audio, locales)?;

        let response = self
            .http_client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Azure fast transcription request failed");
                ProviderError::transport(PROVIDER, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %error_body, "Azure fast transcription API error");
            return Err(ProviderError::upstream(PROVIDER, status.as_u16(), &error_body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;
        let transcript = parse_response(&body)?;

        tracing::info!(
            provider = "azure_fast",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio.data.len(),
            transcript_length = transcript.text.len(),
            locale = ?transcript.locale,
            "Transcription completed"
        );

        Ok(transcript)
    }
}
