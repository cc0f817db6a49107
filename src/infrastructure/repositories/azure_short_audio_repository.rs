use super::azure_endpoint::{resolve_base_url, PROVIDER};
use super::transcription_repository::TranscriptionRepository;
use crate::domain::shared::ProviderError;
use crate::domain::transcription::{AudioPayload, Transcript};
use crate::infrastructure::credentials::{Credential, CredentialStore};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

const HOST_SUFFIX: &str = "stt.speech.microsoft.com";
const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    #[serde(default)]
    display_text: Option<String>,
}

/// Azure short-audio REST recognition: raw audio body, one recognition language.
/// The response carries no locale, so the transcript is returned unlabelled.
pub struct AzureShortAudioRepository {
    http_client: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
    endpoint: Option<String>,
}

impl AzureShortAudioRepository {
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
}

fn parse_response(body: &[u8]) -> Result<Transcript, ProviderError> {
    let response: RecognitionResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::decode(PROVIDER, e))?;

    match response.recognition_status.as_str() {
        "Success" => Ok(Transcript {
            text: response.display_text.unwrap_or_default().trim().to_string(),
            locale: None,
        }),
        // Nothing intelligible was said
        "NoMatch" | "InitialSilenceTimeout" | "BabbleTimeout" => Ok(Transcript {
            text: String::new(),
            locale: None,
        }),
        other => Err(ProviderError::decode(
            PROVIDER,
            format!("recognition status {}", other),
        )),
    }
}

#[async_trait]
impl TranscriptionRepository for AzureShortAudioRepository {
    async fn transcribe(
        &self,
        audio: &AudioPayload,
        locales: &[String],
    ) -> Result<Transcript, ProviderError> {
        let key = self.credentials.require(Credential::AzureSpeechKey)?;
        let base_url = resolve_base_url(self.endpoint.as_deref(), self.credentials.as_ref(), HOST_SUFFIX)?;
        let language = locales.first().map(String::as_str).unwrap_or("ga-IE");
        let url = format!(
            "{}{}?language={}&format=simple",
            base_url,
            RECOGNITION_PATH,
            urlencoding::encode(language)
        );
        let start_time = Instant::now();

        tracing::debug!(
            audio_bytes = audio.data.len(),
            language = language,
            "Starting Azure short-audio recognition"
        );

        let response = self
            .http_client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", key)
            .header(CONTENT_TYPE, audio.mime_type.as_str())
            .header(ACCEPT, "application/json")
            .body(audio.data.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Azure short-audio request failed");
                ProviderError::transport(PROVIDER, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %error_body, "Azure short-audio API error");
            return Err(ProviderError::upstream(PROVIDER, status.as_u16(), &error_body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;
        let transcript = parse_response(&body)?;

        tracing::info!(
            provider = "azure_short_audio",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio.data.len(),
            transcript_length = transcript.text.len(),
            "Transcription completed"
        );

        Ok(transcript)
    }
}
