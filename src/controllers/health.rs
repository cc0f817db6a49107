use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::credentials::{Credential, CredentialStore};

/// What readiness needs to know to judge each relay
#[derive(Clone)]
pub struct ReadinessState {
    pub credentials: Arc<dyn CredentialStore>,
    /// With an explicit Azure endpoint the region is not needed
    pub azure_endpoint_configured: bool,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn status_of(credentials: &dyn CredentialStore, required: &[Credential]) -> &'static str {
    if required.iter().all(|c| credentials.is_configured(*c)) {
        "configured"
    } else {
        "missing_credentials"
    }
}

/// Readiness reflects the credentials visible right now; they are not cached at startup
pub async fn health_ready(State(state): State<ReadinessState>) -> impl IntoResponse {
    let credentials = state.credentials.as_ref();
    let chat = status_of(credentials, &[Credential::AnthropicApiKey]);
    let speech = status_of(credentials, &[Credential::ElevenLabsApiKey]);
    let transcription = if state.azure_endpoint_configured {
        status_of(credentials, &[Credential::AzureSpeechKey])
    } else {
        status_of(
            credentials,
            &[Credential::AzureSpeechKey, Credential::AzureSpeechRegion],
        )
    };

    let ready = [chat, speech, transcription]
        .iter()
        .all(|s| *s == "configured");

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if ready { "ready" } else { "not_ready" },
            "chat": chat,
            "speech": speech,
            "transcription": transcription
        })),
    )
}
