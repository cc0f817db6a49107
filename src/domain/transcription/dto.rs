use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::error::TranscriptionServiceError;

pub const DEFAULT_AUDIO_MIME_TYPE: &str = "audio/webm";

/// Request for POST /api/transcribe
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionRequest {
    /// Base64 audio, optionally as a `data:<mime>;base64,` URL
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Response for POST /api/transcribe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
    pub language: String,
}

/// What a transcription provider returned
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    /// Locale reported by the provider, if it reports one
    pub locale: Option<String>,
}

/// Decoded audio ready to upload
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPayload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl AudioPayload {
    pub fn from_request(request: TranscriptionRequest) -> Result<Self, TranscriptionServiceError> {
        let raw = request
            .audio
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| TranscriptionServiceError::Invalid("No audio data provided".to_string()))?;

        let (url_mime, encoded) = split_data_url(raw.trim());

        let data = STANDARD
            .decode(strip_whitespace(encoded))
            .map_err(|e| TranscriptionServiceError::Invalid(format!("Audio is not valid base64: {}", e)))?;

        if data.is_empty() {
            return Err(TranscriptionServiceError::Invalid(
                "No audio data provided".to_string(),
            ));
        }

        let mime_type = match request.mime_type.filter(|m| !m.trim().is_empty()).or(url_mime) {
            Some(raw) => normalize_mime_type(&raw).ok_or_else(|| {
                TranscriptionServiceError::Invalid(format!("Invalid audio mime type: {}", raw.trim()))
            })?,
            None => DEFAULT_AUDIO_MIME_TYPE.to_string(),
        };

        Ok(Self { data, mime_type })
    }

    /// File name for multipart uploads, derived from the mime type
    pub fn file_name(&self) -> String {
        let essence = self
            .mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        let extension = match essence.as_str() {
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/ogg" => "ogg",
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
            "audio/flac" => "flac",
            _ => "webm",
        };

        format!("audio.{}", extension)
    }
}

/// Split `data:audio/webm;codecs=opus;base64,AAAA` into its mime type and payload
fn split_data_url(raw: &str) -> (Option<String>, &str) {
    let Some(rest) = raw.strip_prefix("data:") else {
        return (None, raw);
    };

    match rest.split_once(',') {
        Some((meta, payload)) => {
            let mime = meta.trim_end_matches(";base64").trim();
            let mime = (!mime.is_empty()).then(|| mime.to_string());
            (mime, payload)
        }
        None => (None, raw),
    }
}

/// Rebuild `type/subtype;name=value` from its tokens, or `None` if any part is malformed.
/// The result is safe to send as a header value or multipart content type.
fn normalize_mime_type(raw: &str) -> Option<String> {
    let mut parts = raw.split(';');
    let (kind, subtype) = parts.next()?.trim().split_once('/')?;
    if !is_token(kind) || !is_token(subtype) {
        return None;
    }

    let mut normalized = format!("{}/{}", kind, subtype);
    for param in parts.map(str::trim).filter(|p| !p.is_empty()) {
        let (name, value) = param.split_once('=')?;
        let (name, value) = (name.trim(), value.trim());
        if !is_token(name) || !is_token(value) {
            return None;
        }
        normalized.push_str(&format!(";{}={}", name, value));
    }

    Some(normalized)
}

fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c))
}

fn strip_whitespace(encoded: &str) -> String {
    encoded.chars().filter(|c| !c.is_whitespace()).collect()
}
