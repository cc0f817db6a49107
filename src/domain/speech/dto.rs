use serde::{Deserialize, Serialize};

/// Request for POST /api/speech
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
}
