use serde_json::Value;

/// Failure talking to an external provider (LLM, text-to-speech, speech-to-text).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A credential or setting the call needs is absent from the environment
    #[error("{0}")]
    Configuration(String),

    /// The provider answered with a non-success status
    #[error("{provider} API error ({status})")]
    Upstream {
        provider: &'static str,
        status: u16,
        details: Value,
    },

    /// The request never produced a provider response
    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    /// The provider answered 2xx with a body we cannot use
    #[error("{provider} returned an unexpected response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// Build an upstream error from a provider's raw error body.
    /// JSON bodies are embedded as-is, anything else as a string.
    pub fn upstream(provider: &'static str, status: u16, body: &str) -> Self {
        let details = serde_json::from_str::<Value>(body)
            .unwrap_or_else(|_| Value::String(body.to_string()));

        Self::Upstream {
            provider,
            status,
            details,
        }
    }

    pub fn transport(provider: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            provider,
            message: err.to_string(),
        }
    }

    pub fn decode(provider: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            provider,
            message: err.to_string(),
        }
    }
}
