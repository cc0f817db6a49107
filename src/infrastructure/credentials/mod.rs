use std::collections::HashMap;
use std::env;

use crate::domain::shared::ProviderError;

/// Provider secrets. They are looked up on every request, never cached at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Credential {
    AnthropicApiKey,
    ElevenLabsApiKey,
    AzureSpeechKey,
    AzureSpeechRegion,
}

impl Credential {
    pub const ALL: [Credential; 4] = [
        Credential::AnthropicApiKey,
        Credential::ElevenLabsApiKey,
        Credential::AzureSpeechKey,
        Credential::AzureSpeechRegion,
    ];

    /// Environment variable holding this credential
    pub fn env_var(&self) -> &'static str {
        match self {
            Credential::AnthropicApiKey => "ANTHROPIC_API_KEY",
            Credential::ElevenLabsApiKey => "ELEVENLABS_API_KEY",
            Credential::AzureSpeechKey => "AZURE_SPEECH_KEY",
            Credential::AzureSpeechRegion => "AZURE_SPEECH_REGION",
        }
    }
}

pub trait CredentialStore: Send + Sync {
    fn lookup(&self, credential: Credential) -> Option<String>;

    /// Lookup that treats a missing or blank value as a configuration error
    fn require(&self, credential: Credential) -> Result<String, ProviderError> {
        self.lookup(credential)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::Configuration(format!("{} is not configured", credential.env_var()))
            })
    }

    fn is_configured(&self, credential: Credential) -> bool {
        self.require(credential).is_ok()
    }
}

/// Reads credentials from the process environment at call time
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialStore for EnvCredentials {
    fn lookup(&self, credential: Credential) -> Option<String> {
        env::var(credential.env_var()).ok()
    }
}

/// Fixed credential set, used where the process environment must not leak in
#[derive(Debug, Default, Clone)]
pub struct StaticCredentials {
    values: HashMap<Credential, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, credential: Credential, value: impl Into<String>) -> Self {
        self.values.insert(credential, value.into());
        self
    }
}

impl CredentialStore for StaticCredentials {
    fn lookup(&self, credential: Credential) -> Option<String> {
        self.values.get(&credential).cloned()
    }
}
