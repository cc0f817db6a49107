use crate::domain::chat::dto::CompletionRequest;
use crate::domain::shared::ProviderError;
use async_trait::async_trait;

/// Repository for LLM chat operations.
/// Abstracts the underlying model provider.
#[async_trait]
pub trait LlmRepository: Send + Sync {
    /// Forward a provider-shaped request body as-is
    ///
    /// Returns the provider's success body as-is
    ///
    /// # Errors
    /// Returns error if credentials are missing or the provider rejects the call
    async fn relay_messages(&self, body: Vec<u8>) -> Result<Vec<u8>, ProviderError>;

    /// Run a completion and return the model's reply text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}
