use super::llm_repository::LlmRepository;
use crate::domain::chat::dto::{ChatMessage, CompletionRequest};
use crate::domain::shared::ProviderError;
use crate::infrastructure::credentials::{Credential, CredentialStore};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

const PROVIDER: &str = "Anthropic";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic Messages API implementation of the LLM repository
pub struct AnthropicLlmRepository {
    http_client: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
    base_url: String,
    api_version: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicLlmRepository {
    pub fn new(
        http_client: reqwest::Client,
        credentials: Arc<dyn CredentialStore>,
        base_url: String,
        api_version: String,
        model: String,
        max_tokens: u32,
    ) -> Self {
        Self {
            http_client,
            credentials,
            base_url,
            api_version,
            model,
            max_tokens,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }

    fn build_body(&self, request: &CompletionRequest) -> Result<Vec<u8>, ProviderError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: &request.system,
            messages: &request.messages,
        };

        serde_json::to_vec(&body).map_err(|e| ProviderError::decode(PROVIDER, e))
    }

    /// POST a JSON body to the messages endpoint, returning the success body
    async fn post_messages(&self, body: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        let api_key = self.credentials.require(Credential::AnthropicApiKey)?;
        let start_time = Instant::now();
        let request_size = body.len();

        let response = self
            .http_client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, provider = PROVIDER, "Messages request failed");
                ProviderError::transport(PROVIDER, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %error_body,
                provider = PROVIDER,
                "Messages API error"
            );
            return Err(ProviderError::upstream(PROVIDER, status.as_u16(), &error_body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;

        tracing::info!(
            provider = "anthropic",
            latency_ms = start_time.elapsed().as_millis(),
            request_size_bytes = request_size,
            response_size_bytes = bytes.len(),
            "Messages call completed"
        );

        Ok(bytes.to_vec())
    }
}

/// Concatenate the text blocks of a messages response
fn extract_reply_text(body: &[u8]) -> Result<String, ProviderError> {
    let response: MessagesResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::decode(PROVIDER, e))?;

    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return Err(ProviderError::decode(PROVIDER, "reply has no text content"));
    }

    Ok(text)
}

#[async_trait]
impl LlmRepository for AnthropicLlmRepository {
    async fn relay_messages(&self, body: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        self.post_messages(body).await
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let body = self.build_body(request)?;
        let response = self.post_messages(body).await?;
        extract_reply_text(&response)
    }
}
