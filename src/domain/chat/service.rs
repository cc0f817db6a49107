use super::dto::ChatMessage;
use super::error::ChatServiceError;
use super::model::ChatTurn;
use super::prompt::build_turn_request;
use crate::infrastructure::repositories::LlmRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ChatService {
    llm_repo: Arc<dyn LlmRepository>,
}

impl ChatService {
    pub fn new(llm_repo: Arc<dyn LlmRepository>) -> Self {
        Self { llm_repo }
    }
}

#[async_trait]
pub trait ChatServiceApi: Send + Sync {
    /// Forward a provider request body untouched and return the provider's body untouched
    async fn relay(&self, body: Vec<u8>) -> Result<Vec<u8>, ChatServiceError>;

    /// Run one tutor turn over the conversation so far
    ///
    /// This operation:
    /// - Validates the conversation shape
    /// - Wraps it with the tutor instructions
    /// - Parses the model's reply into a `ChatTurn`, falling back to raw text
    async fn turn(&self, messages: Vec<ChatMessage>) -> Result<ChatTurn, ChatServiceError>;
}

#[async_trait]
impl ChatServiceApi for ChatService {
    async fn relay(&self, body: Vec<u8>) -> Result<Vec<u8>, ChatServiceError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ChatServiceError::Invalid(
                "Request body is required".to_string(),
            ));
        }

        tracing::info!(request_size = body.len(), "Chat relay request");

        let response = self.llm_repo.relay_messages(body).await?;

        tracing::info!(response_size = response.len(), "Chat relay response");

        Ok(response)
    }

    async fn turn(&self, messages: Vec<ChatMessage>) -> Result<ChatTurn, ChatServiceError> {
        let request = build_turn_request(messages)?;

        tracing::info!(
            message_count = request.messages.len(),
            "Chat turn request"
        );

        let reply = self.llm_repo.complete(&request).await?;
        let turn = ChatTurn::from_reply(&reply);

        tracing::info!(
            reply_length = reply.len(),
            word_count = turn.words.len(),
            suggestion_count = turn.suggestions.len(),
            "Chat turn parsed"
        );

        Ok(turn)
    }
}
