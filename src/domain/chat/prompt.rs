use super::dto::{ChatMessage, ChatRole, CompletionRequest};
use super::error::ChatServiceError;

/// Instructions that make the model answer with a `ChatTurn` JSON object
pub const TUTOR_SYSTEM_PROMPT: &str = r#"You are a friendly Irish (Gaeilge) conversation tutor for an adult learner.
Speak mostly in Irish at a level slightly above the learner's, using the Munster dialect where it differs from the standard.
Keep replies short: one or two sentences, then a question that keeps the conversation going.
If the learner writes in English or makes a mistake, gently model the correct Irish.

Respond with a single JSON object and nothing else, in exactly this shape:
{
  "message": "your reply as it should be displayed, Irish first with an English gloss in brackets where helpful",
  "message_spoken": "your reply in Irish only, with no brackets or English, as it should be read aloud",
  "words": [
    {
      "irish": "a useful word or phrase from your reply",
      "phonetic": "an English-style respelling of its pronunciation",
      "munster_note": "how Munster speakers say or use it, or an empty string",
      "english": "its meaning"
    }
  ],
  "suggestions": ["two or three short Irish replies the learner could send next"]
}"#;

/// Validate a learner conversation and wrap it with the tutor instructions
pub fn build_turn_request(messages: Vec<ChatMessage>) -> Result<CompletionRequest, ChatServiceError> {
    let (first, last) = match (messages.first(), messages.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(ChatServiceError::Invalid(
                "At least one message is required".to_string(),
            ))
        }
    };

    if first.role != ChatRole::User {
        return Err(ChatServiceError::Invalid(
            "Conversation must start with a user message".to_string(),
        ));
    }

    if last.role != ChatRole::User {
        return Err(ChatServiceError::Invalid(
            "Conversation must end with a user message".to_string(),
        ));
    }

    if let Some(index) = messages.iter().position(|m| m.content.trim().is_empty()) {
        return Err(ChatServiceError::Invalid(format!(
            "Message {} has no content",
            index
        )));
    }

    Ok(CompletionRequest {
        system: TUTOR_SYSTEM_PROMPT.to_string(),
        messages,
    })
}
