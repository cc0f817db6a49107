pub mod dto;
pub mod error;
pub mod model;
pub mod prompt;
pub mod service;

pub use dto::{ChatMessage, ChatRole, TurnRequest};
pub use error::ChatServiceError;
pub use model::{ChatTurn, VocabularyWord};
pub use service::{ChatService, ChatServiceApi};
