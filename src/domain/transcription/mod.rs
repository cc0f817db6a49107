pub mod dto;
pub mod error;
pub mod language;
pub mod service;

pub use dto::{AudioPayload, Transcript, TranscriptionRequest, TranscriptionResponse};
pub use error::TranscriptionServiceError;
pub use language::SpokenLanguage;
pub use service::{TranscriptionService, TranscriptionServiceApi};
