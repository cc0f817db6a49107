use crate::domain::shared::ProviderError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("text too large: {0}")]
    TooLarge(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SpeechServiceError::TooLarge(msg) => AppError::PayloadTooLarge(msg),
            SpeechServiceError::Provider(e) => AppError::from(e),
        }
    }
}
