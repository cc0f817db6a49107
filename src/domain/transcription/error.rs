use crate::domain::shared::ProviderError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<TranscriptionServiceError> for AppError {
    fn from(err: TranscriptionServiceError) -> Self {
        match err {
            TranscriptionServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TranscriptionServiceError::Provider(e) => AppError::from(e),
        }
    }
}
