use crate::domain::shared::ProviderError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<ChatServiceError> for AppError {
    fn from(err: ChatServiceError) -> Self {
        match err {
            ChatServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ChatServiceError::Provider(e) => AppError::from(e),
        }
    }
}
