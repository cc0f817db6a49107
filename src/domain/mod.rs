pub mod chat;
pub mod shared;
pub mod speech;
pub mod transcription;
