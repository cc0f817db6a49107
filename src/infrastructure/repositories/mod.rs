pub mod anthropic_llm_repository;
pub mod azure_endpoint;
pub mod azure_fast_transcription_repository;
pub mod azure_short_audio_repository;
pub mod elevenlabs_tts_repository;
pub mod llm_repository;
pub mod transcription_repository;
pub mod tts_repository;

pub use anthropic_llm_repository::AnthropicLlmRepository;
pub use azure_fast_transcription_repository::AzureFastTranscriptionRepository;
pub use azure_short_audio_repository::AzureShortAudioRepository;
pub use elevenlabs_tts_repository::ElevenLabsTtsRepository;
pub use llm_repository::LlmRepository;
pub use transcription_repository::TranscriptionRepository;
pub use tts_repository::TtsRepository;
