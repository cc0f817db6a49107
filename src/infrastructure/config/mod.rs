use anyhow::Context;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub cors_allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    // Chat (Anthropic)
    pub anthropic_base_url: String,
    pub anthropic_version: String,
    pub chat_model: String,
    pub chat_max_tokens: u32,
    // Speech synthesis (ElevenLabs)
    pub elevenlabs_base_url: String,
    pub elevenlabs_voice_id: String,
    pub elevenlabs_model_id: String,
    pub tts_cache_enabled: bool,
    // Transcription (Azure Speech)
    pub azure_speech_endpoint: Option<String>,
    pub transcription_backend: TranscriptionBackend,
    pub transcription_locales: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Which Azure Speech API the transcription relay talks to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriptionBackend {
    /// Fast transcription: multipart upload with locale hints
    Fast,
    /// Short-audio REST: raw body, single recognition language
    ShortAudio,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a port number")?,
            log_format: parse_log_format(&env::var("LOG_FORMAT").unwrap_or_default()),
            cors_allowed_origins: parse_list(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default()),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
                .parse()
                .context("MAX_BODY_BYTES must be a byte count")?,
            anthropic_base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            anthropic_version: env::var("ANTHROPIC_VERSION")
                .unwrap_or_else(|_| "2023-06-01".to_string()),
            chat_model: env::var("CHAT_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string()),
            chat_max_tokens: env::var("CHAT_MAX_TOKENS")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()
                .context("CHAT_MAX_TOKENS must be a positive integer")?,
            elevenlabs_base_url: env::var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|_| "https://api.elevenlabs.io".to_string()),
            elevenlabs_voice_id: env::var("ELEVENLABS_VOICE_ID")
                .unwrap_or_else(|_| "21m00Tcm4TlvDq8ikWAM".to_string()),
            elevenlabs_model_id: env::var("ELEVENLABS_MODEL_ID")
                .unwrap_or_else(|_| "eleven_multilingual_v2".to_string()),
            tts_cache_enabled: env::var("TTS_CACHE_ENABLED")
                .map(|s| s.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            azure_speech_endpoint: env::var("AZURE_SPEECH_ENDPOINT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            transcription_backend: parse_transcription_backend(
                &env::var("TRANSCRIPTION_BACKEND").unwrap_or_default(),
            ),
            transcription_locales: {
                let locales = parse_list(
                    &env::var("TRANSCRIPTION_LOCALES").unwrap_or_else(|_| "ga-IE,en-IE".to_string()),
                );
                if locales.is_empty() {
                    vec!["ga-IE".to_string(), "en-IE".to_string()]
                } else {
                    locales
                }
            },
        };

        Ok(config)
    }
}

fn parse_log_format(raw: &str) -> LogFormat {
    match raw.trim().to_lowercase().as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

fn parse_transcription_backend(raw: &str) -> TranscriptionBackend {
    match raw.trim().to_lowercase().as_str() {
        "short-audio" | "short_audio" => TranscriptionBackend::ShortAudio,
        _ => TranscriptionBackend::Fast,
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
