use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use irish_tutor_backend::infrastructure::config::{Config, LogFormat};
use irish_tutor_backend::infrastructure::credentials::{Credential, CredentialStore, EnvCredentials};
use irish_tutor_backend::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Irish Tutor Backend on {}:{}",
        config.host,
        config.port
    );

    tracing::info!(
        chat_model = %config.chat_model,
        voice_id = %config.elevenlabs_voice_id,
        transcription_backend = ?config.transcription_backend,
        locales = ?config.transcription_locales,
        tts_cache_enabled = config.tts_cache_enabled,
        "Provider configuration loaded"
    );

    // Credentials are read per request; this is only a heads-up for operators
    let credentials = EnvCredentials;
    for credential in Credential::ALL {
        if !credentials.is_configured(credential) {
            tracing::warn!(
                variable = credential.env_var(),
                "Credential not set; requests that need it will fail until it is"
            );
        }
    }

    let config = Arc::new(config);
    let credentials: Arc<dyn CredentialStore> = Arc::new(credentials);

    start_http_server(config, credentials).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "irish_tutor_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "irish_tutor_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
