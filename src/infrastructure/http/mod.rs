use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use anyhow::Context;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    controllers::{
        chat::ChatController,
        health::{self, ReadinessState},
        speech::SpeechController,
        transcription::TranscriptionController,
    },
    domain::{chat::ChatService, speech::SpeechService, transcription::TranscriptionService},
    error::AppError,
    infrastructure::{
        config::{Config, TranscriptionBackend},
        credentials::CredentialStore,
        middleware::{cors_layer, request_id_middleware},
        repositories::{
            AnthropicLlmRepository, AzureFastTranscriptionRepository, AzureShortAudioRepository,
            ElevenLabsTtsRepository, TranscriptionRepository,
        },
    },
};

/// Relays only accept POST; everything else gets the JSON error envelope
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Wire repositories, services and controllers into the application router
pub fn build_app(config: Arc<Config>, credentials: Arc<dyn CredentialStore>) -> Router {
    let http_client = reqwest::Client::new();

    // 1. Repositories (provider clients)
    tracing::debug!("Instantiating repositories...");
    let llm_repo = Arc::new(AnthropicLlmRepository::new(
        http_client.clone(),
        credentials.clone(),
        config.anthropic_base_url.clone(),
        config.anthropic_version.clone(),
        config.chat_model.clone(),
        config.chat_max_tokens,
    ));
    let tts_repo = Arc::new(ElevenLabsTtsRepository::new(
        http_client.clone(),
        credentials.clone(),
        config.elevenlabs_base_url.clone(),
        config.elevenlabs_voice_id.clone(),
        config.elevenlabs_model_id.clone(),
    ));
    let transcription_repo: Arc<dyn TranscriptionRepository> = match config.transcription_backend {
        TranscriptionBackend::Fast => Arc::new(AzureFastTranscriptionRepository::new(
            http_client.clone(),
            credentials.clone(),
            config.azure_speech_endpoint.clone(),
        )),
        TranscriptionBackend::ShortAudio => Arc::new(AzureShortAudioRepository::new(
            http_client.clone(),
            credentials.clone(),
            config.azure_speech_endpoint.clone(),
        )),
    };

    // 2. Services
    tracing::debug!("Instantiating services...");
    let chat_service = Arc::new(ChatService::new(llm_repo));
    let speech_service = Arc::new(SpeechService::new(tts_repo, config.tts_cache_enabled));
    let transcription_service = Arc::new(TranscriptionService::new(
        transcription_repo,
        config.transcription_locales.clone(),
    ));

    let readiness = ReadinessState {
        credentials,
        azure_endpoint_configured: config.azure_speech_endpoint.is_some(),
    };

    // 3. Controllers
    tracing::debug!("Instantiating controllers...");
    let chat_controller = Arc::new(ChatController::new(chat_service));
    let speech_controller = Arc::new(SpeechController::new(speech_service));
    let transcription_controller = Arc::new(TranscriptionController::new(transcription_service));

    let chat_routes = Router::new()
        .route(
            "/api/chat",
            post(ChatController::relay).fallback(method_not_allowed),
        )
        .route(
            "/api/chat/turn",
            post(ChatController::turn).fallback(method_not_allowed),
        )
        .with_state(chat_controller);

    let speech_routes = Router::new()
        .route(
            "/api/speech",
            post(SpeechController::synthesize).fallback(method_not_allowed),
        )
        .with_state(speech_controller);

    let transcription_routes = Router::new()
        .route(
            "/api/transcribe",
            post(TranscriptionController::transcribe).fallback(method_not_allowed),
        )
        .with_state(transcription_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(readiness)
        .merge(chat_routes)
        .merge(speech_routes)
        .merge(transcription_routes)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins))
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    credentials: Arc<dyn CredentialStore>,
) -> anyhow::Result<()> {
    let app = build_app(config.clone(), credentials);

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
