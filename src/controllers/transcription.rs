use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::transcription::{
        TranscriptionRequest, TranscriptionResponse, TranscriptionService, TranscriptionServiceApi,
    },
    error::AppResult,
};

pub struct TranscriptionController {
    transcription_service: Arc<TranscriptionService>,
}

impl TranscriptionController {
    pub fn new(transcription_service: Arc<TranscriptionService>) -> Self {
        Self {
            transcription_service,
        }
    }

    /// POST /api/transcribe - Transcribe base64 audio
    pub async fn transcribe(
        State(controller): State<Arc<TranscriptionController>>,
        payload: Result<Json<TranscriptionRequest>, JsonRejection>,
    ) -> AppResult<Json<TranscriptionResponse>> {
        let Json(request) = payload?;

        let response = controller.transcription_service.transcribe(request).await?;

        Ok(Json(response))
    }
}
