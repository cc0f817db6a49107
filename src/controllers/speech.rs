use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::speech::{SpeechRequest, SpeechService, SpeechServiceApi},
    error::AppResult,
};

pub struct SpeechController {
    speech_service: Arc<SpeechService>,
}

impl SpeechController {
    pub fn new(speech_service: Arc<SpeechService>) -> Self {
        Self { speech_service }
    }

    /// POST /api/speech - Convert text to speech
    pub async fn synthesize(
        State(controller): State<Arc<SpeechController>>,
        payload: Result<Json<SpeechRequest>, JsonRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let Json(request) = payload?;

        let result = controller.speech_service.synthesize(request.text).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(result.content_type),
        );
        headers.insert("X-Character-Count", HeaderValue::from(result.char_count));
        headers.insert(
            "X-Cache",
            HeaderValue::from_static(if result.cached { "HIT" } else { "MISS" }),
        );

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }
}
