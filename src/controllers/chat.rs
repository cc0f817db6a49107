use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection},
        State,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::chat::{ChatService, ChatServiceApi, ChatTurn, TurnRequest},
    error::AppResult,
};

pub struct ChatController {
    chat_service: Arc<ChatService>,
}

impl ChatController {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    /// POST /api/chat - Forward a messages request to the model provider untouched
    pub async fn relay(
        State(controller): State<Arc<ChatController>>,
        body: Result<Bytes, BytesRejection>,
    ) -> AppResult<Response> {
        let response = controller.chat_service.relay(body?.to_vec()).await?;

        Ok(([(header::CONTENT_TYPE, "application/json")], response).into_response())
    }

    /// POST /api/chat/turn - Run one tutor turn and return it structured
    pub async fn turn(
        State(controller): State<Arc<ChatController>>,
        payload: Result<Json<TurnRequest>, JsonRejection>,
    ) -> AppResult<Json<ChatTurn>> {
        let Json(request) = payload?;

        let turn = controller.chat_service.turn(request.messages).await?;

        Ok(Json(turn))
    }
}
