use axum::{
    Json as JsonExtractor, Router,
    extract::State,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    error::AppError,
    models::api::{ChatReply, ChatRequest},
    state::AppState,
};

const CHAT_PAGE: &str = include_str!("../../assets/index.html");

#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

// liveness probe, must stay free of external calls
async fn health() -> &'static str {
    "OK"
}

async fn chat(
    State(state): State<AppState>,
    JsonExtractor(request): JsonExtractor<ChatRequest>,
) -> Result<Response, AppError> {
    if request.message.is_empty() {
        return Err(AppError::EmptyMessage);
    }

    info!("Forwarding chat message to completion API");
    let reply = state.completion.complete(&request.message).await?;

    Ok(Json(ChatReply { reply }).into_response())
}
