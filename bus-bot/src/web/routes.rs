//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::chat::Reply;

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/start", get(start))
        .route("/chat", post(chat))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Chat page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let hints = state.conversation.hints();
    let template = IndexTemplate {
        origin: hints.origin.clone(),
        destination: hints.destination.clone(),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// Greeting shown when a conversation starts.
async fn start() -> Json<ChatResponse> {
    Json(Reply::Help.into())
}

/// Answer one message.
async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>, AppError> {
    let req: ChatRequest = serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid request body: {}", e),
    })?;

    let reply = state.conversation.handle_isolated(req.text).await;
    Ok(Json(reply.into()))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveTime;

    use crate::cache::{CacheConfig, CachedResolver};
    use crate::chat::{Conversation, ReplyKind};
    use crate::domain::{Direction, TripRecord};
    use crate::resolver::{MockResolver, ResolverBackend, ScheduleHints};
    use crate::schedule::ScheduleStore;

    /// State whose answers do not depend on the wall clock: line questions
    /// ignore the time of day.
    fn state() -> AppState {
        let t = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        let store = ScheduleStore::new(vec![
            TripRecord::new("Ruta 60", Direction::Outbound, t("15:10"), t("15:40")),
            TripRecord::new("Ruta 12", Direction::Return, t("18:00"), t("18:30")),
        ]);
        let mock = MockResolver::new()
            .with_reply("horarios de la 60", r#"{"micro_linea": "60"}"#)
            .with_reply("horarios de la 99", r#"{"micro_linea": "99"}"#)
            .with_reply("cualquier cosa", r#"{"error": "no_claro"}"#);
        let resolver = CachedResolver::new(ResolverBackend::from(mock), &CacheConfig::default());

        AppState::new(Conversation::new(
            Arc::new(store),
            resolver,
            ScheduleHints::new("Rivadavia", "Facultad"),
        ))
    }

    async fn post(state: &AppState, body: &str) -> Result<ChatResponse, AppError> {
        let Json(response) = chat(State(state.clone()), Bytes::from(body.to_string())).await?;
        Ok(response)
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn start_is_help() {
        let Json(response) = start().await;
        assert_eq!(response.kind, ReplyKind::Help);
        assert_eq!(response.reply, Reply::Help.text());
    }

    #[tokio::test]
    async fn index_page_names_endpoints() {
        let Html(html) = index_page(State(state())).await.unwrap();
        assert!(html.contains("Rivadavia"));
        assert!(html.contains("Facultad"));
    }

    #[tokio::test]
    async fn chat_answers_line_question() {
        let response = post(&state(), r#"{"text": "horarios de la 60"}"#).await.unwrap();
        assert_eq!(response.kind, ReplyKind::Schedule);
        assert!(response.reply.starts_with("Aquí están los horarios que encontré:"));
        assert!(response.reply.contains("🚍 Línea **Ruta 60**"));
        assert!(!response.reply.contains("Ruta 12"));
    }

    #[tokio::test]
    async fn chat_unknown_line_is_no_matches() {
        let response = post(&state(), r#"{"text": "horarios de la 99"}"#).await.unwrap();
        assert_eq!(response.kind, ReplyKind::NoMatches);
    }

    #[tokio::test]
    async fn chat_unclear_message() {
        let state = state();
        for text in ["cualquier cosa", "sin respuesta configurada", "   "] {
            let body = serde_json::json!({ "text": text }).to_string();
            let response = post(&state, &body).await.unwrap();
            assert_eq!(response.kind, ReplyKind::NotUnderstood, "for {text:?}");
        }
    }

    #[tokio::test]
    async fn chat_command() {
        let response = post(&state(), r#"{"text": "/start"}"#).await.unwrap();
        assert_eq!(response.kind, ReplyKind::Help);
    }

    #[tokio::test]
    async fn chat_rejects_malformed_body() {
        let err = post(&state(), "not json").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err = post(&state(), r#"{"message": "hola"}"#).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn response_json_shape() {
        let json = serde_json::to_value(ChatResponse::from(Reply::NoMatches)).unwrap();
        assert_eq!(json["kind"], "no_matches");
        assert_eq!(json["reply"], Reply::NoMatches.text());
    }
}
