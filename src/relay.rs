use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::RelayConfig;
use crate::domains::chat::{ChatRequest, ChatResponse, HealthResponse};
use crate::error::{PopchatError, Result};
use crate::interfaces::providers::CompletionProvider;
use crate::providers::openai::OpenAiProvider;

pub const QUOTA_REPLY: &str =
    "You've hit your free quota. Try again later or check OpenRouter usage.";
pub const FAILURE_REPLY: &str = "Something went wrong with the AI service.";

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
    pub system_prompt: String,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let provider = OpenAiProvider::from_config(config)?;
        Ok(Self::new(Arc::new(provider), config.system_prompt.clone()))
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version().to_string(),
    })
}

async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "unreadable chat request body");
            let err = PopchatError::Serialization(rejection.body_text());
            return failure_response(&err).into_response();
        }
    };
    if payload.message.is_none() {
        tracing::debug!("chat request without message; forwarding empty turn");
    }
    let prompt = payload.prompt();

    match state.provider.complete(&state.system_prompt, &prompt).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { reply })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "completion request failed");
            failure_response(&err).into_response()
        }
    }
}

/// Maps any completion failure to the status and user-facing text the widget renders.
pub fn failure_response(err: &PopchatError) -> (StatusCode, Json<ChatResponse>) {
    let (status, reply) = if err.is_quota_exceeded() {
        (StatusCode::TOO_MANY_REQUESTS, QUOTA_REPLY)
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_REPLY)
    };
    (
        status,
        Json(ChatResponse {
            reply: reply.to_string(),
        }),
    )
}

pub fn version() -> &'static str {
    env!("POPCHAT_GIT_SHA")
}

pub async fn run_with_shutdown<F>(config: RelayConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if config.openai.api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY is not set; upstream calls will fail authentication");
    }

    let state = AppState::from_config(&config)?;
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| PopchatError::Runtime(format!("bind {addr}: {e}")))?;

    tracing::info!(
        addr = %addr,
        model = %config.openai.model(),
        base_url = %config.openai.base_url(),
        version = version(),
        "relay listening"
    );

    serve(listener, state, shutdown).await
}

pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| PopchatError::Runtime(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_maps_to_429() {
        let (status, Json(body)) =
            failure_response(&PopchatError::QuotaExceeded("daily limit".to_string()));
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body.reply, QUOTA_REPLY);
    }

    #[test]
    fn everything_else_maps_to_500() {
        for err in [
            PopchatError::Upstream("503".to_string()),
            PopchatError::Http("connection refused".to_string()),
            PopchatError::Serialization("eof".to_string()),
            PopchatError::Runtime("builder".to_string()),
        ] {
            let (status, Json(body)) = failure_response(&err);
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body.reply, FAILURE_REPLY);
        }
    }
}
