// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTTP API.
//!
//! Every endpoint lives under `/api` and is stateless apart from writing
//! uploads to disk; stored files are served back under `/uploads`.

pub mod alt_text;
pub mod aria;
pub mod audit;
pub mod contrast;
pub mod media;
pub mod text;
pub mod upload;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, FromRequest, Request};
use axum::routing::get;
use axum::{async_trait, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::assist::{Assistant, OpenAiClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fallback::FallbackGenerator;
use crate::uploads::UploadStore;

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub uploads: Arc<UploadStore>,
    /// Present only when an API key is configured
    pub assistant: Option<Arc<dyn Assistant>>,
    pub fallback: Arc<FallbackGenerator>,
}

impl AppState {
    /// Build services from configuration
    pub fn new(config: Config) -> Result<Self> {
        let assistant: Option<Arc<dyn Assistant>> = match config.openai.api_key() {
            Some(_) => Some(Arc::new(OpenAiClient::new(&config.openai)?)),
            None => {
                tracing::info!("OpenAI API key not configured, using template fallbacks");
                None
            }
        };

        Ok(Self {
            uploads: Arc::new(UploadStore::new(config.uploads.dir.clone())),
            config: Arc::new(config),
            assistant,
            fallback: Arc::new(FallbackGenerator::default()),
        })
    }

    pub fn with_assistant(mut self, assistant: Arc<dyn Assistant>) -> Self {
        self.assistant = Some(assistant);
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackGenerator) -> Self {
        self.fallback = Arc::new(fallback);
        self
    }
}

/// Assemble the full application router
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .nest("/contrast", contrast::routes())
        .nest("/alt-text", alt_text::routes(&state.config.uploads))
        .nest("/text", text::routes())
        .nest("/media", media::routes(&state.config.uploads))
        .nest("/aria", aria::routes())
        .merge(audit::routes())
        .merge(upload::routes(&state.config.uploads));

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(state.uploads.root()))
        .layer(DefaultBodyLimit::max(state.config.server.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    tracing::debug!("Health check endpoint called");
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// A required string field, rejected when missing or empty
pub(crate) fn required(value: Option<String>, message: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::BadRequest(message.to_string()))
}

/// `Json<T>` whose rejections answer with the usual `{ "error": .. }` body
pub(crate) struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Run document parsing and auditing off the async workers
pub(crate) async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| Error::Internal(err.to_string()))
}
