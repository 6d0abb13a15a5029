// crates/api/src/lib.rs

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use prigorod_core::{PrigorodError, PrigorodResult, SkillResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod limiter;

pub use handlers::SkillHandlers;
pub use limiter::RequestLimiter;

/// Webhook server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_cors_enabled() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_cors_enabled(),
        }
    }
}

/// Webhook server
pub struct ApiServer {
    config: ApiConfig,
    handlers: Arc<SkillHandlers>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, handlers: Arc<SkillHandlers>) -> Self {
        Self { config, handlers }
    }

    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .route("/", post(webhook))
            .route("/health", get(health))
            .with_state(self.handlers.clone());

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router
    }

    pub async fn serve(&self) -> PrigorodResult<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(%addr, "webhook server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| PrigorodError::Unknown(e.to_string()))
    }
}

/// The platform expects a success envelope for every POST, so the body is
/// parsed here rather than by an extractor: a rejection would surface as a
/// transport-level 400 instead of the apology envelope.
async fn webhook(
    State(handlers): State<Arc<SkillHandlers>>,
    body: Bytes,
) -> Json<SkillResponse> {
    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "request body is not JSON");
            Value::Null
        }
    };
    Json(handlers.handle_value(payload).await)
}

async fn health(State(handlers): State<Arc<SkillHandlers>>) -> Json<Value> {
    Json(handlers.health())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("received shutdown signal");
}
