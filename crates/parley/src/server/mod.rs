//! HTTP façade over the rephraser and the conversation store
//!
//! Routes:
//! - `POST /send-message` rephrase a message and log it for the pair
//! - `GET /conversation?user1=&user2=` read a pair's log
//! - `POST /restart` ask the supervisor for a restart (when configured)
//! - `GET /health` liveness

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{
    ConversationQuery, RestartResponse, SendMessageRequest, SendMessageResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{CorsConfig, ServerConfig};
use crate::conversation::ConversationStore;
use crate::error::{ParleyError, Result};
use crate::reload::{ReloadTrigger, ShutdownReload};
use crate::rephrase::Rephraser;

use handlers::{conversation_handler, health_handler, restart_handler, send_message_handler};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub rephraser: Arc<Rephraser>,
    pub store: Arc<dyn ConversationStore>,
    /// `None` leaves `/restart` unmounted
    pub reload: Option<Arc<dyn ReloadTrigger>>,
    pub allow_freeform_prompts: bool,
}

/// The relay's HTTP server
pub struct ParleyServer {
    config: ServerConfig,
    state: Arc<AppState>,
    shutdown: Option<ShutdownReload>,
}

impl ParleyServer {
    pub fn new(
        config: ServerConfig,
        state: Arc<AppState>,
        shutdown: Option<ShutdownReload>,
    ) -> Self {
        Self {
            config,
            state,
            shutdown,
        }
    }

    /// Bind and serve until Ctrl+C, SIGTERM, or a shutdown-mode restart
    pub async fn serve(&self) -> Result<()> {
        let app = create_router(self.state.clone(), &self.config)?;

        let addr: SocketAddr = self
            .config
            .listen_addr
            .parse()
            .map_err(|e| ParleyError::Config(format!("Invalid listen address: {e}")))?;

        if self.config.cors.allowed_origins.is_empty() {
            tracing::info!("CORS: disabled (same-origin only)");
        } else {
            tracing::info!(
                "CORS: {} origins allowed",
                self.config.cors.allowed_origins.len()
            );
        }
        match &self.state.reload {
            Some(trigger) => tracing::info!("Restart endpoint enabled ({})", trigger.name()),
            None => tracing::info!("Restart endpoint disabled"),
        }

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ParleyError::Server(format!("Failed to bind to {addr}: {e}")))?;

        tracing::info!("Server running on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(self.shutdown.clone()))
            .await
            .map_err(|e| ParleyError::Server(format!("Server error: {e}")))?;

        tracing::info!("Server shut down gracefully");
        Ok(())
    }
}

/// Create the router with all routes and layers configured
pub fn create_router(state: Arc<AppState>, config: &ServerConfig) -> Result<Router> {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/send-message", post(send_message_handler))
        .route("/conversation", get(conversation_handler));

    if state.reload.is_some() {
        router = router.route("/restart", post(restart_handler));
    }

    let mut router = router
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(&config.cors)? {
        router = router.layer(cors);
    }

    Ok(router)
}

/// CORS layer for the configured origins, or `None` when none are configured
fn cors_layer(config: &CorsConfig) -> Result<Option<CorsLayer>> {
    if config.allowed_origins.is_empty() {
        return Ok(None);
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ParleyError::Config(format!("Invalid CORS origin '{origin}': {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    ))
}

/// Wait for Ctrl+C, SIGTERM, or a restart request in shutdown mode
async fn shutdown_signal(reload: Option<ShutdownReload>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let restart = async {
        match reload {
            Some(reload) => reload.requested().await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
        _ = restart => {
            tracing::info!("Restart requested, initiating graceful shutdown");
        },
    }
}
