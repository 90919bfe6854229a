//! HTTP API for Wayfarer.
//!
//! Exposes health checks plus the chat API: each request is routed to the
//! agent loop of its session, so concurrent users never share a context.
//!
//! Built on Axum.

pub mod api;

use axum::{Router, extract::DefaultBodyLimit, response::Json, routing::get};
use chrono::{Local, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use wayfarer_agent::{AgentFactory, AgentLoop, SessionStore};
use wayfarer_config::AppConfig;
use wayfarer_core::event::EventBus;
use wayfarer_core::provider::Provider;
use wayfarer_core::tool::ToolRegistry;

/// Shared application state for the HTTP server.
pub struct AppState {
    pub sessions: SessionStore,
    pub tools: Arc<ToolRegistry>,
    pub event_bus: Arc<EventBus>,
    pub provider_name: String,
    pub model: String,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build state around an explicit provider and tool set.
    pub fn new(config: &AppConfig, provider: Arc<dyn Provider>, tools: Arc<ToolRegistry>) -> Self {
        let event_bus = Arc::new(EventBus::default());
        let provider_name = provider.name().to_string();

        let factory: AgentFactory = {
            let config = config.clone();
            let tools = Arc::clone(&tools);
            let event_bus = Arc::clone(&event_bus);
            Arc::new(move |session_id: &str| {
                AgentLoop::from_config(
                    &config,
                    Arc::clone(&provider),
                    Arc::clone(&tools),
                    Arc::clone(&event_bus),
                )
                .with_conversation_id(session_id)
            })
        };

        Self {
            sessions: SessionStore::new(factory, config.sessions.max_sessions),
            tools,
            event_bus,
            provider_name,
            model: config.default_model.clone(),
        }
    }

    /// Build state with the configured provider and the built-in travel tools.
    pub fn from_config(config: &AppConfig) -> Self {
        let provider = wayfarer_providers::build_from_config(config);
        let tools = Arc::new(wayfarer_tools::default_registry());
        Self::new(config, provider, tools)
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/hello", get(hello_handler))
        .route("/v1/ping", get(ping_handler))
        .nest("/api", api::api_router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and serve until the process exits.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::from_config(&config));

    info!(
        addr = %addr,
        provider = %state.provider_name,
        model = %state.model,
        tools = state.tools.len(),
        "Server starting"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    time: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        time: Utc::now().to_rfc3339(),
    })
}

async fn hello_handler() -> &'static str {
    "hello from wayfarer\n"
}

async fn ping_handler() -> String {
    format!(
        "TZ:{}\nNowTime: {}\n",
        std::env::var("TZ").unwrap_or_default(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}
