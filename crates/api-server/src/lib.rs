use analysis_core::SignalConfig;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sentiment_analysis::LexiconPolarity;
use signal_generator::SignalGenerator;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
mod logging;
pub mod request_id;
mod signal_routes;

pub use config::{LogFormat, ServerConfig};
pub use logging::init_tracing;
pub use signal_routes::{signal_routes, validate_request_payload, SignalRequest};

pub const SERVICE_NAME: &str = "trading-signal-service";

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<SignalGenerator>,
}

impl AppState {
    pub fn new(generator: SignalGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

/// Error returned by handlers. Renders as `{"status": "error", "error": msg}`.
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn with_status(status: StatusCode, error: anyhow::Error) -> Self {
        Self { status, error }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, anyhow::anyhow!(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: err.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.error);
        } else {
            tracing::warn!("Request rejected: {}", self.error);
        }

        let body = Json(serde_json::json!({
            "status": "error",
            "error": self.error.to_string(),
        }));
        (self.status, body).into_response()
    }
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": state.generator.config().service_version,
    }))
}

pub(crate) async fn method_not_allowed() -> AppError {
    AppError::with_status(StatusCode::METHOD_NOT_ALLOWED, anyhow::anyhow!("Method not allowed"))
}

async fn not_found() -> AppError {
    AppError::with_status(StatusCode::NOT_FOUND, anyhow::anyhow!("Endpoint not found"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check).fallback(method_not_allowed))
        .merge(signal_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, stopping server");
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let server_config = ServerConfig::from_env()?;
    init_tracing(server_config.log_format);

    let signal_config = SignalConfig::from_env()?;
    let provider = market_data::build_provider(server_config.provider, server_config.polygon_api_key.clone())?;
    tracing::info!("Using market data provider: {}", provider.name());

    let generator = SignalGenerator::new(signal_config, Arc::new(LexiconPolarity::new()), provider);
    let app = build_router(AppState::new(generator));

    let addr = server_config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 {} listening on http://{}", SERVICE_NAME, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
