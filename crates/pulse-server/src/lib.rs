//! Pulse Web Server
//!
//! Axum-based HTTP transport for the spending suggestion classifier.
//!
//! - `POST /analyze` classifies a `totalSpent` value
//! - Configurable CORS policy (all origins by default, for the browser wallet)
//! - Request tracing and `nosniff` on every response
//! - JSON error bodies for malformed input

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

mod handlers;

/// Port used when `PORT` is unset or invalid
pub const DEFAULT_PORT: u16 = 5000;

/// Host used when `PULSE_HOST` is unset (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Origin entry that permits every origin
pub const ANY_ORIGIN: &str = "*";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins ("*" = any origin, empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: vec![ANY_ORIGIN.to_string()],
        }
    }
}

impl ServerConfig {
    /// Parse configuration from environment variables
    ///
    /// - `PORT`: listening port (default 5000)
    /// - `PULSE_HOST`: listening host (default 0.0.0.0)
    /// - `PULSE_ALLOWED_ORIGINS`: comma-separated CORS origins (default "*")
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid PORT, using default {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let host = var("PULSE_HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);

        let allowed_origins = var("PULSE_ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or(defaults.allowed_origins);

        Self {
            host,
            port,
            allowed_origins,
        }
    }

    fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

/// Parse a comma-separated list of CORS origins
///
/// Examples:
/// - "*" - any origin
/// - "http://localhost:8080" - single origin
/// - "http://localhost:8080, https://wallet.example" - multiple origins
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allows_any_origin() {
        base.allow_origin(Any)
    } else if config.allowed_origins.is_empty() {
        // Same-origin only
        base
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        base.allow_origin(AllowOrigin::list(origins))
    }
}

/// Create the application router
pub fn create_router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze_spending))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}

/// Start the server with custom configuration
pub async fn serve_with_config(config: ServerConfig) -> anyhow::Result<()> {
    if config.allows_any_origin() {
        info!("CORS: all origins allowed");
    } else if config.allowed_origins.is_empty() {
        info!("CORS: same-origin only");
    } else {
        info!("CORS: {}", config.allowed_origins.join(", "));
    }

    let app = create_router(&config);
    let addr = format!("{}:{}", config.host, config.port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        match &self.internal {
            Some(err) => error!(error = %err, "Internal error"),
            None => warn!(status = %self.status, error = %self.message, "Request rejected"),
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            internal: Some(err.into()),
        }
    }
}

#[cfg(test)]
mod tests;
