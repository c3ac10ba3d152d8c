//! API server setup and configuration.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{DoctextError, ExtractionConfig, Result};

use super::{
    handlers::{health_handler, info_handler, parse_handler},
    types::{ApiSizeLimits, ApiState},
};

const MAX_REQUEST_BODY_BYTES_VAR: &str = "DOCTEXT_MAX_REQUEST_BODY_BYTES";
const MAX_MULTIPART_FIELD_BYTES_VAR: &str = "DOCTEXT_MAX_MULTIPART_FIELD_BYTES";
const MAX_UPLOAD_SIZE_MB_VAR: &str = "DOCTEXT_MAX_UPLOAD_SIZE_MB";
const CORS_ORIGINS_VAR: &str = "DOCTEXT_CORS_ORIGINS";

/// Size limits from the environment.
///
/// Preference order:
/// 1. `DOCTEXT_MAX_REQUEST_BODY_BYTES` (and optionally `DOCTEXT_MAX_MULTIPART_FIELD_BYTES`)
/// 2. `DOCTEXT_MAX_UPLOAD_SIZE_MB` (legacy, applies to both limits)
///
/// Unset, unparsable or zero values fall through to the next option, then to 100 MB.
pub fn parse_size_limits_from_env() -> ApiSizeLimits {
    if let Ok(value) = std::env::var(MAX_REQUEST_BODY_BYTES_VAR) {
        match value.parse::<usize>() {
            Ok(bytes) if bytes > 0 => {
                let multipart_bytes = std::env::var(MAX_MULTIPART_FIELD_BYTES_VAR)
                    .ok()
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|&v| v > 0)
                    .unwrap_or(bytes);

                tracing::info!(
                    request_body_bytes = bytes,
                    multipart_field_bytes = multipart_bytes,
                    "Upload size limits configured from environment"
                );
                return ApiSizeLimits::new(bytes, multipart_bytes);
            }
            _ => tracing::warn!("Ignoring {}='{}', expected a positive integer", MAX_REQUEST_BODY_BYTES_VAR, value),
        }
    }

    if let Ok(value) = std::env::var(MAX_UPLOAD_SIZE_MB_VAR) {
        match value.parse::<usize>() {
            Ok(mb) if mb > 0 => {
                tracing::info!(size_mb = mb, "Upload size limit configured from environment (legacy)");
                return ApiSizeLimits::from_mb(mb, mb);
            }
            _ => tracing::warn!("Ignoring {}='{}', expected a positive integer", MAX_UPLOAD_SIZE_MB_VAR, value),
        }
    }

    let limits = ApiSizeLimits::default();
    tracing::info!(
        "Upload size limit: 100 MB (default, {} bytes) - configure with {} or {}",
        limits.max_request_body_bytes,
        MAX_REQUEST_BODY_BYTES_VAR,
        MAX_UPLOAD_SIZE_MB_VAR
    );
    limits
}

fn cors_layer_from_env() -> CorsLayer {
    let Ok(origins_str) = std::env::var(CORS_ORIGINS_VAR) else {
        tracing::warn!(
            "CORS allows all origins (default). Set {} to a comma-separated list of origins for production",
            CORS_ORIGINS_VAR
        );
        return CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    };

    let origins: Vec<_> = origins_str
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("{} set but empty or invalid, falling back to permissive CORS", CORS_ORIGINS_VAR);
        return CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    }

    tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the API router with default size limits.
///
/// Public so the routes can be nested into another application.
///
/// # Examples
///
/// ```no_run
/// use axum::Router;
/// use doctext::{ExtractionConfig, api::create_router};
///
/// let app: Router = Router::new().nest("/documents", create_router(ExtractionConfig::default()));
/// ```
pub fn create_router(config: ExtractionConfig) -> Router {
    create_router_with_limits(config, ApiSizeLimits::default())
}

/// Create the API router with explicit size limits.
pub fn create_router_with_limits(config: ExtractionConfig, limits: ApiSizeLimits) -> Router {
    let state = ApiState {
        default_config: Arc::new(config),
        limits,
    };

    Router::new()
        .route("/parse", post(parse_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(cors_layer_from_env())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server, discovering `doctext.toml` from the current directory upwards.
///
/// Size limits come from the environment (see [`parse_size_limits_from_env`]).
///
/// # Examples
///
/// ```no_run
/// #[tokio::main]
/// async fn main() -> doctext::Result<()> {
///     doctext::api::serve("127.0.0.1", 8000).await
/// }
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = match ExtractionConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded extraction config from discovered file");
            config
        }
        None => {
            tracing::info!("No config file found, using default configuration");
            ExtractionConfig::default()
        }
    };

    serve_with_config_and_limits(host, port, config, parse_size_limits_from_env()).await
}

/// Start the API server with an explicit config and size limits from the environment.
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: ExtractionConfig) -> Result<()> {
    serve_with_config_and_limits(host, port, config, parse_size_limits_from_env()).await
}

/// Start the API server with an explicit config and explicit size limits.
pub async fn serve_with_config_and_limits(
    host: impl AsRef<str>,
    port: u16,
    config: ExtractionConfig,
    limits: ApiSizeLimits,
) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| DoctextError::validation_with_source(format!("Invalid host address '{}'", host.as_ref()), e))?;

    config.validate()?;
    crate::extractors::ensure_initialized()?;

    let addr = SocketAddr::new(ip, port);
    let app = create_router_with_limits(config, limits);

    tracing::info!("Starting doctext API server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
