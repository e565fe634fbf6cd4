//! HTTP surface for the conversion service.
//!
//! The routes mirror the service contract: `/romannumeral` is the one
//! real endpoint, the rest (`/health`, `/metrics`, `/api`) are
//! operational plumbing. All conversion semantics live in
//! `romannumeral_core`; this module only translates outcomes into
//! status codes.

mod cli;
pub mod metrics;
pub mod trace;

pub use cli::App;

use crate::prelude::{eprintln, *};
use axum::{
    extract::Query,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use romannumeral_core::convert_input;
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use trace::TraceContext;

static STARTED_AT: LazyLock<Instant> = LazyLock::new(Instant::now);

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!(
            "Starting Roman numeral conversion server on {}:{}...",
            app.host, app.port
        );
    }

    LazyLock::force(&STARTED_AT);

    let addr = format!("{}:{}", app.host, app.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Roman numeral conversion server listening on http://{addr}");

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    log::info!("Server shut down gracefully");

    Ok(())
}

fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/romannumeral", get(convert_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api", get(api_handler))
        .fallback(not_found_handler)
        .layer(axum::middleware::from_fn(metrics::track_requests))
        .layer(axum::middleware::from_fn(trace::trace_requests))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    query: Option<String>,
}

async fn convert_handler(
    Extension(context): Extension<TraceContext>,
    Query(params): Query<ConvertParams>,
) -> Response {
    let Some(query) = params.query else {
        log::warn!("[{}] Missing query parameter", context.trace_id);
        return (StatusCode::BAD_REQUEST, "Missing query parameter").into_response();
    };

    log::info!(
        "[{}] Roman numeral conversion requested: {:?}",
        context.trace_id,
        query
    );

    match convert_input(&query) {
        Ok(result) => {
            metrics::record_conversion_success(result.value);
            log::info!(
                "[{}] Conversion successful: {} -> {}",
                context.trace_id,
                result.input,
                result.output
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(kind) => {
            metrics::record_conversion_failure(kind.code());
            log::error!(
                "[{}] Conversion failed: {} ({:?})",
                context.trace_id,
                kind,
                query
            );
            error_response(&Error::Validation(kind))
        }
    }
}

/// Map the shell failure type to a transport status code. Validation
/// failures carry their fixed message; everything else collapses to a
/// generic internal error.
fn error_response(error: &Error) -> Response {
    match error {
        Error::Validation(kind) => (StatusCode::BAD_REQUEST, kind.to_string()).into_response(),
        Error::Generic(message) => {
            log::error!("Unhandled error: {message}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    uptime_seconds: u64,
}

async fn health_handler(Extension(context): Extension<TraceContext>) -> Json<HealthResponse> {
    log::info!("[{}] Health check requested", context.trace_id);

    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: STARTED_AT.elapsed().as_secs(),
    })
}

async fn metrics_handler() -> Response {
    match metrics::render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            log::error!("Error rendering metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error getting metrics").into_response()
        }
    }
}

async fn api_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Roman Numeral Converter API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Convert integers between 1-3999 to Roman numerals",
        "endpoints": {
            "/romannumeral?query={integer}": "Convert integer to Roman numeral",
            "/health": "Health check",
            "/metrics": "Prometheus metrics"
        },
        "example": "/romannumeral?query=42"
    }))
}

async fn not_found_handler(uri: Uri) -> Response {
    log::warn!("Route not found: {uri}");
    (StatusCode::NOT_FOUND, "Route not found").into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => log::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::info!("SIGINT received, shutting down gracefully"),
        () = terminate => log::info!("SIGTERM received, shutting down gracefully"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_response(path: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri(path)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn test_convert_success() {
        let (status, body) = get_response("/romannumeral?query=42").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["input"], "42");
        assert_eq!(json["output"], "XLII");
        // The parsed value feeds metrics only; it stays off the wire.
        assert!(json.get("value").is_none());
    }

    #[tokio::test]
    async fn test_convert_trims_whitespace() {
        let (status, body) = get_response("/romannumeral?query=%20%2042%20%20").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["input"], "42");
        assert_eq!(json["output"], "XLII");
    }

    #[tokio::test]
    async fn test_convert_missing_query_parameter() {
        let (status, body) = get_response("/romannumeral").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Missing query parameter");
    }

    #[tokio::test]
    async fn test_convert_invalid_number() {
        let (status, body) = get_response("/romannumeral?query=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Input must be a valid integer");
    }

    #[tokio::test]
    async fn test_convert_out_of_range() {
        let (status, body) = get_response("/romannumeral?query=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Input must be between 1 and 3999");

        let (status, body) = get_response("/romannumeral?query=4000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Input must be between 1 and 3999");
    }

    #[tokio::test]
    async fn test_convert_invalid_characters() {
        let (status, body) = get_response("/romannumeral?query=3.14").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Input must be a valid integer");

        // U+0664 ARABIC-INDIC FOUR trailing an ASCII prefix.
        let (status, body) = get_response("/romannumeral?query=42%D9%A4").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Input must be a valid integer");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get_response("/health").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json["timestamp"].is_string());
        assert!(json["uptime_seconds"].is_number());
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (status, body) = get_response("/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("roman_numeral_active_requests"));
        assert!(body.contains("roman_numeral_conversions_success_total"));
    }

    #[tokio::test]
    async fn test_api_endpoint() {
        let (status, body) = get_response("/api").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["name"], "Roman Numeral Converter API");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get_response("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Route not found");
    }

    #[test]
    fn test_error_response_mapping() {
        let response = error_response(&Error::Validation(
            romannumeral_core::ValidationErrorKind::OutOfRange,
        ));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_response(&Error::Generic("boom".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
