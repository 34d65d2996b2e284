//! REST API routes configuration

use crate::api::handlers::{self, ApiState};
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use rust_embed::Embed;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::SmartIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};

/// Embedded static files for the landing page
#[derive(Embed)]
#[folder = "static"]
struct Assets;

/// Serve root index.html
async fn index_handler() -> impl IntoResponse {
    serve_static("index.html")
}

/// Internal function to serve embedded files
fn serve_static(path: &str) -> Response {
    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.into_owned()))
                .unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found"))
            .unwrap(),
    }
}

/// Fallback handler for static files
async fn fallback_handler(uri: axum::http::Uri) -> impl IntoResponse {
    let path = uri.path();

    // Don't serve HTML for API routes - return 404 JSON instead
    if path.starts_with("/api/") {
        return Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"error":"Not Found"}"#))
            .unwrap();
    }

    let path = path.trim_start_matches('/');
    serve_static(if path.is_empty() { "index.html" } else { path })
}

/// Create the API router with all routes
pub fn create_router(state: ApiState) -> Router {
    // Configure CORS for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Per-client-IP throttle for the deployment endpoints. SmartIpKeyExtractor
    // checks common reverse proxy headers (x-forwarded-for, x-real-ip,
    // forwarded) before falling back to peer IP.
    let governor_config = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(state.config.rate_limit_per_second)
        .burst_size(state.config.rate_limit_burst)
        .finish()
        .expect("Invalid rate limit configuration");

    // Deployment endpoints carry the rate limiter; health and static do not
    let throttled = Router::new()
        .route(
            "/api/prepare-deployment/",
            post(handlers::prepare_deployment),
        )
        .route("/api/verify-contract/", post(handlers::verify_contract))
        .layer(GovernorLayer::new(governor_config));

    Router::new()
        .merge(throttled)
        // Health check
        .route("/api/health/", get(handlers::health_check))
        // Static files (landing page)
        .route("/", get(index_handler))
        .fallback(fallback_handler)
        // Add state and middleware
        .with_state(state)
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PayloadCache;
    use crate::config::DeployerConfig;
    use std::sync::Arc;

    #[test]
    fn test_router_builds() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DeployerConfig::with_data_dir(temp_dir.path().to_path_buf());
        let cache = Arc::new(
            PayloadCache::new(config.data_dir.clone(), config.cache_ttl_secs).unwrap(),
        );

        let _router = create_router(ApiState { config, cache });
    }

    #[test]
    fn test_landing_page_is_embedded() {
        assert!(Assets::get("index.html").is_some());
        assert!(Assets::get("js/deployer.js").is_some());
    }
}
