use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// CORS for the admin dashboard and public site. With no configured origins
/// any origin may call the API.
pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS));

    match parse_origins(allowed_origins) {
        Some(origins) => {
            tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
            layer.allow_origin(AllowOrigin::list(origins))
        }
        None => {
            tracing::info!("CORS: No origins configured, allowing any origin");
            layer.allow_origin(Any)
        }
    }
}

fn parse_origins(allowed_origins: &[String]) -> Option<Vec<HeaderValue>> {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    (!origins.is_empty()).then_some(origins)
}
