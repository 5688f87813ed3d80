use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// CORS for the public content endpoints: any origin may read the document.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::CACHE_CONTROL, header::PRAGMA])
}
