use tower_http::cors::CorsLayer;

/// Fully permissive CORS layer: any origin, any method, any header.
///
/// Note: permissive mode cannot be combined with credentials (tower-http
/// rejects wildcard origins + `allow_credentials(true)` at runtime).
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
