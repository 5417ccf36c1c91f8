//! App-level endpoints: service metadata and health reporting.

pub mod health;
pub mod root;

pub use health::HealthState;

use axum::routing::get;
use axum::Router;

/// Router for the endpoints that live outside the catalog domain.
pub fn routes(state: HealthState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .with_state(state)
}
