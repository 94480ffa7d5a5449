pub mod health;
pub mod homes;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::AppState;

/// The full HTTP application.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(homes::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
