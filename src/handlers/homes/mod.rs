mod inquiries;
mod listings;

pub use inquiries::*;
pub use listings::*;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::db::AppState;
use crate::middleware::access_gate;

/// Listing and inquiry routes. Role requirements come from `AppState::policy`,
/// enforced by the gate on every matched route.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/home", get(get_homes))
        .route("/home", post(create_home))
        .route("/home/{id}", get(get_home))
        .route("/home/{id}", put(update_home))
        .route("/home/{id}", delete(delete_home))
        .route("/home/{id}/inquire", post(inquire))
        .route("/home/{id}/messages", get(get_home_messages))
        .route_layer(middleware::from_fn_with_state(state, access_gate))
}
