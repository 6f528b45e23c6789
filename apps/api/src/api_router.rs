mod internal;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let internal_routes = internal::build_internal_routes(app_state.clone());

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(internal_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
