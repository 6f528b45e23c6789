use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::post;

use crate::state::AppState;
use crate::{handlers, middleware};

pub(super) fn build_internal_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/internal/access/features",
            post(handlers::access::check_feature_access_handler)
                .get(handlers::access::accessible_features_handler),
        )
        .route(
            "/api/internal/access/pages",
            post(handlers::access::check_page_access_handler),
        )
        .route(
            "/api/internal/access/request-quota",
            post(handlers::access::request_quota_handler),
        )
        .route(
            "/api/internal/stripe-connect/status",
            post(handlers::stripe_connect::connect_status_handler),
        )
        .route(
            "/api/internal/stripe-connect/quote",
            post(handlers::stripe_connect::payment_quote_handler),
        )
        .route_layer(from_fn_with_state(
            app_state,
            middleware::require_internal_auth,
        ))
}
