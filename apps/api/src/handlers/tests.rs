use std::sync::Arc;

use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode, header};
use encore_application::{StripeConnectService, SubscriptionAccessService};
use encore_core::{AppError, TenantId};
use encore_domain::{EmailAddress, Organization, SubscriptionTier};
use encore_infrastructure::{AllowListPlatformAdminDirectory, InMemoryOrganizationRepository};
use tower::ServiceExt;

use super::access::{
    accessible_features_handler, check_feature_access_handler, check_page_access_handler,
    request_quota_handler,
};
use super::stripe_connect::{connect_status_handler, payment_quote_handler};
use crate::api_router::build_router;
use crate::dto::{
    AccessibleFeaturesQuery, CallerRequest, FeatureAccessRequest, PageAccessRequest,
    PaymentQuoteRequest, RequestQuotaRequest,
};
use crate::middleware::internal_token_digest;
use crate::state::AppState;

const TOKEN: &str = "test-internal-token-0123456789abcdef";

async fn test_state() -> AppState {
    let repository = Arc::new(InMemoryOrganizationRepository::new());

    let professional = Organization::new(
        TenantId::new(),
        "Night Shift Sound",
        "night-shift-sound",
        SubscriptionTier::Professional,
    )
    .with_stripe_connect(Some("acct_1".to_owned()), true, true);
    let free = Organization::new(
        TenantId::new(),
        "Basement Beats",
        "basement-beats",
        SubscriptionTier::Free,
    )
    .with_stripe_connect(Some("acct_2".to_owned()), true, false);

    assert!(
        repository
            .insert_organization("pro-owner", professional)
            .await
            .is_ok()
    );
    assert!(repository.insert_organization("free-owner", free).await.is_ok());

    let admin = EmailAddress::new("ops@encore.example").unwrap_or_else(|_| panic!("test"));

    AppState {
        subscription_access_service: SubscriptionAccessService::new(
            repository.clone(),
            Arc::new(AllowListPlatformAdminDirectory::new([admin])),
        ),
        stripe_connect_service: StripeConnectService::new(repository),
        internal_api_token_digest: internal_token_digest(TOKEN),
    }
}

#[tokio::test]
async fn feature_access_reports_professional_grant() {
    let state = test_state().await;

    let response = check_feature_access_handler(
        State(state),
        Json(FeatureAccessRequest {
            subject: "pro-owner".to_owned(),
            email: None,
            feature: "invoices".to_owned(),
        }),
    )
    .await;

    let Ok(Json(decision)) = response else {
        panic!("expected decision");
    };
    assert!(decision.has_access);
    assert_eq!(decision.required_tier, "professional");
    assert_eq!(decision.current_tier.as_deref(), Some("professional"));
}

#[tokio::test]
async fn feature_access_denies_unknown_subject() {
    let state = test_state().await;

    let response = check_feature_access_handler(
        State(state),
        Json(FeatureAccessRequest {
            subject: "stranger".to_owned(),
            email: None,
            feature: "team".to_owned(),
        }),
    )
    .await;

    let Ok(Json(decision)) = response else {
        panic!("expected decision");
    };
    assert!(!decision.has_access);
    assert_eq!(decision.required_tier, "professional");
    assert!(decision.current_tier.is_none());
}

#[tokio::test]
async fn blank_subject_is_rejected() {
    let state = test_state().await;

    let response = check_feature_access_handler(
        State(state),
        Json(FeatureAccessRequest {
            subject: "  ".to_owned(),
            email: None,
            feature: "crm".to_owned(),
        }),
    )
    .await;

    assert!(matches!(response, Err(error) if matches!(error.0, AppError::Validation(_))));
}

#[tokio::test]
async fn platform_admin_lists_every_feature() {
    let state = test_state().await;

    let response = accessible_features_handler(
        State(state),
        Query(AccessibleFeaturesQuery {
            subject: "someone".to_owned(),
            email: Some("OPS@encore.example".to_owned()),
        }),
    )
    .await;

    let Ok(Json(listing)) = response else {
        panic!("expected features");
    };
    assert_eq!(listing.features.len(), 7);
}

#[tokio::test]
async fn page_access_explains_denial() {
    let state = test_state().await;

    let response = check_page_access_handler(
        State(state),
        Json(PageAccessRequest {
            subject: "free-owner".to_owned(),
            email: None,
            page: "settings".to_owned(),
        }),
    )
    .await;

    let Ok(Json(decision)) = response else {
        panic!("expected decision");
    };
    assert!(!decision.has_access);
    assert_eq!(decision.feature, "crm");
    assert_eq!(decision.current_tier.as_deref(), Some("free"));
    assert!(decision.reason.is_some());
}

#[tokio::test]
async fn free_tenant_request_quota_is_limited() {
    let state = test_state().await;

    let response = request_quota_handler(
        State(state),
        Json(RequestQuotaRequest {
            subject: "free-owner".to_owned(),
            email: None,
            used_this_month: 10,
        }),
    )
    .await;

    let Ok(Json(quota)) = response else {
        panic!("expected quota");
    };
    assert_eq!(quota.monthly_limit, Some(10));
    assert_eq!(quota.remaining, Some(0));
    assert!(!quota.allows_another);
}

#[tokio::test]
async fn connect_status_reports_incomplete_onboarding() {
    let state = test_state().await;

    let response = connect_status_handler(
        State(state),
        Json(CallerRequest {
            subject: "free-owner".to_owned(),
            email: None,
        }),
    )
    .await;

    let Ok(Json(status)) = response else {
        panic!("expected status");
    };
    assert!(status.has_account);
    assert!(status.requires_setup);
    assert!(!status.is_complete);
    assert_eq!(status.severity, "warning");
}

#[tokio::test]
async fn payment_quote_routes_to_connected_account() {
    let state = test_state().await;

    let response = payment_quote_handler(
        State(state),
        Json(PaymentQuoteRequest {
            subject: "pro-owner".to_owned(),
            email: None,
            amount_cents: 1000,
        }),
    )
    .await;

    let Ok(Json(quote)) = response else {
        panic!("expected quote");
    };
    assert_eq!(quote.route, "connected_account");
    assert_eq!(quote.connected_account_id.as_deref(), Some("acct_1"));
    assert_eq!(quote.fee_cents, 65);
    assert_eq!(quote.payout_cents, 935);
}

#[tokio::test]
async fn payment_quote_rejects_negative_amount() {
    let state = test_state().await;

    let response = payment_quote_handler(
        State(state),
        Json(PaymentQuoteRequest {
            subject: "pro-owner".to_owned(),
            email: None,
            amount_cents: -1,
        }),
    )
    .await;

    assert!(matches!(response, Err(error) if matches!(error.0, AppError::Validation(_))));
}

#[tokio::test]
async fn internal_routes_require_bearer_token() {
    let router = build_router(test_state().await);
    let body = r#"{"subject":"pro-owner","feature":"crm"}"#;

    let missing = router
        .clone()
        .oneshot(
            Request::post("/api/internal/access/features")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap_or_else(|_| panic!("test")),
        )
        .await
        .unwrap_or_else(|_| panic!("test"));
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let wrong = router
        .clone()
        .oneshot(
            Request::post("/api/internal/access/features")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer not-the-token")
                .body(Body::from(body))
                .unwrap_or_else(|_| panic!("test")),
        )
        .await
        .unwrap_or_else(|_| panic!("test"));
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let accepted = router
        .oneshot(
            Request::post("/api/internal/access/features")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
                .body(Body::from(body))
                .unwrap_or_else(|_| panic!("test")),
        )
        .await
        .unwrap_or_else(|_| panic!("test"));
    assert_eq!(accepted.status(), StatusCode::OK);

    let bytes = to_bytes(accepted.into_body(), usize::MAX)
        .await
        .unwrap_or_else(|_| panic!("test"));
    let payload: serde_json::Value =
        serde_json::from_slice(&bytes).unwrap_or_else(|_| panic!("test"));
    assert_eq!(payload["has_access"], serde_json::Value::Bool(true));
}

#[tokio::test]
async fn health_is_public() {
    let router = build_router(test_state().await);

    let response = router
        .oneshot(
            Request::get("/health")
                .body(Body::empty())
                .unwrap_or_else(|_| panic!("test")),
        )
        .await
        .unwrap_or_else(|_| panic!("test"));

    assert_eq!(response.status(), StatusCode::OK);
}
