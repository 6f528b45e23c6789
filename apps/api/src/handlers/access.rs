use axum::Json;
use axum::extract::{Query, State};

use crate::dto::{
    AccessDecisionResponse, AccessibleFeaturesQuery, AccessibleFeaturesResponse,
    FeatureAccessRequest, PageAccessRequest, PageAccessResponse, RequestQuotaRequest,
    RequestQuotaResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn check_feature_access_handler(
    State(state): State<AppState>,
    Json(payload): Json<FeatureAccessRequest>,
) -> ApiResult<Json<AccessDecisionResponse>> {
    let caller = payload.caller()?;
    let decision = state
        .subscription_access_service
        .check_named_feature_access(&caller, payload.feature.as_str())
        .await;

    Ok(Json(AccessDecisionResponse::from(decision)))
}

pub async fn accessible_features_handler(
    State(state): State<AppState>,
    Query(query): Query<AccessibleFeaturesQuery>,
) -> ApiResult<Json<AccessibleFeaturesResponse>> {
    let caller = query.into_identity()?;
    let features = state
        .subscription_access_service
        .accessible_features(&caller)
        .await;

    Ok(Json(AccessibleFeaturesResponse::from(features)))
}

pub async fn check_page_access_handler(
    State(state): State<AppState>,
    Json(payload): Json<PageAccessRequest>,
) -> ApiResult<Json<PageAccessResponse>> {
    let caller = payload.caller()?;
    let decision = state
        .subscription_access_service
        .check_page_access(&caller, payload.page.as_str())
        .await;

    Ok(Json(PageAccessResponse::from(decision)))
}

pub async fn request_quota_handler(
    State(state): State<AppState>,
    Json(payload): Json<RequestQuotaRequest>,
) -> ApiResult<Json<RequestQuotaResponse>> {
    let caller = payload.caller()?;
    let quota = state
        .subscription_access_service
        .request_quota_for_caller(&caller)
        .await;

    Ok(Json(RequestQuotaResponse::from_quota(
        quota,
        payload.used_this_month,
    )))
}
