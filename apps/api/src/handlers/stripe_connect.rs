use axum::Json;
use axum::extract::State;

use crate::dto::{
    CallerRequest, PaymentQuoteRequest, PaymentQuoteResponse, StripeConnectStatusResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn connect_status_handler(
    State(state): State<AppState>,
    Json(payload): Json<CallerRequest>,
) -> ApiResult<Json<StripeConnectStatusResponse>> {
    let caller = payload.into_identity()?;
    let overview = state
        .stripe_connect_service
        .connect_status_for_caller(&caller)
        .await;

    Ok(Json(StripeConnectStatusResponse::from(overview)))
}

pub async fn payment_quote_handler(
    State(state): State<AppState>,
    Json(payload): Json<PaymentQuoteRequest>,
) -> ApiResult<Json<PaymentQuoteResponse>> {
    let caller = payload.caller()?;
    let quote = state
        .stripe_connect_service
        .quote_payment_for_caller(&caller, payload.amount_cents)
        .await?;

    Ok(Json(PaymentQuoteResponse::from(quote)))
}
