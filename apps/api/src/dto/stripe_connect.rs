use encore_application::{PaymentQuote, StripeConnectOverview};
use encore_core::{AppResult, CallerIdentity};
use encore_domain::PaymentRoute;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::caller_identity;

/// API representation of the Connect onboarding status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/stripe-connect-status-response.ts"
)]
pub struct StripeConnectStatusResponse {
    pub requires_setup: bool,
    pub has_account: bool,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub is_complete: bool,
    pub is_platform_owner: bool,
    pub severity: String,
    pub message: String,
}

impl From<StripeConnectOverview> for StripeConnectStatusResponse {
    fn from(value: StripeConnectOverview) -> Self {
        let status = value.status;
        Self {
            requires_setup: status.requires_setup,
            has_account: status.has_account,
            charges_enabled: status.charges_enabled,
            payouts_enabled: status.payouts_enabled,
            is_complete: status.is_complete,
            is_platform_owner: status.is_platform_owner,
            severity: value.message.severity.as_str().to_owned(),
            message: value.message.message,
        }
    }
}

/// Payment quote request for the caller's tenant.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/payment-quote-request.ts"
)]
pub struct PaymentQuoteRequest {
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
    pub amount_cents: i64,
}

impl PaymentQuoteRequest {
    pub fn caller(&self) -> AppResult<CallerIdentity> {
        caller_identity(self.subject.clone(), self.email.clone())
    }
}

/// Routing and fee split for a payment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/payment-quote-response.ts"
)]
pub struct PaymentQuoteResponse {
    /// Either `connected_account` or `platform_account`.
    pub route: String,
    pub connected_account_id: Option<String>,
    pub amount_cents: i64,
    pub fee_cents: i64,
    pub payout_cents: i64,
    pub percentage_basis_points: u32,
    pub fixed_cents: i64,
}

impl From<PaymentQuote> for PaymentQuoteResponse {
    fn from(value: PaymentQuote) -> Self {
        let (route, connected_account_id) = match value.route {
            PaymentRoute::ConnectedAccount { account_id } => {
                ("connected_account", Some(account_id))
            }
            PaymentRoute::PlatformAccount => ("platform_account", None),
        };

        Self {
            route: route.to_owned(),
            connected_account_id,
            amount_cents: value.fee.amount_cents,
            fee_cents: value.fee.fee_cents,
            payout_cents: value.fee.payout_cents,
            percentage_basis_points: value.fee.percentage_basis_points,
            fixed_cents: value.fee.fixed_cents,
        }
    }
}
