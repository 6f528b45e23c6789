use encore_core::{AppResult, CallerIdentity};
use encore_domain::{AccessDecision, FeatureKey, PageAccessDecision, RequestQuota};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::caller_identity;

/// Feature entitlement check for one caller.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/feature-access-request.ts"
)]
pub struct FeatureAccessRequest {
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
    pub feature: String,
}

impl FeatureAccessRequest {
    pub fn caller(&self) -> AppResult<CallerIdentity> {
        caller_identity(self.subject.clone(), self.email.clone())
    }
}

/// API representation of a feature entitlement decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-decision-response.ts"
)]
pub struct AccessDecisionResponse {
    pub has_access: bool,
    pub required_tier: String,
    pub current_tier: Option<String>,
}

impl From<AccessDecision> for AccessDecisionResponse {
    fn from(value: AccessDecision) -> Self {
        Self {
            has_access: value.has_access,
            required_tier: value.required_tier.as_str().to_owned(),
            current_tier: value.current_tier.map(|tier| tier.as_str().to_owned()),
        }
    }
}

/// Query string for the accessible feature listing.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/accessible-features-query.ts"
)]
pub struct AccessibleFeaturesQuery {
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl AccessibleFeaturesQuery {
    pub fn into_identity(self) -> AppResult<CallerIdentity> {
        caller_identity(self.subject, self.email)
    }
}

/// Features the caller may use.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/accessible-features-response.ts"
)]
pub struct AccessibleFeaturesResponse {
    pub features: Vec<String>,
}

impl From<Vec<FeatureKey>> for AccessibleFeaturesResponse {
    fn from(value: Vec<FeatureKey>) -> Self {
        Self {
            features: value
                .into_iter()
                .map(|feature| feature.as_str().to_owned())
                .collect(),
        }
    }
}

/// Admin page visibility check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/page-access-request.ts"
)]
pub struct PageAccessRequest {
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
    pub page: String,
}

impl PageAccessRequest {
    pub fn caller(&self) -> AppResult<CallerIdentity> {
        caller_identity(self.subject.clone(), self.email.clone())
    }
}

/// API representation of a page visibility decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/page-access-response.ts"
)]
pub struct PageAccessResponse {
    pub page: String,
    pub feature: String,
    pub has_access: bool,
    pub required_tier: String,
    pub current_tier: Option<String>,
    pub reason: Option<String>,
}

impl From<PageAccessDecision> for PageAccessResponse {
    fn from(value: PageAccessDecision) -> Self {
        Self {
            page: value.page,
            feature: value.feature.as_str().to_owned(),
            has_access: value.has_access,
            required_tier: value.required_tier.as_str().to_owned(),
            current_tier: value.current_tier.map(|tier| tier.as_str().to_owned()),
            reason: value.reason,
        }
    }
}

/// Monthly booking request quota check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/request-quota-request.ts"
)]
pub struct RequestQuotaRequest {
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub used_this_month: u32,
}

impl RequestQuotaRequest {
    pub fn caller(&self) -> AppResult<CallerIdentity> {
        caller_identity(self.subject.clone(), self.email.clone())
    }
}

/// Quota state for the caller's tenant. Absent limits mean unlimited.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/request-quota-response.ts"
)]
pub struct RequestQuotaResponse {
    pub monthly_limit: Option<u32>,
    pub remaining: Option<u32>,
    pub allows_another: bool,
}

impl RequestQuotaResponse {
    #[must_use]
    pub fn from_quota(quota: RequestQuota, used_this_month: u32) -> Self {
        Self {
            monthly_limit: quota.monthly_limit(),
            remaining: quota.remaining(used_this_month),
            allows_another: quota.allows_another(used_this_month),
        }
    }
}
