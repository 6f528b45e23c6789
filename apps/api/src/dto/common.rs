use encore_core::{AppResult, CallerIdentity, NonEmptyString};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Caller forwarded by the web tier.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/caller-request.ts"
)]
pub struct CallerRequest {
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl CallerRequest {
    pub fn into_identity(self) -> AppResult<CallerIdentity> {
        caller_identity(self.subject, self.email)
    }
}

/// Builds a caller identity, rejecting blank subjects.
pub(crate) fn caller_identity(subject: String, email: Option<String>) -> AppResult<CallerIdentity> {
    let subject = NonEmptyString::new(subject)?;
    let email = email.filter(|value| !value.trim().is_empty());

    Ok(CallerIdentity::new(subject, email))
}
