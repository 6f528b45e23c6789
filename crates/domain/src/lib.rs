//! Domain entities and entitlement rules.

#![forbid(unsafe_code)]

mod access;
mod email;
mod organization;
mod platform_fee;
mod stripe_connect;
mod subscription;

pub use access::{AccessDecision, AccessTier, AdminPage, FeatureGate, PageAccessDecision};
pub use email::EmailAddress;
pub use organization::Organization;
pub use platform_fee::{
    DEFAULT_PLATFORM_FEE_BASIS_POINTS, DEFAULT_PLATFORM_FEE_FIXED_CENTS, PlatformFee,
    PlatformFeeSchedule,
};
pub use stripe_connect::{ConnectSeverity, ConnectStatusMessage, PaymentRoute, StripeConnectStatus};
pub use subscription::{FREE_MONTHLY_REQUEST_LIMIT, FeatureKey, RequestQuota, SubscriptionTier};
