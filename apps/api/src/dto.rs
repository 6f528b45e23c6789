mod access;
mod common;
mod stripe_connect;

pub use access::{
    AccessDecisionResponse, AccessibleFeaturesQuery, AccessibleFeaturesResponse,
    FeatureAccessRequest, PageAccessRequest, PageAccessResponse, RequestQuotaRequest,
    RequestQuotaResponse,
};
pub use common::{CallerRequest, HealthResponse};
pub use stripe_connect::{PaymentQuoteRequest, PaymentQuoteResponse, StripeConnectStatusResponse};
