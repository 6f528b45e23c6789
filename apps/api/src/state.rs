use encore_application::{StripeConnectService, SubscriptionAccessService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub subscription_access_service: SubscriptionAccessService,
    pub stripe_connect_service: StripeConnectService,
    /// SHA-256 of the internal API bearer token.
    pub internal_api_token_digest: [u8; 32],
}
