//! Application services and ports.

#![forbid(unsafe_code)]

mod organization_ports;
mod stripe_connect_service;
mod subscription_access_service;

pub use organization_ports::{OrganizationRepository, PlatformAdminDirectory};
pub use stripe_connect_service::{PaymentQuote, StripeConnectOverview, StripeConnectService};
pub use subscription_access_service::SubscriptionAccessService;
