use std::sync::Arc;

use encore_application::{
    OrganizationRepository, PlatformAdminDirectory, StripeConnectService,
    SubscriptionAccessService,
};
use encore_infrastructure::{AllowListPlatformAdminDirectory, PostgresOrganizationRepository};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::api_config::ApiConfig;
use crate::middleware::internal_token_digest;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let admin_directory =
        AllowListPlatformAdminDirectory::new(config.platform_admin_emails.iter().cloned());
    if admin_directory.is_empty() {
        warn!("PLATFORM_ADMIN_EMAILS is empty, no platform administrators configured");
    } else {
        info!(count = admin_directory.len(), "platform administrators configured");
    }

    let organization_repository: Arc<dyn OrganizationRepository> =
        Arc::new(PostgresOrganizationRepository::new(pool));
    let admin_directory: Arc<dyn PlatformAdminDirectory> = Arc::new(admin_directory);

    AppState {
        subscription_access_service: SubscriptionAccessService::new(
            organization_repository.clone(),
            admin_directory,
        ),
        stripe_connect_service: StripeConnectService::new(organization_repository),
        internal_api_token_digest: internal_token_digest(config.internal_api_token.as_str()),
    }
}
