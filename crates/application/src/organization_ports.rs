use async_trait::async_trait;
use encore_core::{AppResult, CallerIdentity};
use encore_domain::Organization;
use tracing::warn;

/// Repository port for tenant organization lookups.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Finds the organization the subject belongs to.
    async fn find_organization_for_subject(&self, subject: &str)
    -> AppResult<Option<Organization>>;
}

/// Directory of identities with platform-wide override access.
pub trait PlatformAdminDirectory: Send + Sync {
    /// Returns whether the caller is a platform administrator.
    fn is_platform_admin(&self, caller: &CallerIdentity) -> bool;
}

/// Looks up the caller's organization, treating a failed read as no tenant.
pub(crate) async fn find_organization_or_none(
    repository: &dyn OrganizationRepository,
    caller: &CallerIdentity,
) -> Option<Organization> {
    match repository
        .find_organization_for_subject(caller.subject())
        .await
    {
        Ok(organization) => organization,
        Err(error) => {
            warn!(
                subject = %caller.subject(),
                error = %error,
                "organization lookup failed, treating caller as tenantless"
            );
            None
        }
    }
}
