use std::sync::Arc;

use encore_core::{AppError, AppResult, CallerIdentity};
use encore_domain::{
    AccessDecision, AdminPage, FeatureGate, FeatureKey, PageAccessDecision, RequestQuota,
    SubscriptionTier,
};
use tracing::debug;

use crate::organization_ports::find_organization_or_none;
use crate::{OrganizationRepository, PlatformAdminDirectory};

/// Application service resolving tier-gated feature and page access.
///
/// Every resolution performs at most one organization lookup. A failed
/// lookup is handled like a caller without a tenant, so checks fail closed
/// instead of surfacing transport errors.
#[derive(Clone)]
pub struct SubscriptionAccessService {
    organization_repository: Arc<dyn OrganizationRepository>,
    platform_admins: Arc<dyn PlatformAdminDirectory>,
}

impl SubscriptionAccessService {
    /// Creates a new access service from its ports.
    #[must_use]
    pub fn new(
        organization_repository: Arc<dyn OrganizationRepository>,
        platform_admins: Arc<dyn PlatformAdminDirectory>,
    ) -> Self {
        Self {
            organization_repository,
            platform_admins,
        }
    }

    /// Resolves access to a feature for the caller.
    pub async fn check_feature_access(
        &self,
        caller: &CallerIdentity,
        feature: FeatureKey,
    ) -> AccessDecision {
        self.resolve(caller, FeatureGate::Known(feature)).await
    }

    /// Resolves access to a feature given by name. Unknown names are denied
    /// unless the caller bypasses the tier table.
    pub async fn check_named_feature_access(
        &self,
        caller: &CallerIdentity,
        feature_name: &str,
    ) -> AccessDecision {
        let gate = FeatureGate::from_name(feature_name);
        if gate == FeatureGate::Unrecognized {
            debug!(feature = %feature_name, "access check for unrecognized feature");
        }

        self.resolve(caller, gate).await
    }

    /// Ensures the caller may use the feature.
    pub async fn require_feature_access(
        &self,
        caller: &CallerIdentity,
        feature: FeatureKey,
    ) -> AppResult<()> {
        let decision = self.check_feature_access(caller, feature).await;
        if decision.has_access {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{}' needs the {} plan or higher to use '{}'",
            caller.subject(),
            decision.required_tier.display_name(),
            feature.as_str()
        )))
    }

    /// Lists every feature the caller may use with a single lookup.
    pub async fn accessible_features(&self, caller: &CallerIdentity) -> Vec<FeatureKey> {
        if self.platform_admins.is_platform_admin(caller) {
            return FeatureKey::all().to_vec();
        }

        let Some(organization) =
            find_organization_or_none(self.organization_repository.as_ref(), caller).await
        else {
            return Vec::new();
        };

        FeatureKey::all()
            .iter()
            .copied()
            .filter(|feature| {
                AccessDecision::for_organization(&organization, FeatureGate::Known(*feature))
                    .has_access
            })
            .collect()
    }

    /// Resolves whether an admin page may be shown to the caller.
    ///
    /// Pages outside the page table are gated like the CRM.
    pub async fn check_page_access(
        &self,
        caller: &CallerIdentity,
        page: &str,
    ) -> PageAccessDecision {
        let feature = AdminPage::feature_for_name(page);
        let decision = self.check_feature_access(caller, feature).await;

        PageAccessDecision::from_feature_decision(page, feature, decision)
    }

    /// Returns the monthly crowd request allowance for the caller.
    pub async fn request_quota_for_caller(&self, caller: &CallerIdentity) -> RequestQuota {
        if self.platform_admins.is_platform_admin(caller) {
            return RequestQuota::unlimited();
        }

        match find_organization_or_none(self.organization_repository.as_ref(), caller).await {
            Some(organization) if organization.is_platform_owner() => RequestQuota::unlimited(),
            Some(organization) => RequestQuota::for_tier(organization.subscription_tier()),
            None => RequestQuota::for_tier(SubscriptionTier::Free),
        }
    }

    async fn resolve(&self, caller: &CallerIdentity, gate: FeatureGate) -> AccessDecision {
        if self.platform_admins.is_platform_admin(caller) {
            return AccessDecision::platform_admin(gate);
        }

        match find_organization_or_none(self.organization_repository.as_ref(), caller).await {
            Some(organization) => AccessDecision::for_organization(&organization, gate),
            None => AccessDecision::without_tenant(),
        }
    }
}
