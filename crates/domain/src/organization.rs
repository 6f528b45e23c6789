use encore_core::TenantId;
use serde::{Deserialize, Serialize};

use crate::{PlatformFeeSchedule, SubscriptionTier};

/// Tenant organization as read from the persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    id: TenantId,
    name: String,
    slug: String,
    subscription_tier: SubscriptionTier,
    is_platform_owner: bool,
    stripe_account_id: Option<String>,
    charges_enabled: bool,
    payouts_enabled: bool,
    platform_fee: Option<PlatformFeeSchedule>,
}

impl Organization {
    /// Creates an organization without Connect onboarding or fee override.
    #[must_use]
    pub fn new(
        id: TenantId,
        name: impl Into<String>,
        slug: impl Into<String>,
        subscription_tier: SubscriptionTier,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            subscription_tier,
            is_platform_owner: false,
            stripe_account_id: None,
            charges_enabled: false,
            payouts_enabled: false,
            platform_fee: None,
        }
    }

    /// Marks the organization as the platform operator.
    #[must_use]
    pub fn with_platform_owner(mut self, is_platform_owner: bool) -> Self {
        self.is_platform_owner = is_platform_owner;
        self
    }

    /// Sets the Stripe Connect onboarding flags.
    #[must_use]
    pub fn with_stripe_connect(
        mut self,
        account_id: Option<String>,
        charges_enabled: bool,
        payouts_enabled: bool,
    ) -> Self {
        self.stripe_account_id = account_id;
        self.charges_enabled = charges_enabled;
        self.payouts_enabled = payouts_enabled;
        self
    }

    /// Overrides the default platform fee for this organization.
    #[must_use]
    pub fn with_platform_fee(mut self, platform_fee: Option<PlatformFeeSchedule>) -> Self {
        self.platform_fee = platform_fee;
        self
    }

    /// Returns the organization id.
    #[must_use]
    pub fn id(&self) -> TenantId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the URL slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    /// Returns the subscription tier.
    #[must_use]
    pub fn subscription_tier(&self) -> SubscriptionTier {
        self.subscription_tier
    }

    /// Returns whether this is the platform operator's organization.
    #[must_use]
    pub fn is_platform_owner(&self) -> bool {
        self.is_platform_owner
    }

    /// Returns the connected Stripe account id, if one was stored.
    #[must_use]
    pub fn stripe_account_id(&self) -> Option<&str> {
        self.stripe_account_id.as_deref()
    }

    /// Returns whether Stripe reports charges as enabled.
    #[must_use]
    pub fn charges_enabled(&self) -> bool {
        self.charges_enabled
    }

    /// Returns whether Stripe reports payouts as enabled.
    #[must_use]
    pub fn payouts_enabled(&self) -> bool {
        self.payouts_enabled
    }

    /// Fee schedule charged on this organization's payments.
    #[must_use]
    pub fn platform_fee(&self) -> PlatformFeeSchedule {
        self.platform_fee.unwrap_or_default()
    }
}
