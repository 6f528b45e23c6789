//! Access decisions for features and admin pages.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use encore_core::AppError;
use serde::{Deserialize, Serialize};

use crate::{FeatureKey, Organization, SubscriptionTier};

/// Tier label reported with an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    /// Free plan.
    Free,
    /// Professional plan.
    Professional,
    /// Enterprise plan.
    Enterprise,
    /// White label plan.
    WhiteLabel,
    /// Platform administrator override, independent of any tenant.
    PlatformAdmin,
}

impl AccessTier {
    /// Returns the transport value for this label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
            Self::WhiteLabel => "white_label",
            Self::PlatformAdmin => "platform_admin",
        }
    }
}

impl From<SubscriptionTier> for AccessTier {
    fn from(value: SubscriptionTier) -> Self {
        match value {
            SubscriptionTier::Free => Self::Free,
            SubscriptionTier::Professional => Self::Professional,
            SubscriptionTier::Enterprise => Self::Enterprise,
            SubscriptionTier::WhiteLabel => Self::WhiteLabel,
        }
    }
}

impl Display for AccessTier {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Feature requested by name, which may fall outside the entitlement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureGate {
    /// A feature listed in the entitlement table.
    Known(FeatureKey),
    /// A name no tier unlocks.
    Unrecognized,
}

impl FeatureGate {
    /// Maps a transport name onto the entitlement table.
    #[must_use]
    pub fn from_name(value: &str) -> Self {
        FeatureKey::from_str(value).map_or(Self::Unrecognized, Self::Known)
    }

    /// Tiers that unlock this gate. Empty for unrecognized names.
    #[must_use]
    pub fn qualifying_tiers(&self) -> &'static [SubscriptionTier] {
        match self {
            Self::Known(feature) => feature.qualifying_tiers(),
            Self::Unrecognized => &[],
        }
    }

    /// Tier reported as required. Unrecognized names report the top tier.
    #[must_use]
    pub fn required_tier(&self) -> SubscriptionTier {
        match self {
            Self::Known(feature) => feature.minimum_tier(),
            Self::Unrecognized => SubscriptionTier::WhiteLabel,
        }
    }
}

impl From<FeatureKey> for FeatureGate {
    fn from(value: FeatureKey) -> Self {
        Self::Known(value)
    }
}

/// Outcome of a feature entitlement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether the caller may use the feature.
    pub has_access: bool,
    /// Lowest tier that unlocks the feature.
    pub required_tier: SubscriptionTier,
    /// Tier the caller resolved to, absent when no tenant was found.
    pub current_tier: Option<AccessTier>,
}

impl AccessDecision {
    /// Platform administrators bypass the tier table.
    #[must_use]
    pub fn platform_admin(gate: FeatureGate) -> Self {
        Self {
            has_access: true,
            required_tier: gate.required_tier(),
            current_tier: Some(AccessTier::PlatformAdmin),
        }
    }

    /// Callers without a tenant are denied and pointed at the lowest paid tier.
    #[must_use]
    pub fn without_tenant() -> Self {
        Self {
            has_access: false,
            required_tier: SubscriptionTier::LOWEST_GATED,
            current_tier: None,
        }
    }

    /// Evaluates the gate against a resolved tenant.
    ///
    /// Platform owner tenants are granted everything. Other tenants need a
    /// tier listed for the gate; unrecognized gates are always denied.
    #[must_use]
    pub fn for_organization(organization: &Organization, gate: FeatureGate) -> Self {
        let tier = organization.subscription_tier();
        let has_access =
            organization.is_platform_owner() || gate.qualifying_tiers().contains(&tier);

        Self {
            has_access,
            required_tier: gate.required_tier(),
            current_tier: Some(AccessTier::from(tier)),
        }
    }
}

/// Admin pages whose visibility depends on the tenant plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminPage {
    /// Contact list.
    Contacts,
    /// Event projects.
    Projects,
    /// Invoices.
    Invoices,
    /// Financial overview.
    Financial,
    /// Analytics.
    Analytics,
    /// Team members.
    Team,
    /// Organization settings.
    Settings,
}

impl AdminPage {
    /// Returns the stable page identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Projects => "projects",
            Self::Invoices => "invoices",
            Self::Financial => "financial",
            Self::Analytics => "analytics",
            Self::Team => "team",
            Self::Settings => "settings",
        }
    }

    /// Returns all known pages.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AdminPage] = &[
            AdminPage::Contacts,
            AdminPage::Projects,
            AdminPage::Invoices,
            AdminPage::Financial,
            AdminPage::Analytics,
            AdminPage::Team,
            AdminPage::Settings,
        ];

        ALL
    }

    /// Feature that gates this page. Settings shares the CRM gate.
    #[must_use]
    pub fn feature(&self) -> FeatureKey {
        match self {
            Self::Contacts | Self::Settings => FeatureKey::Crm,
            Self::Projects => FeatureKey::Projects,
            Self::Invoices => FeatureKey::Invoices,
            Self::Financial => FeatureKey::Financial,
            Self::Analytics => FeatureKey::Analytics,
            Self::Team => FeatureKey::Team,
        }
    }

    /// Feature gating a page given by name. Unmapped pages fall back to CRM.
    #[must_use]
    pub fn feature_for_name(value: &str) -> FeatureKey {
        Self::from_str(value).map_or(FeatureKey::Crm, |page| page.feature())
    }
}

impl FromStr for AdminPage {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "contacts" => Ok(Self::Contacts),
            "projects" => Ok(Self::Projects),
            "invoices" => Ok(Self::Invoices),
            "financial" => Ok(Self::Financial),
            "analytics" => Ok(Self::Analytics),
            "team" => Ok(Self::Team),
            "settings" => Ok(Self::Settings),
            _ => Err(AppError::Validation(format!("unknown admin page '{value}'"))),
        }
    }
}

/// Outcome of an admin page visibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAccessDecision {
    /// Page identifier as requested.
    pub page: String,
    /// Feature that gated the page.
    pub feature: FeatureKey,
    /// Whether the page may be shown.
    pub has_access: bool,
    /// Lowest tier that unlocks the page.
    pub required_tier: SubscriptionTier,
    /// Tier the caller resolved to, absent when no tenant was found.
    pub current_tier: Option<AccessTier>,
    /// Human-readable denial reason, present only when access is denied.
    pub reason: Option<String>,
}

impl PageAccessDecision {
    /// Wraps a feature decision with the page context and denial reason.
    #[must_use]
    pub fn from_feature_decision(
        page: impl Into<String>,
        feature: FeatureKey,
        decision: AccessDecision,
    ) -> Self {
        let page = page.into();
        let reason = (!decision.has_access).then(|| {
            format!(
                "The {page} page requires the {} plan or higher.",
                decision.required_tier.display_name()
            )
        });

        Self {
            page,
            feature,
            has_access: decision.has_access,
            required_tier: decision.required_tier,
            current_tier: decision.current_tier,
            reason,
        }
    }
}
