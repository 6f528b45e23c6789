//! Subscription tiers and the feature entitlement table.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use encore_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Subscription level of a tenant organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    /// Free plan. Older billing rows store it as `starter`.
    #[serde(alias = "starter")]
    Free,
    /// Paid plan unlocking the business tools.
    Professional,
    /// Paid plan adding team management.
    Enterprise,
    /// Reseller plan with every feature.
    WhiteLabel,
}

impl SubscriptionTier {
    /// Lowest tier that unlocks any gated feature.
    pub const LOWEST_GATED: Self = Self::Professional;

    /// Returns the storage string for this tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
            Self::WhiteLabel => "white_label",
        }
    }

    /// Returns the plan name shown to tenants.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Professional => "Professional",
            Self::Enterprise => "Enterprise",
            Self::WhiteLabel => "White Label",
        }
    }

    /// Returns all tiers from lowest to highest.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[SubscriptionTier] = &[
            SubscriptionTier::Free,
            SubscriptionTier::Professional,
            SubscriptionTier::Enterprise,
            SubscriptionTier::WhiteLabel,
        ];

        ALL
    }

    /// Parses a storage string into a tier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl FromStr for SubscriptionTier {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "free" | "starter" => Ok(Self::Free),
            "professional" => Ok(Self::Professional),
            "enterprise" => Ok(Self::Enterprise),
            "white_label" => Ok(Self::WhiteLabel),
            _ => Err(AppError::Validation(format!(
                "unknown subscription tier '{value}'"
            ))),
        }
    }
}

impl Display for SubscriptionTier {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

const BUSINESS_TIERS: &[SubscriptionTier] = &[
    SubscriptionTier::Professional,
    SubscriptionTier::Enterprise,
    SubscriptionTier::WhiteLabel,
];

const TEAM_TIERS: &[SubscriptionTier] = &[SubscriptionTier::Enterprise, SubscriptionTier::WhiteLabel];

/// Admin features gated by subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKey {
    /// Contacts and lead management.
    Crm,
    /// Event projects.
    Projects,
    /// Invoicing.
    Invoices,
    /// Financial reports.
    Financial,
    /// Analytics dashboards.
    Analytics,
    /// Team member management.
    Team,
    /// Custom branding and domains.
    WhiteLabel,
}

impl FeatureKey {
    /// Returns the stable transport value for this feature.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crm => "crm",
            Self::Projects => "projects",
            Self::Invoices => "invoices",
            Self::Financial => "financial",
            Self::Analytics => "analytics",
            Self::Team => "team",
            Self::WhiteLabel => "white_label",
        }
    }

    /// Returns all known features.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[FeatureKey] = &[
            FeatureKey::Crm,
            FeatureKey::Projects,
            FeatureKey::Invoices,
            FeatureKey::Financial,
            FeatureKey::Analytics,
            FeatureKey::Team,
            FeatureKey::WhiteLabel,
        ];

        ALL
    }

    /// Tiers whose subscription unlocks this feature.
    #[must_use]
    pub fn qualifying_tiers(&self) -> &'static [SubscriptionTier] {
        match self {
            Self::Crm | Self::Projects | Self::Invoices | Self::Financial | Self::Analytics => {
                BUSINESS_TIERS
            }
            Self::Team | Self::WhiteLabel => TEAM_TIERS,
        }
    }

    /// Lowest tier that unlocks this feature.
    #[must_use]
    pub fn minimum_tier(&self) -> SubscriptionTier {
        // Tier lists are ordered lowest first.
        self.qualifying_tiers()
            .first()
            .copied()
            .unwrap_or(SubscriptionTier::WhiteLabel)
    }

    /// Returns whether the tier unlocks this feature.
    #[must_use]
    pub fn is_unlocked_by(&self, tier: SubscriptionTier) -> bool {
        self.qualifying_tiers().contains(&tier)
    }

    /// Parses a transport value into a feature.
    pub fn from_transport(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl FromStr for FeatureKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "crm" => Ok(Self::Crm),
            "projects" => Ok(Self::Projects),
            "invoices" => Ok(Self::Invoices),
            "financial" => Ok(Self::Financial),
            "analytics" => Ok(Self::Analytics),
            "team" => Ok(Self::Team),
            "white_label" => Ok(Self::WhiteLabel),
            _ => Err(AppError::Validation(format!("unknown feature '{value}'"))),
        }
    }
}

impl Display for FeatureKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Free-plan allowance of crowd song requests per calendar month.
pub const FREE_MONTHLY_REQUEST_LIMIT: u32 = 10;

/// Monthly crowd request allowance derived from a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestQuota {
    monthly_limit: Option<u32>,
}

impl RequestQuota {
    /// Returns the quota for a tier. Paid tiers are unlimited.
    #[must_use]
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        let monthly_limit = match tier {
            SubscriptionTier::Free => Some(FREE_MONTHLY_REQUEST_LIMIT),
            SubscriptionTier::Professional
            | SubscriptionTier::Enterprise
            | SubscriptionTier::WhiteLabel => None,
        };

        Self { monthly_limit }
    }

    /// Quota without a monthly cap.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            monthly_limit: None,
        }
    }

    /// Monthly limit, `None` when unlimited.
    #[must_use]
    pub fn monthly_limit(&self) -> Option<u32> {
        self.monthly_limit
    }

    /// Requests still available this month, `None` when unlimited.
    #[must_use]
    pub fn remaining(&self, used_this_month: u32) -> Option<u32> {
        self.monthly_limit
            .map(|limit| limit.saturating_sub(used_this_month))
    }

    /// Returns whether one more request fits in the allowance.
    #[must_use]
    pub fn allows_another(&self, used_this_month: u32) -> bool {
        self.remaining(used_this_month)
            .is_none_or(|remaining| remaining > 0)
    }
}
