//! Stripe Connect onboarding state and payment routing.

use serde::{Deserialize, Serialize};

use crate::Organization;

/// Connect onboarding state derived from a tenant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeConnectStatus {
    /// Whether the tenant still has to finish onboarding.
    pub requires_setup: bool,
    /// Whether a connected account id is stored.
    pub has_account: bool,
    /// Whether Stripe reports charges as enabled.
    pub charges_enabled: bool,
    /// Whether Stripe reports payouts as enabled.
    pub payouts_enabled: bool,
    /// Account present with charges and payouts enabled.
    pub is_complete: bool,
    /// Whether the tenant is the platform operator.
    pub is_platform_owner: bool,
}

impl StripeConnectStatus {
    /// Derives the onboarding state. A missing tenant requires setup.
    #[must_use]
    pub fn resolve(organization: Option<&Organization>) -> Self {
        let Some(organization) = organization else {
            return Self {
                requires_setup: true,
                has_account: false,
                charges_enabled: false,
                payouts_enabled: false,
                is_complete: false,
                is_platform_owner: false,
            };
        };

        let has_account = organization
            .stripe_account_id()
            .is_some_and(|account_id| !account_id.trim().is_empty());
        let charges_enabled = organization.charges_enabled();
        let payouts_enabled = organization.payouts_enabled();
        let is_complete = has_account && charges_enabled && payouts_enabled;
        let is_platform_owner = organization.is_platform_owner();

        Self {
            requires_setup: !is_platform_owner && !is_complete,
            has_account,
            charges_enabled,
            payouts_enabled,
            is_complete,
            is_platform_owner,
        }
    }

    /// Severity and text shown on the onboarding banner.
    #[must_use]
    pub fn message(&self) -> ConnectStatusMessage {
        if self.is_platform_owner {
            return ConnectStatusMessage::new(
                ConnectSeverity::Info,
                "Platform account: Stripe Connect setup is not required.",
            );
        }

        if self.is_complete {
            return ConnectStatusMessage::new(
                ConnectSeverity::Info,
                "Stripe Connect is fully set up. Payments and payouts are enabled.",
            );
        }

        if !self.has_account {
            return ConnectStatusMessage::new(
                ConnectSeverity::Error,
                "Stripe Connect is not set up. Connect a Stripe account to accept payments.",
            );
        }

        let missing = match (self.charges_enabled, self.payouts_enabled) {
            (false, false) => "charges and payouts are",
            (false, true) => "charges are",
            _ => "payouts are",
        };

        ConnectStatusMessage::new(
            ConnectSeverity::Warning,
            format!("Stripe Connect onboarding is incomplete: {missing} not enabled yet."),
        )
    }
}

/// Severity of a Connect status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectSeverity {
    /// Nothing to do.
    Info,
    /// Onboarding started but unfinished.
    Warning,
    /// No connected account.
    Error,
}

impl ConnectSeverity {
    /// Returns the transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Banner shown for a Connect status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectStatusMessage {
    /// Severity of the banner.
    pub severity: ConnectSeverity,
    /// Human-readable text.
    pub message: String,
}

impl ConnectStatusMessage {
    fn new(severity: ConnectSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Account that receives a tenant's customer payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentRoute {
    /// Funds go to the tenant's connected account minus the platform fee.
    ConnectedAccount {
        /// Stripe connected account id.
        account_id: String,
    },
    /// Funds stay on the platform account and payouts are manual.
    PlatformAccount,
}

impl PaymentRoute {
    /// Chooses the route for a tenant.
    ///
    /// Only completed onboarding routes to the connected account. Platform
    /// owners always collect on the platform account.
    #[must_use]
    pub fn for_organization(organization: Option<&Organization>) -> Self {
        let Some(organization) = organization else {
            return Self::PlatformAccount;
        };

        if organization.is_platform_owner() {
            return Self::PlatformAccount;
        }

        let status = StripeConnectStatus::resolve(Some(organization));
        match organization.stripe_account_id() {
            Some(account_id) if status.is_complete => Self::ConnectedAccount {
                account_id: account_id.trim().to_owned(),
            },
            _ => Self::PlatformAccount,
        }
    }
}
