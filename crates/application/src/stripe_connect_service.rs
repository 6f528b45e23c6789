use std::sync::Arc;

use encore_core::{AppResult, CallerIdentity};
use encore_domain::{ConnectStatusMessage, PaymentRoute, PlatformFee, StripeConnectStatus};
use tracing::info;

use crate::OrganizationRepository;
use crate::organization_ports::find_organization_or_none;

/// Connect onboarding status with its banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeConnectOverview {
    /// Derived onboarding state.
    pub status: StripeConnectStatus,
    /// Banner shown to the tenant.
    pub message: ConnectStatusMessage,
}

/// Routing and fee split for one customer payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentQuote {
    /// Account receiving the funds.
    pub route: PaymentRoute,
    /// Platform fee breakdown. Waived on the platform route.
    pub fee: PlatformFee,
}

/// Application service for Stripe Connect onboarding checks.
#[derive(Clone)]
pub struct StripeConnectService {
    organization_repository: Arc<dyn OrganizationRepository>,
}

impl StripeConnectService {
    /// Creates a new Connect service.
    #[must_use]
    pub fn new(organization_repository: Arc<dyn OrganizationRepository>) -> Self {
        Self {
            organization_repository,
        }
    }

    /// Resolves the caller tenant's Connect onboarding status.
    pub async fn connect_status_for_caller(&self, caller: &CallerIdentity) -> StripeConnectOverview {
        let organization =
            find_organization_or_none(self.organization_repository.as_ref(), caller).await;
        let status = StripeConnectStatus::resolve(organization.as_ref());

        StripeConnectOverview {
            status,
            message: status.message(),
        }
    }

    /// Quotes routing and platform fee for a payment to the caller's tenant.
    pub async fn quote_payment_for_caller(
        &self,
        caller: &CallerIdentity,
        amount_cents: i64,
    ) -> AppResult<PaymentQuote> {
        let organization =
            find_organization_or_none(self.organization_repository.as_ref(), caller).await;
        let route = PaymentRoute::for_organization(organization.as_ref());

        let fee = match (&route, organization.as_ref()) {
            (PaymentRoute::ConnectedAccount { .. }, Some(organization)) => {
                organization.platform_fee().fee_for(amount_cents)?
            }
            _ => {
                info!(
                    subject = %caller.subject(),
                    "payment routed to platform account, payout will be manual"
                );
                PlatformFee::waived(amount_cents)?
            }
        };

        Ok(PaymentQuote { route, fee })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use encore_core::{AppError, AppResult, CallerIdentity, TenantId};
    use encore_domain::{
        ConnectSeverity, Organization, PaymentRoute, PlatformFeeSchedule, SubscriptionTier,
    };

    use super::StripeConnectService;
    use crate::OrganizationRepository;

    struct FakeOrganizationRepository {
        organizations: HashMap<String, Organization>,
        failing: bool,
    }

    #[async_trait]
    impl OrganizationRepository for FakeOrganizationRepository {
        async fn find_organization_for_subject(
            &self,
            subject: &str,
        ) -> AppResult<Option<Organization>> {
            if self.failing {
                return Err(AppError::Internal("statement timeout".to_owned()));
            }

            Ok(self.organizations.get(subject).cloned())
        }
    }

    fn service_with(organization: Option<Organization>, failing: bool) -> StripeConnectService {
        let organizations = organization
            .map(|value| HashMap::from([("dj".to_owned(), value)]))
            .unwrap_or_default();

        StripeConnectService::new(Arc::new(FakeOrganizationRepository {
            organizations,
            failing,
        }))
    }

    fn organization(account_id: Option<&str>, charges: bool, payouts: bool) -> Organization {
        Organization::new(
            TenantId::new(),
            "Crowd Pleasers",
            "crowd-pleasers",
            SubscriptionTier::Professional,
        )
        .with_stripe_connect(account_id.map(str::to_owned), charges, payouts)
    }

    fn caller() -> CallerIdentity {
        CallerIdentity::new("dj", None)
    }

    #[tokio::test]
    async fn partial_onboarding_reports_warning() {
        let service = service_with(Some(organization(Some("acct_1"), true, false)), false);

        let overview = service.connect_status_for_caller(&caller()).await;
        assert!(overview.status.has_account);
        assert!(!overview.status.is_complete);
        assert!(overview.status.requires_setup);
        assert_eq!(overview.message.severity, ConnectSeverity::Warning);
    }

    #[tokio::test]
    async fn failed_lookup_requires_setup() {
        let service = service_with(None, true);

        let overview = service.connect_status_for_caller(&caller()).await;
        assert!(overview.status.requires_setup);
        assert!(!overview.status.has_account);
        assert_eq!(overview.message.severity, ConnectSeverity::Error);
    }

    #[tokio::test]
    async fn completed_tenant_pays_default_fee() {
        let service = service_with(Some(organization(Some("acct_1"), true, true)), false);

        let quote = service.quote_payment_for_caller(&caller(), 1_000).await;
        let Ok(quote) = quote else {
            panic!("quote failed");
        };

        assert_eq!(
            quote.route,
            PaymentRoute::ConnectedAccount {
                account_id: "acct_1".to_owned()
            }
        );
        assert_eq!(quote.fee.fee_cents, 65);
        assert_eq!(quote.fee.payout_cents, 935);
    }

    #[tokio::test]
    async fn tenant_fee_override_is_applied() {
        let schedule = PlatformFeeSchedule::new(500, 0).unwrap_or_else(|_| panic!("test"));
        let tenant = organization(Some("acct_1"), true, true).with_platform_fee(Some(schedule));
        let service = service_with(Some(tenant), false);

        let quote = service.quote_payment_for_caller(&caller(), 2_000).await;
        assert!(matches!(quote, Ok(value) if value.fee.fee_cents == 100));
    }

    #[tokio::test]
    async fn incomplete_tenant_stays_on_platform_account() {
        let service = service_with(Some(organization(Some("acct_1"), false, false)), false);

        let quote = service.quote_payment_for_caller(&caller(), 1_500).await;
        assert!(matches!(
            quote,
            Ok(value) if value.route == PaymentRoute::PlatformAccount
                && value.fee.fee_cents == 0
                && value.fee.payout_cents == 1_500
        ));
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_on_every_route() {
        let platform = service_with(None, false);
        let connected = service_with(Some(organization(Some("acct_1"), true, true)), false);

        assert!(matches!(
            platform.quote_payment_for_caller(&caller(), -5).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            connected.quote_payment_for_caller(&caller(), -5).await,
            Err(AppError::Validation(_))
        ));
    }
}
