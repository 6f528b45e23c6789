use async_trait::async_trait;
use encore_application::OrganizationRepository;
use encore_core::{AppError, AppResult, TenantId};
use encore_domain::{
    DEFAULT_PLATFORM_FEE_BASIS_POINTS, DEFAULT_PLATFORM_FEE_FIXED_CENTS, Organization,
    PlatformFeeSchedule, SubscriptionTier,
};
use sqlx::{FromRow, PgPool};
use tracing::debug;

/// PostgreSQL-backed organization lookups.
#[derive(Clone)]
pub struct PostgresOrganizationRepository {
    pool: PgPool,
}

impl PostgresOrganizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OrganizationRow {
    id: uuid::Uuid,
    name: String,
    slug: String,
    subscription_tier: String,
    is_platform_owner: bool,
    stripe_connect_account_id: Option<String>,
    stripe_connect_charges_enabled: bool,
    stripe_connect_payouts_enabled: bool,
    platform_fee_basis_points: Option<i32>,
    platform_fee_fixed_cents: Option<i64>,
}

impl OrganizationRow {
    fn into_organization(self) -> AppResult<Organization> {
        let tier = SubscriptionTier::parse(self.subscription_tier.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode subscription tier for organization '{}': {error}",
                self.id
            ))
        })?;
        let platform_fee = self.platform_fee_override()?;

        Ok(
            Organization::new(TenantId::from_uuid(self.id), self.name, self.slug, tier)
                .with_platform_owner(self.is_platform_owner)
                .with_stripe_connect(
                    self.stripe_connect_account_id,
                    self.stripe_connect_charges_enabled,
                    self.stripe_connect_payouts_enabled,
                )
                .with_platform_fee(platform_fee),
        )
    }

    // A single overridden column keeps the default for the other one.
    fn platform_fee_override(&self) -> AppResult<Option<PlatformFeeSchedule>> {
        if self.platform_fee_basis_points.is_none() && self.platform_fee_fixed_cents.is_none() {
            return Ok(None);
        }

        let basis_points = match self.platform_fee_basis_points {
            Some(value) => u32::try_from(value).map_err(|error| {
                AppError::Internal(format!(
                    "invalid platform fee percentage for organization '{}': {error}",
                    self.id
                ))
            })?,
            None => DEFAULT_PLATFORM_FEE_BASIS_POINTS,
        };
        let fixed_cents = self
            .platform_fee_fixed_cents
            .unwrap_or(DEFAULT_PLATFORM_FEE_FIXED_CENTS);

        PlatformFeeSchedule::new(basis_points, fixed_cents)
            .map(Some)
            .map_err(|error| {
                AppError::Internal(format!(
                    "invalid platform fee for organization '{}': {error}",
                    self.id
                ))
            })
    }
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
    async fn find_organization_for_subject(
        &self,
        subject: &str,
    ) -> AppResult<Option<Organization>> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT
                organizations.id,
                organizations.name,
                organizations.slug,
                organizations.subscription_tier,
                organizations.is_platform_owner,
                organizations.stripe_connect_account_id,
                organizations.stripe_connect_charges_enabled,
                organizations.stripe_connect_payouts_enabled,
                ROUND(organizations.platform_fee_percentage * 100)::INT4 AS platform_fee_basis_points,
                ROUND(organizations.platform_fee_fixed * 100)::INT8 AS platform_fee_fixed_cents
            FROM organizations
            LEFT JOIN organization_members AS members
                ON members.organization_id = organizations.id
                AND members.user_id = $1
            WHERE organizations.owner_id = $1
                OR members.user_id IS NOT NULL
            ORDER BY
                (organizations.owner_id = $1) DESC,
                COALESCE(members.created_at, organizations.created_at) ASC
            LIMIT 1
            "#,
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to resolve organization for subject '{subject}': {error}"
            ))
        })?;

        let Some(row) = row else {
            debug!(subject = %subject, "no organization found for subject");
            return Ok(None);
        };

        row.into_organization().map(Some)
    }
}

#[cfg(test)]
mod tests;
