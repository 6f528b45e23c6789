use encore_application::OrganizationRepository;
use encore_domain::SubscriptionTier;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::PostgresOrganizationRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres organization tests: {error}");
    }

    Some(pool)
}

async fn insert_organization(pool: &PgPool, owner_id: &str, tier: &str) -> Uuid {
    let id = Uuid::new_v4();
    let insert = sqlx::query(
        r#"
            INSERT INTO organizations (id, name, slug, owner_id, subscription_tier)
            VALUES ($1, $2, $3, $4, $5)
            "#,
    )
    .bind(id)
    .bind("Test Sound Co")
    .bind(format!("test-sound-{id}"))
    .bind(owner_id)
    .bind(tier)
    .execute(pool)
    .await;

    assert!(insert.is_ok());
    id
}

#[tokio::test]
async fn owner_lookup_decodes_connect_flags_and_fee_override() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let owner = format!("owner-{}", Uuid::new_v4());
    let id = insert_organization(&pool, owner.as_str(), "professional").await;
    let update = sqlx::query(
        r#"
            UPDATE organizations
            SET stripe_connect_account_id = 'acct_1',
                stripe_connect_charges_enabled = TRUE,
                platform_fee_percentage = 2.75
            WHERE id = $1
            "#,
    )
    .bind(id)
    .execute(&pool)
    .await;
    assert!(update.is_ok());

    let repository = PostgresOrganizationRepository::new(pool);
    let found = repository
        .find_organization_for_subject(owner.as_str())
        .await;
    let Ok(Some(organization)) = found else {
        panic!("expected organization for owner");
    };

    assert_eq!(organization.id().as_uuid(), id);
    assert_eq!(organization.subscription_tier(), SubscriptionTier::Professional);
    assert_eq!(organization.stripe_account_id(), Some("acct_1"));
    assert!(organization.charges_enabled());
    assert!(!organization.payouts_enabled());
    assert_eq!(organization.platform_fee().percentage_basis_points(), 275);
    assert_eq!(organization.platform_fee().fixed_cents(), 30);
}

#[tokio::test]
async fn member_lookup_and_legacy_tier() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let owner = format!("owner-{}", Uuid::new_v4());
    let member = format!("member-{}", Uuid::new_v4());
    let id = insert_organization(&pool, owner.as_str(), "starter").await;
    let membership = sqlx::query(
        r#"
            INSERT INTO organization_members (organization_id, user_id)
            VALUES ($1, $2)
            "#,
    )
    .bind(id)
    .bind(member.as_str())
    .execute(&pool)
    .await;
    assert!(membership.is_ok());

    let repository = PostgresOrganizationRepository::new(pool);
    let found = repository
        .find_organization_for_subject(member.as_str())
        .await;
    let Ok(Some(organization)) = found else {
        panic!("expected organization for member");
    };

    assert_eq!(organization.id().as_uuid(), id);
    assert_eq!(organization.subscription_tier(), SubscriptionTier::Free);
}

#[tokio::test]
async fn unknown_subject_has_no_organization() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresOrganizationRepository::new(pool);
    let found = repository
        .find_organization_for_subject("subject-without-organization")
        .await;
    assert!(matches!(found, Ok(None)));
}
