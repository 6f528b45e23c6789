use std::collections::HashMap;

use async_trait::async_trait;
use encore_application::OrganizationRepository;
use encore_core::{AppError, AppResult, TenantId};
use encore_domain::Organization;
use tokio::sync::RwLock;

/// In-memory organization repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryOrganizationRepository {
    organizations: RwLock<HashMap<TenantId, Organization>>,
    memberships: RwLock<HashMap<String, TenantId>>,
}

impl InMemoryOrganizationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an organization owned by the subject.
    pub async fn insert_organization(
        &self,
        owner_subject: &str,
        organization: Organization,
    ) -> AppResult<()> {
        let tenant_id = organization.id();
        let mut organizations = self.organizations.write().await;
        let mut memberships = self.memberships.write().await;

        if organizations.contains_key(&tenant_id) {
            return Err(AppError::Conflict(format!(
                "organization '{tenant_id}' already exists"
            )));
        }

        if memberships.contains_key(owner_subject) {
            return Err(AppError::Conflict(format!(
                "subject '{owner_subject}' already belongs to an organization"
            )));
        }

        organizations.insert(tenant_id, organization);
        memberships.insert(owner_subject.to_owned(), tenant_id);

        Ok(())
    }

    /// Adds a member to an existing organization.
    pub async fn add_member(&self, tenant_id: TenantId, subject: &str) -> AppResult<()> {
        if !self.organizations.read().await.contains_key(&tenant_id) {
            return Err(AppError::NotFound(format!(
                "organization '{tenant_id}' not found"
            )));
        }

        let mut memberships = self.memberships.write().await;
        if memberships.contains_key(subject) {
            return Err(AppError::Conflict(format!(
                "subject '{subject}' already belongs to an organization"
            )));
        }

        memberships.insert(subject.to_owned(), tenant_id);
        Ok(())
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn find_organization_for_subject(
        &self,
        subject: &str,
    ) -> AppResult<Option<Organization>> {
        let Some(tenant_id) = self.memberships.read().await.get(subject).copied() else {
            return Ok(None);
        };

        Ok(self.organizations.read().await.get(&tenant_id).cloned())
    }
}
