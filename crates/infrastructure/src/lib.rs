//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod allow_list_platform_admin_directory;
mod in_memory_organization_repository;
mod postgres_organization_repository;

pub use allow_list_platform_admin_directory::AllowListPlatformAdminDirectory;
pub use in_memory_organization_repository::InMemoryOrganizationRepository;
pub use postgres_organization_repository::PostgresOrganizationRepository;
