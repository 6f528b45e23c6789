use std::collections::HashSet;

use encore_application::PlatformAdminDirectory;
use encore_core::CallerIdentity;
use encore_domain::EmailAddress;

/// Platform administrator directory backed by a fixed email allow-list.
#[derive(Debug, Clone, Default)]
pub struct AllowListPlatformAdminDirectory {
    emails: HashSet<String>,
}

impl AllowListPlatformAdminDirectory {
    /// Creates a directory from already validated addresses.
    #[must_use]
    pub fn new(emails: impl IntoIterator<Item = EmailAddress>) -> Self {
        Self {
            emails: emails.into_iter().map(String::from).collect(),
        }
    }

    /// Number of allow-listed administrators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Returns whether the allow-list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl PlatformAdminDirectory for AllowListPlatformAdminDirectory {
    fn is_platform_admin(&self, caller: &CallerIdentity) -> bool {
        caller
            .email()
            .and_then(|email| EmailAddress::new(email).ok())
            .is_some_and(|email| self.emails.contains(email.as_str()))
    }
}
