use serde::{Deserialize, Serialize};

/// Caller identity handed to entitlement checks by the web tier.
///
/// The subject is the stable user id issued by the identity provider. The
/// email is only used for the platform administrator allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity {
    subject: String,
    email: Option<String>,
}

impl CallerIdentity {
    /// Creates a caller identity from the provider subject and optional email.
    #[must_use]
    pub fn new(subject: impl Into<String>, email: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            email,
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
