use encore_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Lowercased, structurally valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, exactly one `@`,
    /// non-empty local part, and a domain containing at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(format!(
                "email address '{trimmed}' must contain an '@'"
            )));
        };

        if local.is_empty() {
            return Err(AppError::Validation(format!(
                "email address '{trimmed}' has an empty local part"
            )));
        }

        if domain.contains('@') {
            return Err(AppError::Validation(format!(
                "email address '{trimmed}' must contain exactly one '@'"
            )));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(format!(
                "email domain of '{trimmed}' must contain at least one '.'"
            )));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the normalized email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}
