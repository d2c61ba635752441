//! Aggregate root for the User context.

use std::sync::LazyLock;

use catalog_core::error::DomainError;
use chrono::{DateTime, Utc};
use regex::Regex;

/// Structural email check: `local-part@domain.tld`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex pattern")
});

/// Returns `true` if `email` looks like `local-part@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// A catalog user.
///
/// Email uniqueness is not checked here; the storage layer enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a validated user.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or the
    /// email does not match the structural pattern.
    pub fn new(
        id: i64,
        name: &str,
        email: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let user = Self {
            id,
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            created_at,
        };
        user.validate()?;
        Ok(user)
    }

    /// Re-checks every invariant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the violated invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::invalid_field("name", "name required"));
        }
        if !is_valid_email(&self.email) {
            return Err(DomainError::invalid_field("email", "email is not valid"));
        }
        Ok(())
    }

    /// The identifier.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// When the account was created (UTC).
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
