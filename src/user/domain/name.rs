//! Display-name parts used for task enrichment.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated display-name parts of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName {
    given: String,
    family: String,
    middle: Option<String>,
}

impl DisplayName {
    /// Creates a validated display name from given and family parts.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyGivenName`] or
    /// [`UserDomainError::EmptyFamilyName`] when the respective part is empty
    /// after trimming.
    pub fn new(
        given: impl Into<String>,
        family: impl Into<String>,
    ) -> Result<Self, UserDomainError> {
        let given = given.into().trim().to_owned();
        if given.is_empty() {
            return Err(UserDomainError::EmptyGivenName);
        }
        let family = family.into().trim().to_owned();
        if family.is_empty() {
            return Err(UserDomainError::EmptyFamilyName);
        }
        Ok(Self {
            given,
            family,
            middle: None,
        })
    }

    /// Sets an optional middle name.
    #[must_use]
    pub fn with_middle(mut self, middle: impl Into<String>) -> Self {
        let middle = middle.into().trim().to_owned();
        self.middle = (!middle.is_empty()).then_some(middle);
        self
    }

    /// Returns the given name.
    #[must_use]
    pub fn given(&self) -> &str {
        &self.given
    }

    /// Returns the family name.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the middle name, if any.
    #[must_use]
    pub fn middle(&self) -> Option<&str> {
        self.middle.as_deref()
    }

    /// Returns the enrichment rendering, `"given family"`.
    #[must_use]
    pub fn full(&self) -> String {
        format!("{} {}", self.given, self.family)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full())
    }
}
