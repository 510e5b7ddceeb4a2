//! Dashboard aggregate and validated name scalar.

use super::{DashboardDomainError, DashboardId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated non-empty dashboard name.
///
/// Names are not unique; two dashboards may share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardName(String);

impl DashboardName {
    /// Creates a validated dashboard name.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardDomainError::EmptyDashboardName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, DashboardDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(DashboardDomainError::EmptyDashboardName);
        }
        Ok(Self(normalized))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DashboardName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DashboardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dashboard aggregate: an identifier plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    id: DashboardId,
    name: DashboardName,
}

/// Parameter object for reconstructing a persisted dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDashboardData {
    /// Persisted dashboard identifier.
    pub id: DashboardId,
    /// Persisted dashboard name.
    pub name: DashboardName,
}

impl Dashboard {
    /// Creates a new dashboard.
    #[must_use]
    pub fn new(name: DashboardName) -> Self {
        Self {
            id: DashboardId::new(),
            name,
        }
    }

    /// Reconstructs a dashboard from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDashboardData) -> Self {
        Self {
            id: data.id,
            name: data.name,
        }
    }

    /// Returns the dashboard identifier.
    #[must_use]
    pub const fn id(&self) -> DashboardId {
        self.id
    }

    /// Returns the dashboard name.
    #[must_use]
    pub const fn name(&self) -> &DashboardName {
        &self.name
    }
}
