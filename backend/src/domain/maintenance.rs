//! Scheduled maintenance checks.
//!
//! Checks are read-only reference data for each hostel.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HostelId;

/// Errors raised when parsing a [`MaintenanceStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("maintenance status must be Pending or Completed, got {value}")]
pub struct MaintenanceStatusError {
    value: String,
}

/// Progress of a maintenance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    Completed,
}

impl MaintenanceStatus {
    /// Canonical wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaintenanceStatus {
    type Err = MaintenanceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            other => Err(MaintenanceStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A maintenance visit scheduled for a hostel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceCheck {
    pub id: Uuid,
    pub hostel_id: HostelId,
    pub title: String,
    pub status: MaintenanceStatus,
    pub scheduled_for: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order checks by scheduled date ascending, breaking ties by id.
pub fn sort_by_schedule(checks: &mut [MaintenanceCheck]) {
    checks.sort_by(|a, b| {
        a.scheduled_for
            .cmp(&b.scheduled_for)
            .then_with(|| a.id.cmp(&b.id))
    });
}
