//! Hostel reference data.
//!
//! Hostels are provisioned out-of-band (by migration or the in-memory
//! adapter) and are never mutated by request handling.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors raised when parsing a [`HostelId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostelValidationError {
    /// The identifier is not a UUID.
    #[error("hostel id must be a valid UUID")]
    InvalidId,
}

/// Stable hostel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostelId(Uuid);

impl HostelId {
    /// Parse a hostel identifier from its textual form.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::HostelId;
    ///
    /// assert!(HostelId::new("6f1d1b1e-0a59-4a8e-9e4d-7c1c2a000001").is_ok());
    /// assert!(HostelId::new("kalpana-chawla").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, HostelValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(HostelValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| HostelValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HostelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A hostel users and complaints belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hostel {
    id: HostelId,
    name: String,
    slug: String,
}

impl Hostel {
    /// Build a hostel record.
    pub fn new(id: HostelId, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Hostel identifier.
    #[must_use]
    pub fn id(&self) -> HostelId {
        self.id
    }

    /// Human readable name, unique across hostels.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// URL-safe slug, unique across hostels.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }
}
