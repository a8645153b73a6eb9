//! Read-only hostel and maintenance data.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    HostelRepository, HostelRepositoryError, MaintenanceRepository, MaintenanceRepositoryError,
};
use crate::domain::{Hostel, HostelId, MaintenanceCheck};

const REFERENCE_HOSTELS: [(u128, &str, &str); 5] = [
    (0x6f1d1b1e_0a59_4a8e_9e4d_7c1c2a000001, "Kalpana Chawla", "kalpana-chawla"),
    (0x6f1d1b1e_0a59_4a8e_9e4d_7c1c2a000002, "Anandi Gopal Joshi", "anandi-joshi"),
    (0x6f1d1b1e_0a59_4a8e_9e4d_7c1c2a000003, "C.V.Raman", "cv-raman"),
    (0x6f1d1b1e_0a59_4a8e_9e4d_7c1c2a000004, "J.C.Bose", "jc-bose"),
    (0x6f1d1b1e_0a59_4a8e_9e4d_7c1c2a000005, "Homi Baba", "homi-baba"),
];

/// The hostels provisioned by the initial migration, with the same ids.
#[must_use]
pub fn reference_hostels() -> Vec<Hostel> {
    REFERENCE_HOSTELS
        .iter()
        .map(|(id, name, slug)| Hostel::new(HostelId::from_uuid(Uuid::from_u128(*id)), *name, *slug))
        .collect()
}

/// Fixed hostel catalogue.
#[derive(Debug, Clone)]
pub struct MemoryHostelRepository {
    hostels: Vec<Hostel>,
}

impl Default for MemoryHostelRepository {
    fn default() -> Self {
        Self {
            hostels: reference_hostels(),
        }
    }
}

#[async_trait]
impl HostelRepository for MemoryHostelRepository {
    async fn find_by_id(&self, id: &HostelId) -> Result<Option<Hostel>, HostelRepositoryError> {
        Ok(self.hostels.iter().find(|hostel| hostel.id() == *id).cloned())
    }
}

/// Fixed maintenance schedule, empty unless seeded by the caller.
#[derive(Debug, Clone, Default)]
pub struct MemoryMaintenanceRepository {
    checks: Vec<MaintenanceCheck>,
}

impl MemoryMaintenanceRepository {
    /// Serve the given checks.
    #[must_use]
    pub fn with_checks(checks: Vec<MaintenanceCheck>) -> Self {
        Self { checks }
    }
}

#[async_trait]
impl MaintenanceRepository for MemoryMaintenanceRepository {
    async fn list_for_hostel(
        &self,
        hostel_id: &HostelId,
    ) -> Result<Vec<MaintenanceCheck>, MaintenanceRepositoryError> {
        Ok(self
            .checks
            .iter()
            .filter(|check| check.hostel_id == *hostel_id)
            .cloned()
            .collect())
    }
}
