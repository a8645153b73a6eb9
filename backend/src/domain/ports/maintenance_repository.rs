//! Port for maintenance check reads.
use async_trait::async_trait;

use crate::domain::{HostelId, MaintenanceCheck};

use super::define_port_error;

define_port_error! {
    /// Errors raised by maintenance repository adapters.
    pub enum MaintenanceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "maintenance repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "maintenance repository query failed: {message}",
    }
}

/// Read access to scheduled maintenance checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Checks of one hostel in any order.
    async fn list_for_hostel(
        &self,
        hostel_id: &HostelId,
    ) -> Result<Vec<MaintenanceCheck>, MaintenanceRepositoryError>;
}
