//! Driving port for maintenance check reads.
use async_trait::async_trait;

use crate::domain::{Actor, Error, MaintenanceCheck};

/// Hostel-scoped maintenance listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceQuery: Send + Sync {
    /// Checks of the actor's hostel, soonest first.
    async fn list(&self, actor: &Actor) -> Result<Vec<MaintenanceCheck>, Error>;
}
