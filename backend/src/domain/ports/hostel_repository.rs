//! Port for hostel reference data.
use async_trait::async_trait;

use crate::domain::{Hostel, HostelId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by hostel repository adapters.
    pub enum HostelRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "hostel repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "hostel repository query failed: {message}",
    }
}

/// Read access to provisioned hostels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostelRepository: Send + Sync {
    /// Fetch a hostel by identifier.
    async fn find_by_id(&self, id: &HostelId) -> Result<Option<Hostel>, HostelRepositoryError>;
}
