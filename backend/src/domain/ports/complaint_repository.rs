//! Port for complaint persistence.
//!
//! Vote recording is the only read-modify-write cycle in the system, so the
//! port exposes it as a single atomic operation instead of load and save.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Complaint, ComplaintId, HostelId, TriageUpdate, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by complaint repository adapters.
    pub enum ComplaintRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "complaint repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "complaint repository query failed: {message}",
    }
}

/// Result of an atomic vote attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteRecord {
    /// The voter was added; carries the updated complaint.
    Recorded(Complaint),
    /// The voter was already in the voter set.
    AlreadyVoted,
    /// The complaint no longer exists.
    Missing,
}

/// Storage for complaints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Persist a newly opened complaint.
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError>;

    /// Complaints of one hostel, newest first with ties broken by id descending.
    async fn list_for_hostel(
        &self,
        hostel_id: &HostelId,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError>;

    /// Fetch a complaint by identifier.
    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// Add `voter` to the voter set unless already present.
    ///
    /// The membership check and the append must be atomic with respect to
    /// concurrent votes on the same complaint.
    async fn add_vote(
        &self,
        id: &ComplaintId,
        voter: &UserId,
        at: DateTime<Utc>,
    ) -> Result<VoteRecord, ComplaintRepositoryError>;

    /// Merge a triage update into the stored complaint.
    ///
    /// Only triage fields and the update timestamp are written, so concurrent
    /// votes are never lost. Returns `None` when the complaint is gone.
    async fn update_triage(
        &self,
        id: &ComplaintId,
        update: &TriageUpdate,
        at: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// Remove a complaint. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &ComplaintId) -> Result<bool, ComplaintRepositoryError>;
}
