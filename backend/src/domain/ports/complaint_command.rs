//! Driving port for complaint mutations.
use async_trait::async_trait;

use crate::domain::{Actor, Complaint, ComplaintId, Error, NewComplaint, TriageUpdate};

/// Complaint lifecycle mutations, each checked against the access policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintCommand: Send + Sync {
    /// Open a complaint in the actor's hostel.
    async fn create(&self, actor: &Actor, content: NewComplaint) -> Result<Complaint, Error>;

    /// Endorse a complaint once.
    async fn vote(&self, actor: &Actor, id: &ComplaintId) -> Result<Complaint, Error>;

    /// Apply a warden triage update.
    async fn update_triage(
        &self,
        actor: &Actor,
        id: &ComplaintId,
        update: TriageUpdate,
    ) -> Result<Complaint, Error>;

    /// Permanently remove a complaint.
    async fn delete(&self, actor: &Actor, id: &ComplaintId) -> Result<(), Error>;
}
