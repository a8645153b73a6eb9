//! Complaint lifecycle service.
//!
//! Implements [`ComplaintCommand`] and [`ComplaintQuery`]. Every operation
//! consults [`decide`] before touching the store; a complaint hidden from
//! the actor is reported exactly like a missing one.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AuthorSummary, ComplaintCommand, ComplaintQuery, ComplaintRepository,
    ComplaintRepositoryError, ComplaintView, UserPersistenceError, UserRepository, VoteRecord,
};
use crate::domain::{
    Action, Actor, Complaint, ComplaintId, Error, NewComplaint, TriageUpdate, UserId, decide,
};

const NOT_FOUND: &str = "Complaint not found";

fn map_repository_error(error: ComplaintRepositoryError) -> Error {
    match error {
        ComplaintRepositoryError::Connection { message } => {
            Error::internal(format!("complaint repository unavailable: {message}"))
        }
        ComplaintRepositoryError::Query { message } => {
            Error::internal(format!("complaint repository error: {message}"))
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    Error::internal(format!("author lookup failed: {error}"))
}

/// Complaint service over complaint and user repositories.
#[derive(Clone)]
pub struct ComplaintService<C, U> {
    complaints: Arc<C>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, U> ComplaintService<C, U> {
    /// Create a new complaint service.
    pub fn new(complaints: Arc<C>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            complaints,
            users,
            clock,
        }
    }
}

impl<C, U> ComplaintService<C, U>
where
    C: ComplaintRepository,
    U: UserRepository,
{
    async fn load(&self, id: &ComplaintId) -> Result<Complaint, Error> {
        self.complaints
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND))
    }

    async fn with_authors(&self, complaints: Vec<Complaint>) -> Result<Vec<ComplaintView>, Error> {
        let mut author_ids: Vec<UserId> = complaints.iter().map(Complaint::author).collect();
        author_ids.sort_by_key(|id| *id.as_uuid());
        author_ids.dedup();
        let authors: HashMap<UserId, AuthorSummary> = self
            .users
            .find_many(&author_ids)
            .await
            .map_err(map_user_error)?
            .iter()
            .map(|user| (user.id(), AuthorSummary::from(user)))
            .collect();
        Ok(complaints
            .into_iter()
            .map(|complaint| ComplaintView {
                author: authors.get(&complaint.author()).cloned(),
                complaint,
            })
            .collect())
    }
}

#[async_trait]
impl<C, U> ComplaintCommand for ComplaintService<C, U>
where
    C: ComplaintRepository,
    U: UserRepository,
{
    async fn create(&self, actor: &Actor, content: NewComplaint) -> Result<Complaint, Error> {
        decide(actor, Action::CreateComplaint).into_result()?;
        let complaint = Complaint::open(
            ComplaintId::random(),
            actor.user_id,
            actor.hostel_id,
            content,
            self.clock.utc(),
        );
        self.complaints
            .insert(&complaint)
            .await
            .map_err(map_repository_error)?;
        info!(
            complaint_id = %complaint.id(),
            hostel_id = %complaint.hostel_id(),
            author = %actor.user_id,
            "complaint created"
        );
        Ok(complaint)
    }

    async fn vote(&self, actor: &Actor, id: &ComplaintId) -> Result<Complaint, Error> {
        let complaint = self.load(id).await?;
        decide(actor, Action::Vote(&complaint)).into_result()?;
        let record = self
            .complaints
            .add_vote(id, &actor.user_id, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        match record {
            VoteRecord::Recorded(updated) => {
                info!(
                    complaint_id = %id,
                    voter = %actor.user_id,
                    votes = updated.vote_count(),
                    "complaint voted"
                );
                Ok(updated)
            }
            VoteRecord::AlreadyVoted => Err(Error::already_voted("You have already voted")),
            VoteRecord::Missing => Err(Error::not_found(NOT_FOUND)),
        }
    }

    async fn update_triage(
        &self,
        actor: &Actor,
        id: &ComplaintId,
        update: TriageUpdate,
    ) -> Result<Complaint, Error> {
        decide(actor, Action::ManageComplaints).into_result()?;
        let complaint = self.load(id).await?;
        decide(actor, Action::UpdateTriage(&complaint)).into_result()?;
        let updated = self
            .complaints
            .update_triage(id, &update, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND))?;
        info!(
            complaint_id = %id,
            warden = %actor.user_id,
            status = %updated.status(),
            "complaint triaged"
        );
        Ok(updated)
    }

    async fn delete(&self, actor: &Actor, id: &ComplaintId) -> Result<(), Error> {
        decide(actor, Action::ManageComplaints).into_result()?;
        let complaint = self.load(id).await?;
        decide(actor, Action::Delete(&complaint)).into_result()?;
        let removed = self
            .complaints
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(NOT_FOUND));
        }
        info!(complaint_id = %id, warden = %actor.user_id, "complaint deleted");
        Ok(())
    }
}

#[async_trait]
impl<C, U> ComplaintQuery for ComplaintService<C, U>
where
    C: ComplaintRepository,
    U: UserRepository,
{
    async fn list(&self, actor: &Actor) -> Result<Vec<ComplaintView>, Error> {
        decide(actor, Action::ListComplaints).into_result()?;
        let complaints = self
            .complaints
            .list_for_hostel(&actor.hostel_id)
            .await
            .map_err(map_repository_error)?;
        // Hostel scoping holds here as well as in the adapter query.
        let scoped = complaints
            .into_iter()
            .filter(|complaint| actor.is_in(complaint.hostel_id()))
            .collect();
        self.with_authors(scoped).await
    }

    async fn get(&self, actor: &Actor, id: &ComplaintId) -> Result<ComplaintView, Error> {
        let complaint = self.load(id).await?;
        decide(actor, Action::ViewComplaint(&complaint)).into_result()?;
        let mut views = self.with_authors(vec![complaint]).await?;
        views.pop().ok_or_else(|| Error::not_found(NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "complaint_service_tests.rs"]
mod tests;
