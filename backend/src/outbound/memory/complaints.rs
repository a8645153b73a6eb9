//! In-memory complaint store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError, VoteRecord};
use crate::domain::{Complaint, ComplaintId, HostelId, TriageUpdate, UserId, VoteOutcome};

use super::lock;

/// Complaint store; every operation runs under one lock.
#[derive(Debug, Default)]
pub struct MemoryComplaintRepository {
    complaints: Mutex<HashMap<ComplaintId, Complaint>>,
}

#[async_trait]
impl ComplaintRepository for MemoryComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut complaints = lock(&self.complaints).map_err(ComplaintRepositoryError::query)?;
        if complaints.contains_key(&complaint.id()) {
            return Err(ComplaintRepositoryError::query(format!(
                "complaint {} already exists",
                complaint.id()
            )));
        }
        complaints.insert(complaint.id(), complaint.clone());
        Ok(())
    }

    async fn list_for_hostel(
        &self,
        hostel_id: &HostelId,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let complaints = lock(&self.complaints).map_err(ComplaintRepositoryError::query)?;
        let mut listed: Vec<Complaint> = complaints
            .values()
            .filter(|complaint| complaint.hostel_id() == *hostel_id)
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(listed)
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let complaints = lock(&self.complaints).map_err(ComplaintRepositoryError::query)?;
        Ok(complaints.get(id).cloned())
    }

    async fn add_vote(
        &self,
        id: &ComplaintId,
        voter: &UserId,
        at: DateTime<Utc>,
    ) -> Result<VoteRecord, ComplaintRepositoryError> {
        let mut complaints = lock(&self.complaints).map_err(ComplaintRepositoryError::query)?;
        let Some(complaint) = complaints.get_mut(id) else {
            return Ok(VoteRecord::Missing);
        };
        Ok(match complaint.record_vote(*voter, at) {
            VoteOutcome::Recorded => VoteRecord::Recorded(complaint.clone()),
            VoteOutcome::AlreadyVoted => VoteRecord::AlreadyVoted,
        })
    }

    async fn update_triage(
        &self,
        id: &ComplaintId,
        update: &TriageUpdate,
        at: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut complaints = lock(&self.complaints).map_err(ComplaintRepositoryError::query)?;
        Ok(complaints.get_mut(id).map(|complaint| {
            complaint.apply_triage(update, at);
            complaint.clone()
        }))
    }

    async fn delete(&self, id: &ComplaintId) -> Result<bool, ComplaintRepositoryError> {
        let mut complaints = lock(&self.complaints).map_err(ComplaintRepositoryError::query)?;
        Ok(complaints.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeDelta;
    use rstest::rstest;

    use super::*;
    use crate::domain::{NewComplaint, Role};
    use crate::test_support::{actor, fixed_now, leaking_faucet};

    #[rstest]
    #[tokio::test]
    async fn concurrent_votes_by_one_user_count_once() {
        let repo = Arc::new(MemoryComplaintRepository::default());
        let hostel = HostelId::random();
        let complaint = leaking_faucet(&actor(Role::Student, hostel));
        repo.insert(&complaint).await.expect("insert");
        let voter = UserId::random();

        let attempts = (0..8).map(|_| {
            let repo = Arc::clone(&repo);
            let id = complaint.id();
            tokio::spawn(async move { repo.add_vote(&id, &voter, fixed_now()).await })
        });
        let mut recorded = 0;
        for attempt in attempts {
            let outcome = attempt.await.expect("task joins").expect("vote runs");
            if matches!(outcome, VoteRecord::Recorded(_)) {
                recorded += 1;
            }
        }

        let stored = repo
            .find_by_id(&complaint.id())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(recorded, 1);
        assert_eq!(stored.vote_count(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn vote_on_deleted_complaint_reports_missing() {
        let repo = MemoryComplaintRepository::default();
        let complaint = leaking_faucet(&actor(Role::Student, HostelId::random()));
        repo.insert(&complaint).await.expect("insert");
        assert!(repo.delete(&complaint.id()).await.expect("delete"));

        let outcome = repo
            .add_vote(&complaint.id(), &UserId::random(), fixed_now())
            .await
            .expect("vote runs");

        assert_eq!(outcome, VoteRecord::Missing);
        assert!(!repo.delete(&complaint.id()).await.expect("second delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_is_scoped_and_newest_first() {
        let repo = MemoryComplaintRepository::default();
        let home = HostelId::random();
        let author = actor(Role::Student, home);
        let older = leaking_faucet(&author);
        let newer = Complaint::open(
            ComplaintId::random(),
            author.user_id,
            home,
            NewComplaint::try_from_parts("Broken fan", "12", "Electrical", "noisy", None)
                .expect("valid complaint"),
            fixed_now() + TimeDelta::minutes(5),
        );
        let foreign = leaking_faucet(&actor(Role::Student, HostelId::random()));
        for complaint in [&older, &newer, &foreign] {
            repo.insert(complaint).await.expect("insert");
        }

        let listed = repo.list_for_hostel(&home).await.expect("list");

        let ids: Vec<ComplaintId> = listed.iter().map(Complaint::id).collect();
        assert_eq!(ids, vec![newer.id(), older.id()]);
    }
}
