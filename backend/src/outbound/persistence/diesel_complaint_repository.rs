//! PostgreSQL-backed `ComplaintRepository` implementation using Diesel ORM.
//!
//! Votes are recorded inside a transaction holding `SELECT ... FOR UPDATE` on
//! the complaint row, so concurrent voters serialise on that row and a user
//! can never be appended twice. Triage writes only touch triage columns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError, VoteRecord};
use crate::domain::{
    Complaint, ComplaintId, ComplaintSnapshot, ComplaintStatus, HostelId, TriageUpdate, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    ComplaintRow, ComplaintTriageChangeset, ComplaintVoteChangeset, NewComplaintRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::complaints;

/// Diesel-backed implementation of the complaint repository port.
#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ComplaintRepositoryError {
    map_basic_pool_error(error, ComplaintRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ComplaintRepositoryError {
    map_basic_diesel_error(
        error,
        ComplaintRepositoryError::query,
        ComplaintRepositoryError::connection,
    )
}

fn vote_count(voters: usize) -> Result<i32, ComplaintRepositoryError> {
    i32::try_from(voters)
        .map_err(|_| ComplaintRepositoryError::query("vote count exceeds column range"))
}

/// Convert a database row into a validated complaint.
fn row_to_complaint(row: ComplaintRow) -> Result<Complaint, ComplaintRepositoryError> {
    let ComplaintRow {
        id,
        user_id,
        hostel_id,
        title,
        room,
        category,
        description,
        image_url,
        status,
        votes,
        voted_by,
        scheduled_for,
        warden_comments,
        created_at,
        updated_at,
    } = row;

    if usize::try_from(votes).ok() != Some(voted_by.len()) {
        return Err(ComplaintRepositoryError::query(format!(
            "complaint {id} stores {votes} votes for {} voters",
            voted_by.len()
        )));
    }
    let status: ComplaintStatus = status
        .parse()
        .map_err(|err| ComplaintRepositoryError::query(format!("complaint {id}: {err}")))?;

    Complaint::restore(ComplaintSnapshot {
        id: ComplaintId::from_uuid(id),
        author: UserId::from_uuid(user_id),
        hostel_id: HostelId::from_uuid(hostel_id),
        title,
        room,
        category,
        description,
        image_url,
        status,
        voters: voted_by.into_iter().map(UserId::from_uuid).collect(),
        scheduled_for,
        warden_comments,
        created_at,
        updated_at,
    })
    .map_err(|err| ComplaintRepositoryError::query(format!("complaint {id}: {err}")))
}

/// Vote transaction outcome before row conversion.
enum VoteRow {
    Recorded(ComplaintRow),
    AlreadyVoted,
    Missing,
}

/// Failure raised inside the vote transaction.
#[derive(Debug)]
enum VoteTxError {
    Diesel(diesel::result::Error),
    Repository(ComplaintRepositoryError),
}

impl From<diesel::result::Error> for VoteTxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<VoteTxError> for ComplaintRepositoryError {
    fn from(error: VoteTxError) -> Self {
        match error {
            VoteTxError::Diesel(error) => map_diesel_error(error),
            VoteTxError::Repository(error) => error,
        }
    }
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let voters = complaint.voters().as_slice();
        let row = NewComplaintRow {
            id: *complaint.id().as_uuid(),
            user_id: *complaint.author().as_uuid(),
            hostel_id: *complaint.hostel_id().as_uuid(),
            title: complaint.title(),
            room: complaint.room(),
            category: complaint.category(),
            description: complaint.description(),
            image_url: complaint.image_url(),
            status: complaint.status().as_str(),
            votes: vote_count(voters.len())?,
            voted_by: voters.iter().map(|id| *id.as_uuid()).collect(),
            scheduled_for: complaint.scheduled_for(),
            warden_comments: complaint.warden_comments(),
            created_at: complaint.created_at(),
            updated_at: complaint.updated_at(),
        };

        diesel::insert_into(complaints::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_hostel(
        &self,
        hostel_id: &HostelId,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ComplaintRow> = complaints::table
            .filter(complaints::hostel_id.eq(hostel_id.as_uuid()))
            .order((complaints::created_at.desc(), complaints::id.desc()))
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_complaint).collect()
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = complaints::table
            .filter(complaints::id.eq(id.as_uuid()))
            .select(ComplaintRow::as_select())
            .first::<ComplaintRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_complaint).transpose()
    }

    async fn add_vote(
        &self,
        id: &ComplaintId,
        voter: &UserId,
        at: DateTime<Utc>,
    ) -> Result<VoteRecord, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let complaint_id = *id.as_uuid();
        let voter = *voter.as_uuid();

        let outcome = conn
            .transaction::<_, VoteTxError, _>(|conn| {
                async move {
                    let locked = complaints::table
                        .filter(complaints::id.eq(complaint_id))
                        .select(ComplaintRow::as_select())
                        .for_update()
                        .first::<ComplaintRow>(conn)
                        .await
                        .optional()?;
                    let Some(row) = locked else {
                        return Ok(VoteRow::Missing);
                    };
                    if row.voted_by.contains(&voter) {
                        return Ok(VoteRow::AlreadyVoted);
                    }

                    let mut voted_by = row.voted_by;
                    voted_by.push(voter);
                    let votes = vote_count(voted_by.len()).map_err(VoteTxError::Repository)?;
                    let updated = diesel::update(complaints::table.find(complaint_id))
                        .set(&ComplaintVoteChangeset {
                            votes,
                            voted_by,
                            updated_at: at,
                        })
                        .returning(ComplaintRow::as_returning())
                        .get_result::<ComplaintRow>(conn)
                        .await?;
                    Ok(VoteRow::Recorded(updated))
                }
                .scope_boxed()
            })
            .await
            .map_err(ComplaintRepositoryError::from)?;

        match outcome {
            VoteRow::Recorded(row) => row_to_complaint(row).map(VoteRecord::Recorded),
            VoteRow::AlreadyVoted => Ok(VoteRecord::AlreadyVoted),
            VoteRow::Missing => Ok(VoteRecord::Missing),
        }
    }

    async fn update_triage(
        &self,
        id: &ComplaintId,
        update: &TriageUpdate,
        at: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ComplaintTriageChangeset {
            status: update.status().map(ComplaintStatus::as_str),
            warden_comments: update.warden_comments(),
            scheduled_for: update.scheduled_for(),
            updated_at: at,
        };
        let row = diesel::update(complaints::table.find(id.as_uuid()))
            .set(&changes)
            .returning(ComplaintRow::as_returning())
            .get_result::<ComplaintRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_complaint).transpose()
    }

    async fn delete(&self, id: &ComplaintId) -> Result<bool, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(complaints::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixed_now;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn row() -> ComplaintRow {
        let author = Uuid::new_v4();
        ComplaintRow {
            id: Uuid::new_v4(),
            user_id: author,
            hostel_id: Uuid::new_v4(),
            title: "Leaking Faucet".to_owned(),
            room: "201".to_owned(),
            category: "Plumbing".to_owned(),
            description: "drip".to_owned(),
            image_url: None,
            status: "In Progress".to_owned(),
            votes: 1,
            voted_by: vec![author],
            scheduled_for: None,
            warden_comments: String::new(),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    #[rstest]
    fn converts_consistent_row(row: ComplaintRow) {
        let complaint = row_to_complaint(row).expect("valid row");
        assert_eq!(complaint.status(), ComplaintStatus::InProgress);
        assert_eq!(complaint.vote_count(), 1);
    }

    #[rstest]
    fn rejects_count_drift(mut row: ComplaintRow) {
        row.votes = 3;
        let err = row_to_complaint(row).expect_err("count drift");
        assert!(err.to_string().contains("3 votes for 1 voters"));
    }

    #[rstest]
    fn rejects_unknown_status(mut row: ComplaintRow) {
        row.status = "Closed".to_owned();
        assert!(matches!(
            row_to_complaint(row),
            Err(ComplaintRepositoryError::Query { .. })
        ));
    }

    #[rstest]
    fn vote_count_beyond_column_range_is_an_error() {
        let overflow = usize::try_from(i64::from(i32::MAX) + 1).expect("64-bit usize");

        let err = vote_count(overflow).expect_err("out of range");

        assert!(matches!(err, ComplaintRepositoryError::Query { .. }));
        assert_eq!(vote_count(2).expect("in range"), 2);
    }

    #[rstest]
    fn vote_transaction_errors_keep_repository_failures() {
        let raised = ComplaintRepositoryError::query("vote count exceeds column range");

        let mapped = ComplaintRepositoryError::from(VoteTxError::Repository(raised.clone()));
        let from_diesel = ComplaintRepositoryError::from(VoteTxError::from(
            diesel::result::Error::NotFound,
        ));

        assert_eq!(mapped, raised);
        assert!(matches!(from_diesel, ComplaintRepositoryError::Query { .. }));
    }
}
