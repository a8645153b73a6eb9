//! Complaint aggregate and its voting and triage rules.
//!
//! ## Invariants
//! - The vote count is always the size of the voter set; it is derived, never
//!   stored independently on the aggregate.
//! - The author is a member of the voter set from creation onwards.
//! - A user appears in the voter set at most once.
//! - The hostel a complaint belongs to never changes after creation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{HostelId, UserId};

/// Validation errors raised by complaint constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComplaintValidationError {
    /// A required text field was missing or blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    /// The status is not one of the lifecycle states.
    #[error("status must be one of Submitted, In Progress, Resolved")]
    InvalidStatus { value: String },
    /// A stored voter set lists the same user twice.
    #[error("voter {voter} appears more than once")]
    DuplicateVoter { voter: UserId },
    /// A stored voter set does not include the author.
    #[error("author {author} is missing from the voter set")]
    AuthorNotVoter { author: UserId },
    /// The complaint id is not a UUID.
    #[error("complaint id must be a valid UUID")]
    InvalidId,
}

impl ComplaintValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field } => field,
            Self::InvalidStatus { .. } => "status",
            Self::DuplicateVoter { .. } | Self::AuthorNotVoter { .. } => "votedBy",
            Self::InvalidId => "id",
        }
    }

    /// Stable machine-readable code for the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyField { .. } => "missing_field",
            Self::InvalidStatus { .. } => "invalid_status",
            Self::DuplicateVoter { .. } | Self::AuthorNotVoter { .. } => "invalid_voters",
            Self::InvalidId => "invalid_uuid",
        }
    }
}

/// Stable complaint identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(Uuid);

impl ComplaintId {
    /// Parse a complaint identifier from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ComplaintValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ComplaintValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a complaint.
///
/// Wardens may move a complaint to any state at any time, including
/// backwards; only the set of values is constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[default]
    Submitted,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    /// Canonical wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ComplaintValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Submitted" => Ok(Self::Submitted),
            "In Progress" => Ok(Self::InProgress),
            "Resolved" => Ok(Self::Resolved),
            other => Err(ComplaintValidationError::InvalidStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Users endorsing a complaint, in the order they voted.
///
/// Duplicates are unrepresentable: [`VoterSet::insert`] refuses a user that
/// is already present and [`VoterSet::from_voters`] rejects repeated ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VoterSet(Vec<UserId>);

impl VoterSet {
    /// Start a voter set containing only the author.
    #[must_use]
    pub fn with_author(author: UserId) -> Self {
        Self(vec![author])
    }

    /// Rebuild a voter set from stored ids, rejecting duplicates.
    pub fn from_voters(voters: Vec<UserId>) -> Result<Self, ComplaintValidationError> {
        let mut set = Self(Vec::with_capacity(voters.len()));
        for voter in voters {
            if !set.insert(voter) {
                return Err(ComplaintValidationError::DuplicateVoter { voter });
            }
        }
        Ok(set)
    }

    /// Whether the user has already voted.
    #[must_use]
    pub fn contains(&self, user: &UserId) -> bool {
        self.0.contains(user)
    }

    /// Add a voter, returning `false` when they were already present.
    pub fn insert(&mut self, user: UserId) -> bool {
        if self.contains(&user) {
            return false;
        }
        self.0.push(user);
        true
    }

    /// Number of voters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty. Never true for a stored complaint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Voters in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[UserId] {
        &self.0
    }
}

fn required_text(value: &str, field: &'static str) -> Result<String, ComplaintValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ComplaintValidationError::EmptyField { field })
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Validated fields for a new complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    title: String,
    room: String,
    category: String,
    description: String,
    image_url: Option<String>,
}

impl NewComplaint {
    /// Validate the author-supplied complaint fields.
    ///
    /// Title, room, category and description must be non-blank. A blank image
    /// URL is treated as absent.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::NewComplaint;
    ///
    /// let complaint = NewComplaint::try_from_parts("Leaking Faucet", "201", "Plumbing", "drip", None);
    /// assert!(complaint.is_ok());
    /// assert!(NewComplaint::try_from_parts("", "201", "Plumbing", "drip", None).is_err());
    /// ```
    pub fn try_from_parts(
        title: &str,
        room: &str,
        category: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> Result<Self, ComplaintValidationError> {
        Ok(Self {
            title: required_text(title, "title")?,
            room: required_text(room, "room")?,
            category: required_text(category, "category")?,
            description: required_text(description, "description")?,
            image_url: image_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_owned),
        })
    }
}

/// Outcome of recording a vote against a loaded complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The voter was added and the count incremented.
    Recorded,
    /// The voter was already present; nothing changed.
    AlreadyVoted,
}

/// Warden triage change set.
///
/// Each field is `Some` only when the caller supplied a non-empty value; empty
/// values leave the stored field untouched. An explicit empty string therefore
/// cannot clear comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriageUpdate {
    status: Option<ComplaintStatus>,
    warden_comments: Option<String>,
    scheduled_for: Option<DateTime<Utc>>,
}

impl TriageUpdate {
    /// Build an update from optional inputs, discarding empty strings.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::{ComplaintStatus, TriageUpdate};
    ///
    /// let update = TriageUpdate::from_inputs(Some("Resolved"), Some(""), None).unwrap();
    /// assert_eq!(update.status(), Some(ComplaintStatus::Resolved));
    /// assert!(update.warden_comments().is_none());
    /// assert!(TriageUpdate::from_inputs(Some("Closed"), None, None).is_err());
    /// ```
    pub fn from_inputs(
        status: Option<&str>,
        warden_comments: Option<&str>,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Result<Self, ComplaintValidationError> {
        let status = status
            .filter(|raw| !raw.is_empty())
            .map(str::parse::<ComplaintStatus>)
            .transpose()?;
        let warden_comments = warden_comments
            .filter(|raw| !raw.is_empty())
            .map(str::to_owned);
        Ok(Self {
            status,
            warden_comments,
            scheduled_for,
        })
    }

    /// New status, if provided.
    #[must_use]
    pub fn status(&self) -> Option<ComplaintStatus> {
        self.status
    }

    /// New warden comments, if provided.
    #[must_use]
    pub fn warden_comments(&self) -> Option<&str> {
        self.warden_comments.as_deref()
    }

    /// New scheduled date, if provided.
    #[must_use]
    pub fn scheduled_for(&self) -> Option<DateTime<Utc>> {
        self.scheduled_for
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.warden_comments.is_none() && self.scheduled_for.is_none()
    }
}

/// Persisted complaint fields used to rehydrate an aggregate from storage.
#[derive(Debug, Clone)]
pub struct ComplaintSnapshot {
    pub id: ComplaintId,
    pub author: UserId,
    pub hostel_id: HostelId,
    pub title: String,
    pub room: String,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    pub status: ComplaintStatus,
    pub voters: Vec<UserId>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub warden_comments: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A maintenance complaint raised by a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    id: ComplaintId,
    author: UserId,
    hostel_id: HostelId,
    title: String,
    room: String,
    category: String,
    description: String,
    image_url: Option<String>,
    status: ComplaintStatus,
    voters: VoterSet,
    scheduled_for: Option<DateTime<Utc>>,
    warden_comments: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Complaint {
    /// Open a new complaint on behalf of `author` in `hostel_id`.
    ///
    /// The complaint starts as [`ComplaintStatus::Submitted`] with the author
    /// as its only voter.
    #[must_use]
    pub fn open(
        id: ComplaintId,
        author: UserId,
        hostel_id: HostelId,
        content: NewComplaint,
        now: DateTime<Utc>,
    ) -> Self {
        let NewComplaint {
            title,
            room,
            category,
            description,
            image_url,
        } = content;
        Self {
            id,
            author,
            hostel_id,
            title,
            room,
            category,
            description,
            image_url,
            status: ComplaintStatus::Submitted,
            voters: VoterSet::with_author(author),
            scheduled_for: None,
            warden_comments: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate a complaint from storage, re-checking its invariants.
    pub fn restore(snapshot: ComplaintSnapshot) -> Result<Self, ComplaintValidationError> {
        let ComplaintSnapshot {
            id,
            author,
            hostel_id,
            title,
            room,
            category,
            description,
            image_url,
            status,
            voters,
            scheduled_for,
            warden_comments,
            created_at,
            updated_at,
        } = snapshot;
        let voters = VoterSet::from_voters(voters)?;
        if !voters.contains(&author) {
            return Err(ComplaintValidationError::AuthorNotVoter { author });
        }
        Ok(Self {
            id,
            author,
            hostel_id,
            title: required_text(&title, "title")?,
            room: required_text(&room, "room")?,
            category: required_text(&category, "category")?,
            description: required_text(&description, "description")?,
            image_url,
            status,
            voters,
            scheduled_for,
            warden_comments,
            created_at,
            updated_at,
        })
    }

    /// Record `voter`'s endorsement.
    pub fn record_vote(&mut self, voter: UserId, now: DateTime<Utc>) -> VoteOutcome {
        if self.voters.insert(voter) {
            self.updated_at = now;
            VoteOutcome::Recorded
        } else {
            VoteOutcome::AlreadyVoted
        }
    }

    /// Merge a triage update, touching only the provided fields.
    pub fn apply_triage(&mut self, update: &TriageUpdate, now: DateTime<Utc>) {
        if let Some(status) = update.status() {
            self.status = status;
        }
        if let Some(comments) = update.warden_comments() {
            comments.clone_into(&mut self.warden_comments);
        }
        if let Some(scheduled_for) = update.scheduled_for() {
            self.scheduled_for = Some(scheduled_for);
        }
        self.updated_at = now;
    }

    /// Complaint identifier.
    #[must_use]
    pub fn id(&self) -> ComplaintId {
        self.id
    }

    /// Author of the complaint.
    #[must_use]
    pub fn author(&self) -> UserId {
        self.author
    }

    /// Hostel the complaint belongs to.
    #[must_use]
    pub fn hostel_id(&self) -> HostelId {
        self.hostel_id
    }

    /// Short summary.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Room the complaint concerns.
    #[must_use]
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Free-form category, for example "Plumbing".
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Detailed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Opaque image reference.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Lifecycle state.
    #[must_use]
    pub fn status(&self) -> ComplaintStatus {
        self.status
    }

    /// Users endorsing the complaint.
    #[must_use]
    pub fn voters(&self) -> &VoterSet {
        &self.voters
    }

    /// Number of endorsements, always equal to the voter set size.
    #[must_use]
    pub fn vote_count(&self) -> usize {
        self.voters.len()
    }

    /// Date the warden scheduled the fix for.
    #[must_use]
    pub fn scheduled_for(&self) -> Option<DateTime<Utc>> {
        self.scheduled_for
    }

    /// Warden notes; empty until a warden comments.
    #[must_use]
    pub fn warden_comments(&self) -> &str {
        &self.warden_comments
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    //! Invariant coverage for the complaint aggregate.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn complaint(now: DateTime<Utc>) -> Complaint {
        let content =
            NewComplaint::try_from_parts("Leaking Faucet", "201", "Plumbing", "drip", Some(""))
                .expect("valid complaint");
        Complaint::open(
            ComplaintId::random(),
            UserId::random(),
            HostelId::random(),
            content,
            now,
        )
    }

    #[rstest]
    fn open_auto_votes_for_author(complaint: Complaint) {
        assert_eq!(complaint.status(), ComplaintStatus::Submitted);
        assert_eq!(complaint.vote_count(), 1);
        assert_eq!(complaint.voters().as_slice(), &[complaint.author()]);
        assert!(complaint.image_url().is_none());
        assert!(complaint.warden_comments().is_empty());
    }

    #[rstest]
    #[case("", "201", "Plumbing", "drip", "title")]
    #[case("Leak", "  ", "Plumbing", "drip", "room")]
    #[case("Leak", "201", "", "drip", "category")]
    #[case("Leak", "201", "Plumbing", "\n", "description")]
    fn new_complaint_requires_fields(
        #[case] title: &str,
        #[case] room: &str,
        #[case] category: &str,
        #[case] description: &str,
        #[case] field: &str,
    ) {
        let err = NewComplaint::try_from_parts(title, room, category, description, None)
            .expect_err("blank field rejected");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), "missing_field");
    }

    #[rstest]
    fn second_vote_by_same_user_is_rejected(mut complaint: Complaint, now: DateTime<Utc>) {
        let voter = UserId::random();
        assert_eq!(complaint.record_vote(voter, now), VoteOutcome::Recorded);
        assert_eq!(complaint.record_vote(voter, now), VoteOutcome::AlreadyVoted);
        assert_eq!(complaint.vote_count(), 2);
        assert_eq!(complaint.vote_count(), complaint.voters().len());
    }

    #[rstest]
    fn author_cannot_vote_twice(mut complaint: Complaint, now: DateTime<Utc>) {
        let author = complaint.author();
        assert_eq!(complaint.record_vote(author, now), VoteOutcome::AlreadyVoted);
        assert_eq!(complaint.vote_count(), 1);
    }

    #[rstest]
    fn status_only_triage_keeps_other_fields(mut complaint: Complaint, now: DateTime<Utc>) {
        let schedule = now + chrono::Duration::days(2);
        let first = TriageUpdate::from_inputs(None, Some("Plumber booked"), Some(schedule))
            .expect("valid update");
        complaint.apply_triage(&first, now);

        let status_only =
            TriageUpdate::from_inputs(Some("Resolved"), Some(""), None).expect("valid update");
        complaint.apply_triage(&status_only, now);

        assert_eq!(complaint.status(), ComplaintStatus::Resolved);
        assert_eq!(complaint.warden_comments(), "Plumber booked");
        assert_eq!(complaint.scheduled_for(), Some(schedule));
    }

    #[rstest]
    fn status_may_move_backwards(mut complaint: Complaint, now: DateTime<Utc>) {
        for status in ["Resolved", "In Progress", "Submitted"] {
            let update = TriageUpdate::from_inputs(Some(status), None, None).expect("valid status");
            complaint.apply_triage(&update, now);
            assert_eq!(complaint.status().as_str(), status);
        }
    }

    #[rstest]
    #[case("Closed")]
    #[case("resolved")]
    #[case("InProgress")]
    fn unknown_status_is_rejected(#[case] raw: &str) {
        let err = TriageUpdate::from_inputs(Some(raw), None, None).expect_err("invalid status");
        assert_eq!(err.field(), "status");
    }

    #[rstest]
    fn empty_update_is_detected() {
        let update = TriageUpdate::from_inputs(Some(""), Some(""), None).expect("valid update");
        assert!(update.is_empty());
    }

    #[rstest]
    fn restore_rejects_duplicate_voters(complaint: Complaint) {
        let author = complaint.author();
        let snapshot = snapshot_of(&complaint, vec![author, author]);
        assert_eq!(
            Complaint::restore(snapshot),
            Err(ComplaintValidationError::DuplicateVoter { voter: author })
        );
    }

    #[rstest]
    fn restore_requires_author_vote(complaint: Complaint) {
        let snapshot = snapshot_of(&complaint, vec![UserId::random()]);
        assert!(matches!(
            Complaint::restore(snapshot),
            Err(ComplaintValidationError::AuthorNotVoter { .. })
        ));
    }

    #[rstest]
    fn restore_round_trips_valid_snapshot(complaint: Complaint) {
        let snapshot = snapshot_of(&complaint, complaint.voters().as_slice().to_vec());
        assert_eq!(Complaint::restore(snapshot), Ok(complaint));
    }

    #[rstest]
    fn status_serialises_with_space() {
        let value = serde_json::to_value(ComplaintStatus::InProgress).expect("serialise status");
        assert_eq!(value, serde_json::json!("In Progress"));
    }

    fn snapshot_of(complaint: &Complaint, voters: Vec<UserId>) -> ComplaintSnapshot {
        ComplaintSnapshot {
            id: complaint.id(),
            author: complaint.author(),
            hostel_id: complaint.hostel_id(),
            title: complaint.title().to_owned(),
            room: complaint.room().to_owned(),
            category: complaint.category().to_owned(),
            description: complaint.description().to_owned(),
            image_url: complaint.image_url().map(str::to_owned),
            status: complaint.status(),
            voters,
            scheduled_for: complaint.scheduled_for(),
            warden_comments: complaint.warden_comments().to_owned(),
            created_at: complaint.created_at(),
            updated_at: complaint.updated_at(),
        }
    }
}
