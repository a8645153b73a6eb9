//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{complaints, hostels, maintenance_checks, users};

/// Row struct for reading from the hostels table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hostels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HostelRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
    pub hostel_id: Uuid,
    pub floor_number: Option<i32>,
    pub room_number: Option<String>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub display_name: &'a str,
    pub role: &'a str,
    pub hostel_id: Uuid,
    pub floor_number: Option<i32>,
    pub room_number: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Complaint models
// ---------------------------------------------------------------------------

/// Row struct for reading from the complaints table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ComplaintRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hostel_id: Uuid,
    pub title: String,
    pub room: String,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    pub status: String,
    pub votes: i32,
    pub voted_by: Vec<Uuid>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub warden_comments: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new complaint records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = complaints)]
pub(crate) struct NewComplaintRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hostel_id: Uuid,
    pub title: &'a str,
    pub room: &'a str,
    pub category: &'a str,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
    pub status: &'a str,
    pub votes: i32,
    pub voted_by: Vec<Uuid>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub warden_comments: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset touching only the triage columns.
///
/// `None` fields are skipped by Diesel, which gives the merge semantics of a
/// triage update for free.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = complaints)]
pub(crate) struct ComplaintTriageChangeset<'a> {
    pub status: Option<&'a str>,
    pub warden_comments: Option<&'a str>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset written after a vote is appended.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = complaints)]
pub(crate) struct ComplaintVoteChangeset {
    pub votes: i32,
    pub voted_by: Vec<Uuid>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Maintenance models
// ---------------------------------------------------------------------------

/// Row struct for reading from the maintenance_checks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = maintenance_checks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MaintenanceCheckRow {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub title: String,
    pub status: String,
    pub scheduled_for: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
