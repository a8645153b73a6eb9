//! Driving port for complaint reads.
use async_trait::async_trait;

use crate::domain::{Actor, Complaint, ComplaintId, Error, User, UserId};

/// Author details shown alongside a complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.display_name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
        }
    }
}

/// A complaint together with its author, when the author still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintView {
    pub complaint: Complaint,
    pub author: Option<AuthorSummary>,
}

/// Hostel-scoped complaint reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintQuery: Send + Sync {
    /// Complaints of the actor's hostel, newest first.
    async fn list(&self, actor: &Actor) -> Result<Vec<ComplaintView>, Error>;

    /// One complaint; other hostels' complaints look absent.
    async fn get(&self, actor: &Actor, id: &ComplaintId) -> Result<ComplaintView, Error>;
}
