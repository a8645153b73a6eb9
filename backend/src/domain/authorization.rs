//! Complaint access policy.
//!
//! [`decide`] is a pure function of the actor and the requested action. It
//! never touches storage; services load the target complaint first and pass
//! it in. Role gates that do not depend on the target are exposed through
//! [`Action::ManageComplaints`] so services can reject a student before
//! looking anything up.

use super::{Complaint, Error, HostelId, Role, UserId};

/// Authenticated identity with its resolved role and hostel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
    pub hostel_id: HostelId,
}

impl Actor {
    /// Whether the actor belongs to the given hostel.
    #[must_use]
    pub fn is_in(&self, hostel_id: HostelId) -> bool {
        self.hostel_id == hostel_id
    }
}

/// Operation an actor wants to perform.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    CreateComplaint,
    ListComplaints,
    /// Role gate for triage and deletion, checked before the lookup.
    ManageComplaints,
    ViewComplaint(&'a Complaint),
    Vote(&'a Complaint),
    UpdateTriage(&'a Complaint),
    Delete(&'a Complaint),
}

/// Reason an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// The actor's role may not perform the action.
    Forbidden,
    /// The target is outside the actor's hostel and must look absent.
    Hidden,
    /// The actor has already endorsed the complaint.
    AlreadyVoted,
}

/// Policy outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    /// Convert into a `Result`, mapping denials onto domain errors.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(denial) => Err(denial.into()),
        }
    }
}

impl From<Denial> for Error {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Forbidden => Error::forbidden("insufficient role for this action"),
            Denial::Hidden => Error::not_found("Complaint not found"),
            Denial::AlreadyVoted => Error::already_voted("You have already voted"),
        }
    }
}

fn same_hostel(actor: &Actor, complaint: &Complaint) -> Decision {
    if actor.is_in(complaint.hostel_id()) {
        Decision::Allow
    } else {
        Decision::Deny(Denial::Hidden)
    }
}

fn warden_only(actor: &Actor) -> Decision {
    match actor.role {
        Role::Warden => Decision::Allow,
        Role::Student => Decision::Deny(Denial::Forbidden),
    }
}

/// Decide whether `actor` may perform `action`.
///
/// # Examples
/// ```
/// use hostel_backend::domain::{decide, Action, Actor, Decision, Denial, HostelId, Role, UserId};
///
/// let warden = Actor { user_id: UserId::random(), role: Role::Warden, hostel_id: HostelId::random() };
/// assert_eq!(decide(&warden, Action::CreateComplaint), Decision::Deny(Denial::Forbidden));
/// assert_eq!(decide(&warden, Action::ListComplaints), Decision::Allow);
/// ```
#[must_use]
pub fn decide(actor: &Actor, action: Action<'_>) -> Decision {
    match action {
        Action::CreateComplaint => match actor.role {
            Role::Student => Decision::Allow,
            Role::Warden => Decision::Deny(Denial::Forbidden),
        },
        Action::ListComplaints => Decision::Allow,
        Action::ManageComplaints => warden_only(actor),
        Action::ViewComplaint(complaint) => same_hostel(actor, complaint),
        Action::Vote(complaint) => match same_hostel(actor, complaint) {
            Decision::Allow if complaint.voters().contains(&actor.user_id) => {
                Decision::Deny(Denial::AlreadyVoted)
            }
            other => other,
        },
        Action::UpdateTriage(complaint) | Action::Delete(complaint) => match warden_only(actor) {
            Decision::Allow => same_hostel(actor, complaint),
            denied => denied,
        },
    }
}
