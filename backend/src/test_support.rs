//! Shared test doubles for unit tests inside the crate.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Actor, Complaint, ComplaintId, DisplayName, Email, HostelId, NewComplaint, Role, User,
    UserDraft, UserId,
};

/// Clock whose time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed instant used as "now" across unit tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub fn actor(role: Role, hostel_id: HostelId) -> Actor {
    Actor {
        user_id: UserId::random(),
        role,
        hostel_id,
    }
}

pub fn student_user(email: &str, hostel_id: HostelId) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        email: Email::new(email).expect("valid email"),
        display_name: DisplayName::new("Asha").expect("valid name"),
        role: Role::Student,
        hostel_id,
        floor_number: Some(2),
        room_number: Some("201".to_owned()),
    })
    .expect("valid student")
}

pub fn leaking_faucet(author: &Actor) -> Complaint {
    let content = NewComplaint::try_from_parts("Leaking Faucet", "201", "Plumbing", "drip", None)
        .expect("valid complaint");
    Complaint::open(
        ComplaintId::random(),
        author.user_id,
        author.hostel_id,
        content,
        fixed_now(),
    )
}
