//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::{Clock, DefaultClock};

use crate::domain::{AccountService, ComplaintService, HostelId, MaintenanceService};
use crate::inbound::http::state::HttpStatePorts;
use crate::outbound::memory::{
    MemoryComplaintRepository, MemoryHostelRepository, MemoryMaintenanceRepository,
    MemoryUserRepository, reference_hostels,
};
use crate::outbound::security::{Argon2PasswordHasher, JwtSessionTokenService};

const TEST_SECRET: &[u8] = b"test-signing-secret-test-signing";

/// Ports backed by fresh in-memory stores and real credential adapters.
pub fn memory_ports() -> HttpStatePorts {
    memory_ports_with_clock(Arc::new(DefaultClock))
}

/// As [`memory_ports`], with every service reading time from `clock`.
pub fn memory_ports_with_clock(clock: Arc<dyn Clock>) -> HttpStatePorts {
    let users = Arc::new(MemoryUserRepository::default());
    let tokens = Arc::new(JwtSessionTokenService::new(
        TEST_SECRET,
        TimeDelta::days(30),
        Arc::clone(&clock),
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::clone(&users),
        Arc::new(MemoryHostelRepository::default()),
        Arc::new(Argon2PasswordHasher::new()),
        tokens,
    ));
    let complaints = Arc::new(ComplaintService::new(
        Arc::new(MemoryComplaintRepository::default()),
        users,
        clock,
    ));
    HttpStatePorts {
        accounts: accounts.clone(),
        actors: accounts,
        complaints: complaints.clone(),
        complaints_query: complaints,
        maintenance: Arc::new(MaintenanceService::new(Arc::new(
            MemoryMaintenanceRepository::default(),
        ))),
    }
}

/// Id of the `index`th provisioned hostel.
pub fn hostel(index: usize) -> HostelId {
    match reference_hostels().get(index) {
        Some(hostel) => hostel.id(),
        None => panic!("no reference hostel at index {index}"),
    }
}
