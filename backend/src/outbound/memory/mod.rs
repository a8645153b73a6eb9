//! In-process adapters used when no database is configured.
//!
//! They honour the same contracts as the PostgreSQL adapters, including
//! email uniqueness and atomic vote recording, by holding each store behind a
//! single mutex. State lives for the lifetime of the process only.

mod complaints;
mod reference;
mod users;

pub use complaints::MemoryComplaintRepository;
pub use reference::{MemoryHostelRepository, MemoryMaintenanceRepository, reference_hostels};
pub use users::MemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock a store, reporting poisoning as a message instead of panicking.
fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
    mutex
        .lock()
        .map_err(|_| "in-memory store lock poisoned".to_owned())
}
