//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types, re-validating invariants on the way in. No policy lives here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leak to the domain.
//! - **Strongly typed errors**: every Diesel or pool failure is mapped to the
//!   port's error enum.
//!
//! # Example
//!
//! ```no_run
//! use hostel_backend::outbound::persistence::{DbPool, DieselComplaintRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hostel")).await?;
//! let complaints = DieselComplaintRepository::new(pool);
//! # let _ = complaints;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_complaint_repository;
mod diesel_hostel_repository;
mod diesel_maintenance_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_complaint_repository::DieselComplaintRepository;
pub use diesel_hostel_repository::DieselHostelRepository;
pub use diesel_maintenance_repository::DieselMaintenanceRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
