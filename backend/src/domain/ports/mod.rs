//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod complaint_command;
mod complaint_query;
mod complaint_repository;
mod hostel_repository;
mod maintenance_query;
mod maintenance_repository;
mod password_hasher;
mod session_token_service;
mod user_repository;

pub use account_command::{AccountCommand, ActorResolver};
#[cfg(test)]
pub use account_command::{MockAccountCommand, MockActorResolver};
#[cfg(test)]
pub use complaint_command::MockComplaintCommand;
pub use complaint_command::ComplaintCommand;
#[cfg(test)]
pub use complaint_query::MockComplaintQuery;
pub use complaint_query::{AuthorSummary, ComplaintQuery, ComplaintView};
#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{ComplaintRepository, ComplaintRepositoryError, VoteRecord};
#[cfg(test)]
pub use hostel_repository::MockHostelRepository;
pub use hostel_repository::{HostelRepository, HostelRepositoryError};
#[cfg(test)]
pub use maintenance_query::MockMaintenanceQuery;
pub use maintenance_query::MaintenanceQuery;
#[cfg(test)]
pub use maintenance_repository::MockMaintenanceRepository;
pub use maintenance_repository::{MaintenanceRepository, MaintenanceRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use session_token_service::MockSessionTokenService;
pub use session_token_service::{SessionTokenError, SessionTokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
