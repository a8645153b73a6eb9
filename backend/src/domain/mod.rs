//! Domain primitives, aggregates, services and ports.
//!
//! Purpose: Define strongly typed entities for users, hostels, complaints
//! and maintenance checks, the access policy over them, and the services
//! implementing the driving ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User, Hostel, Complaint, MaintenanceCheck: aggregates and their ids.
//! - decide / Actor / Action: the complaint access policy.
//! - AccountService, ComplaintService, MaintenanceService: use-cases.

pub mod account_service;
pub mod auth;
pub mod authorization;
pub mod complaint;
pub mod complaint_service;
pub mod error;
pub mod hostel;
pub mod maintenance;
pub mod maintenance_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AuthenticatedAccount, LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN, PasswordHash,
    RegistrationForm, RegistrationRequest, RegistrationValidationError, SessionToken, UserAccount,
};
pub use self::authorization::{Action, Actor, Decision, Denial, decide};
pub use self::complaint::{
    Complaint, ComplaintId, ComplaintSnapshot, ComplaintStatus, ComplaintValidationError,
    NewComplaint, TriageUpdate, VoteOutcome, VoterSet,
};
pub use self::complaint_service::ComplaintService;
pub use self::error::{Error, ErrorCode};
pub use self::hostel::{Hostel, HostelId, HostelValidationError};
pub use self::maintenance::{
    MaintenanceCheck, MaintenanceStatus, MaintenanceStatusError, sort_by_schedule,
};
pub use self::maintenance_service::MaintenanceService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, Email, Role, User, UserDraft, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use hostel_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
