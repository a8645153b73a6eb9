//! Port for issuing and validating session tokens.
use crate::domain::{SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session token adapters.
    pub enum SessionTokenError {
        /// The token is malformed, tampered with or names an unknown subject.
        Invalid => "session token is invalid",
        /// The token was valid but its lifetime has elapsed.
        Expired => "session token has expired",
        /// A token could not be produced.
        Signing { message: String } => "session token could not be signed: {message}",
    }
}

/// Signed, time-limited bearer tokens naming a user.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokenService: Send + Sync {
    /// Issue a token for `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<SessionToken, SessionTokenError>;

    /// Validate a token and return the user it names.
    fn validate(&self, token: &str) -> Result<UserId, SessionTokenError>;
}
