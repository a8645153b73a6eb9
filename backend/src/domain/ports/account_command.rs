//! Driving ports for registration, login and bearer-token resolution.
//!
//! Inbound adapters call these without knowing which credential store or
//! token scheme backs them.

use async_trait::async_trait;

use crate::domain::{Actor, AuthenticatedAccount, Error, LoginCredentials, RegistrationRequest};

/// Account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and issue its first token.
    async fn register(&self, request: RegistrationRequest) -> Result<AuthenticatedAccount, Error>;

    /// Check credentials and issue a token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthenticatedAccount, Error>;
}

/// Resolves a bearer token into the acting user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActorResolver: Send + Sync {
    /// Validate `token` and load the user it names.
    async fn resolve(&self, token: &str) -> Result<Actor, Error>;
}
