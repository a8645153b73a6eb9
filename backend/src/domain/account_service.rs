//! Credential store service.
//!
//! Implements the account driving ports: registration, login and resolving a
//! bearer token into an [`Actor`]. Plaintext passwords only ever live in
//! zeroizing buffers and are hashed before they reach a repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountCommand, ActorResolver, HostelRepository, HostelRepositoryError, PasswordHashError,
    PasswordHasher, SessionTokenError, SessionTokenService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Actor, AuthenticatedAccount, Email, Error, LoginCredentials, RegistrationRequest, User,
    UserAccount, UserDraft, UserId,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const TOKEN_FAILED: &str = "Not authorized, token failed";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail { .. } => Error::duplicate_email("User already exists"),
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hostel_error(error: HostelRepositoryError) -> Error {
    Error::internal(format!("hostel lookup failed: {error}"))
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

fn map_token_error(error: SessionTokenError) -> Error {
    match error {
        SessionTokenError::Invalid => Error::unauthorized(TOKEN_FAILED),
        SessionTokenError::Expired => Error::unauthorized("Not authorized, token expired"),
        SessionTokenError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
    }
}

/// Account service over user and hostel repositories.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hostels: Arc<H>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn SessionTokenService>,
}

impl<U, H> AccountService<U, H> {
    /// Create a new account service.
    pub fn new(
        users: Arc<U>,
        hostels: Arc<H>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn SessionTokenService>,
    ) -> Self {
        Self {
            users,
            hostels,
            hasher,
            tokens,
        }
    }

    fn authenticated(&self, user: User) -> Result<AuthenticatedAccount, Error> {
        let token = self.tokens.issue(&user.id()).map_err(map_token_error)?;
        Ok(AuthenticatedAccount { user, token })
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
{
    async fn lookup_account(&self, email: &str) -> Result<Option<UserAccount>, Error> {
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };
        self.users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)
    }
}

#[async_trait]
impl<U, H> AccountCommand for AccountService<U, H>
where
    U: UserRepository,
    H: HostelRepository,
{
    async fn register(&self, request: RegistrationRequest) -> Result<AuthenticatedAccount, Error> {
        let hostel = self
            .hostels
            .find_by_id(&request.hostel_id())
            .await
            .map_err(map_hostel_error)?;
        if hostel.is_none() {
            return Err(Error::invalid_field(
                "hostel_id",
                "unknown_hostel",
                "Invalid hostel",
            ));
        }

        let existing = self
            .users
            .find_by_email(request.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::duplicate_email("User already exists"));
        }

        let password_hash = self
            .hasher
            .hash(request.password())
            .map_err(map_hash_error)?;
        let user = User::new(UserDraft {
            id: UserId::random(),
            email: request.email().clone(),
            display_name: request.display_name().clone(),
            role: request.role(),
            hostel_id: request.hostel_id(),
            floor_number: request.floor_number(),
            room_number: request.room_number().map(str::to_owned),
        })
        .map_err(|err| Error::invalid_field(err.field(), err.code(), err.to_string()))?;
        let account = UserAccount {
            user,
            password_hash,
        };

        self.users.insert(&account).await.map_err(map_user_error)?;
        info!(
            user_id = %account.user.id(),
            role = %account.user.role(),
            hostel_id = %account.user.hostel_id(),
            "user registered"
        );
        self.authenticated(account.user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthenticatedAccount, Error> {
        let Some(account) = self.lookup_account(credentials.email()).await? else {
            // Spend comparable hashing work so unknown emails are not cheaper.
            let _ = self.hasher.hash(credentials.password());
            warn!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .map_err(map_hash_error)?;
        if !matches {
            warn!(user_id = %account.user.id(), "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        self.authenticated(account.user)
    }
}

#[async_trait]
impl<U, H> ActorResolver for AccountService<U, H>
where
    U: UserRepository,
    H: Send + Sync,
{
    async fn resolve(&self, token: &str) -> Result<Actor, Error> {
        let user_id = self.tokens.validate(token).map_err(|err| {
            warn!(reason = %err, "bearer token rejected");
            map_token_error(err)
        })?;
        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                warn!(%user_id, "bearer token names an unknown user");
                Error::unauthorized(TOKEN_FAILED)
            })?;
        Ok(Actor {
            user_id: user.id(),
            role: user.role(),
            hostel_id: user.hostel_id(),
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
