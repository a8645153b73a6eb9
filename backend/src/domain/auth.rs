//! Authentication primitives: login credentials, registration requests,
//! stored password hashes, and issued session tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{DisplayName, Email, HostelId, Role, User, UserValidationError};

/// Minimum password length accepted at registration, in characters.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and lower-cased; it is not pattern-checked so an
///   unknown address fails the same way as a wrong password.
/// - `password` is non-empty and retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use hostel_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Asha@Hostel.edu", "secret").unwrap();
/// assert_eq!(creds.email(), "asha@hostel.edu");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors raised while validating a registration request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// A user field failed validation.
    #[error(transparent)]
    User(#[from] UserValidationError),
    /// The password is shorter than [`PASSWORD_MIN_LEN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    /// The hostel id is not a valid identifier.
    #[error("hostel_id must be a valid hostel identifier")]
    InvalidHostel,
}

impl RegistrationValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(inner) => inner.field(),
            Self::PasswordTooShort { .. } => "password",
            Self::InvalidHostel => "hostel_id",
        }
    }

    /// Stable machine-readable code for the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::User(inner) => inner.code(),
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::InvalidHostel => "invalid_hostel",
        }
    }
}

/// Raw registration fields as supplied by an inbound adapter.
#[derive(Clone, Default)]
pub struct RegistrationForm<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub hostel_id: &'a str,
    pub username: &'a str,
    pub floor_number: Option<i32>,
    pub room_number: Option<&'a str>,
}

/// Validated registration request.
///
/// The plaintext password is zeroised on drop and must only ever be handed to
/// a password hasher.
#[derive(Clone)]
pub struct RegistrationRequest {
    email: Email,
    password: Zeroizing<String>,
    role: Role,
    hostel_id: HostelId,
    display_name: DisplayName,
    floor_number: Option<i32>,
    room_number: Option<String>,
}

impl RegistrationRequest {
    /// Validate raw registration fields.
    ///
    /// Students must supply a floor and a non-blank room. The same rule is
    /// enforced again when the [`User`] is built.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::{RegistrationForm, RegistrationRequest};
    ///
    /// let form = RegistrationForm {
    ///     email: "asha@hostel.edu",
    ///     password: "hunter",
    ///     role: "Student",
    ///     hostel_id: "6f1d1b1e-0a59-4a8e-9e4d-7c1c2a000001",
    ///     username: "Asha",
    ///     floor_number: Some(2),
    ///     room_number: Some("204"),
    /// };
    /// assert!(RegistrationRequest::try_from_form(&form).is_ok());
    /// ```
    pub fn try_from_form(form: &RegistrationForm<'_>) -> Result<Self, RegistrationValidationError> {
        let display_name = DisplayName::new(form.username)?;
        let email = Email::new(form.email)?;
        if form.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(RegistrationValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        let role: Role = form.role.parse()?;
        let hostel_id =
            HostelId::new(form.hostel_id).map_err(|_| RegistrationValidationError::InvalidHostel)?;
        let room_number = form
            .room_number
            .map(str::trim)
            .filter(|room| !room.is_empty())
            .map(str::to_owned);

        if role == Role::Student {
            if form.floor_number.is_none() {
                return Err(UserValidationError::MissingFloorNumber.into());
            }
            if room_number.is_none() {
                return Err(UserValidationError::MissingRoomNumber.into());
            }
        }

        Ok(Self {
            email,
            password: Zeroizing::new(form.password.to_owned()),
            role,
            hostel_id,
            display_name,
            floor_number: form.floor_number,
            room_number,
        })
    }

    /// Normalised login email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password to hash.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Hostel the user joins.
    #[must_use]
    pub fn hostel_id(&self) -> HostelId {
        self.hostel_id
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Floor of residence.
    #[must_use]
    pub fn floor_number(&self) -> Option<i32> {
        self.floor_number
    }

    /// Room of residence.
    #[must_use]
    pub fn room_number(&self) -> Option<&str> {
        self.room_number.as_deref()
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("hostel_id", &self.hostel_id)
            .finish_non_exhaustive()
    }
}

/// Opaque salted password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a password hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// A user together with the hash of their password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: PasswordHash,
}

/// Signed, time-limited bearer token binding a user identity.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub user: User,
    pub token: SessionToken,
}
