//! User data model.
//!
//! Users are created at registration and never deleted. The residence fields
//! (floor and room) are mandatory for students and optional for wardens.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HostelId;

/// Maximum allowed length for a display name, in characters.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Validation errors raised by the user constructors.
///
/// Each variant knows which request field it concerns so inbound adapters can
/// report it without re-deriving the mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("please provide a valid email address")]
    InvalidEmail,
    #[error("username must not be empty")]
    EmptyDisplayName,
    #[error("username must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
    #[error("role must be Student or Warden")]
    InvalidRole,
    #[error("floor_number is required for students")]
    MissingFloorNumber,
    #[error("room_number is required for students")]
    MissingRoomNumber,
}

impl UserValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::InvalidEmail => "email",
            Self::EmptyDisplayName | Self::DisplayNameTooLong { .. } => "username",
            Self::InvalidRole => "role",
            Self::MissingFloorNumber => "floor_number",
            Self::MissingRoomNumber => "room_number",
        }
    }

    /// Stable machine-readable code for the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_uuid",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyDisplayName => "empty_username",
            Self::DisplayNameTooLong { .. } => "username_too_long",
            Self::InvalidRole => "invalid_role",
            Self::MissingFloorNumber | Self::MissingRoomNumber => "missing_field",
        }
    }
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // ASCII word characters only.
        let pattern = r"^(?-u:\w)+([.-]?(?-u:\w)+)*@(?-u:\w)+([.-]?(?-u:\w)+)*(\.(?-u:\w){2,3})+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Login email address, stored trimmed and lower-cased.
///
/// # Examples
/// ```
/// use hostel_backend::domain::Email;
///
/// let email = Email::new("  Asha@Hostel.edu ").expect("valid email");
/// assert_eq!(email.as_ref(), "asha@hostel.edu");
/// assert!(Email::new("asha@hostel").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalise and validate an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if email_regex().is_match(&normalised) {
            Ok(Self(normalised))
        } else {
            Err(UserValidationError::InvalidEmail)
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable name shown alongside complaints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`], trimming surrounding space.
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Access role held by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Warden,
}

impl Role {
    /// Canonical wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Warden => "Warden",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Self::Student),
            "Warden" => Ok(Self::Warden),
            _ => Err(UserValidationError::InvalidRole),
        }
    }
}

/// Unvalidated user fields collected by [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub email: Email,
    pub display_name: DisplayName,
    pub role: Role,
    pub hostel_id: HostelId,
    pub floor_number: Option<i32>,
    pub room_number: Option<String>,
}

/// Registered user without credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Email,
    display_name: DisplayName,
    role: Role,
    hostel_id: HostelId,
    floor_number: Option<i32>,
    room_number: Option<String>,
}

impl User {
    /// Build a user, enforcing that students carry a floor and room.
    ///
    /// Blank room numbers count as missing.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::{
    ///     DisplayName, Email, HostelId, Role, User, UserDraft, UserId, UserValidationError,
    /// };
    ///
    /// let draft = UserDraft {
    ///     id: UserId::random(),
    ///     email: Email::new("asha@hostel.edu").unwrap(),
    ///     display_name: DisplayName::new("Asha").unwrap(),
    ///     role: Role::Student,
    ///     hostel_id: HostelId::random(),
    ///     floor_number: Some(2),
    ///     room_number: None,
    /// };
    /// assert_eq!(User::new(draft), Err(UserValidationError::MissingRoomNumber));
    /// ```
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            email,
            display_name,
            role,
            hostel_id,
            floor_number,
            room_number,
        } = draft;
        let room_number = room_number
            .map(|room| room.trim().to_owned())
            .filter(|room| !room.is_empty());

        if role == Role::Student {
            if floor_number.is_none() {
                return Err(UserValidationError::MissingFloorNumber);
            }
            if room_number.is_none() {
                return Err(UserValidationError::MissingRoomNumber);
            }
        }

        Ok(Self {
            id,
            email,
            display_name,
            role,
            hostel_id,
            floor_number,
            room_number,
        })
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Access role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Hostel the user belongs to.
    #[must_use]
    pub fn hostel_id(&self) -> HostelId {
        self.hostel_id
    }

    /// Floor of residence, if recorded.
    #[must_use]
    pub fn floor_number(&self) -> Option<i32> {
        self.floor_number
    }

    /// Room of residence, if recorded.
    #[must_use]
    pub fn room_number(&self) -> Option<&str> {
        self.room_number.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Validation coverage for user primitives.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> UserDraft {
        UserDraft {
            id: UserId::random(),
            email: Email::new("ravi@hostel.edu").expect("valid email"),
            display_name: DisplayName::new("Ravi").expect("valid name"),
            role: Role::Student,
            hostel_id: HostelId::random(),
            floor_number: Some(1),
            room_number: Some("104".to_owned()),
        }
    }

    #[rstest]
    #[case("student@hostel.edu")]
    #[case("first.last@mail.iitk.ac.in")]
    #[case("a-b@c-d.org")]
    fn accepts_well_formed_emails(#[case] raw: &str) {
        assert!(Email::new(raw).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("plainaddress")]
    #[case("missing@tld")]
    #[case("two@@hostel.edu")]
    #[case("trailing@hostel.education")]
    #[case("ä@hostel.edu")]
    #[case("asha@hostél.edu")]
    fn rejects_malformed_emails(#[case] raw: &str) {
        assert_eq!(Email::new(raw), Err(UserValidationError::InvalidEmail));
    }

    #[rstest]
    fn email_is_normalised() {
        let email = Email::new(" Ravi@Hostel.EDU ").expect("valid email");
        assert_eq!(email.as_ref(), "ravi@hostel.edu");
    }

    #[rstest]
    #[case("   ", UserValidationError::EmptyDisplayName)]
    #[case(&"x".repeat(DISPLAY_NAME_MAX + 1), UserValidationError::DisplayNameTooLong { max: DISPLAY_NAME_MAX })]
    fn rejects_invalid_display_names(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(DisplayName::new(raw), Err(expected));
    }

    #[rstest]
    #[case("Student", Ok(Role::Student))]
    #[case("Warden", Ok(Role::Warden))]
    #[case("warden", Err(UserValidationError::InvalidRole))]
    #[case("Admin", Err(UserValidationError::InvalidRole))]
    fn parses_roles(#[case] raw: &str, #[case] expected: Result<Role, UserValidationError>) {
        assert_eq!(raw.parse::<Role>(), expected);
    }

    #[rstest]
    fn student_requires_floor(mut draft: UserDraft) {
        draft.floor_number = None;
        assert_eq!(User::new(draft), Err(UserValidationError::MissingFloorNumber));
    }

    #[rstest]
    fn student_blank_room_counts_as_missing(mut draft: UserDraft) {
        draft.room_number = Some("  ".to_owned());
        assert_eq!(User::new(draft), Err(UserValidationError::MissingRoomNumber));
    }

    #[rstest]
    fn warden_residence_is_optional(mut draft: UserDraft) {
        draft.role = Role::Warden;
        draft.floor_number = None;
        draft.room_number = None;
        let user = User::new(draft).expect("warden without residence");
        assert_eq!(user.role(), Role::Warden);
        assert!(user.room_number().is_none());
    }

    #[rstest]
    fn errors_name_their_field() {
        assert_eq!(UserValidationError::InvalidEmail.field(), "email");
        assert_eq!(UserValidationError::MissingRoomNumber.field(), "room_number");
        assert_eq!(UserValidationError::MissingFloorNumber.code(), "missing_field");
    }
}
