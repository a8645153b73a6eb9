//! Account HTTP handlers.
//!
//! ```text
//! POST /api/users/register {"email":"asha@hostel.edu","password":"hunter22",...}
//! POST /api/users/login {"email":"asha@hostel.edu","password":"hunter22"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatedAccount, Error, LoginCredentials, LoginValidationError, RegistrationForm,
    RegistrationRequest, RegistrationValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/users/register`.
///
/// Missing fields are reported by validation with the field name rather
/// than as a malformed body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// `Student` or `Warden`.
    pub role: Option<String>,
    #[schema(format = "uuid")]
    pub hostel_id: Option<String>,
    pub username: Option<String>,
    /// Required for students.
    pub floor_number: Option<i32>,
    /// Required for students.
    pub room_number: Option<String>,
}

/// Login body for `POST /api/users/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Account summary plus a bearer token, returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    #[schema(format = "uuid")]
    pub hostel_id: String,
    pub token: String,
}

impl From<AuthenticatedAccount> for AccountResponse {
    fn from(account: AuthenticatedAccount) -> Self {
        let AuthenticatedAccount { user, token } = account;
        Self {
            id: user.id().to_string(),
            username: user.display_name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            role: user.role().to_string(),
            hostel_id: user.hostel_id().to_string(),
            token: token.as_str().to_owned(),
        }
    }
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    Error::invalid_field(err.field(), err.code(), err.to_string())
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => {
            Error::invalid_field("email", "empty_email", "Please provide email and password")
        }
        LoginValidationError::EmptyPassword => {
            Error::invalid_field("password", "empty_password", "Please provide email and password")
        }
    }
}

/// Register a student or warden account.
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid request or duplicate email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let form = RegistrationForm {
        email: body.email.as_deref().unwrap_or_default(),
        password: body.password.as_deref().unwrap_or_default(),
        role: body.role.as_deref().unwrap_or_default(),
        hostel_id: body.hostel_id.as_deref().unwrap_or_default(),
        username: body.username.as_deref().unwrap_or_default(),
        floor_number: body.floor_number,
        room_number: body.room_number.as_deref(),
    };
    let request = RegistrationRequest::try_from_form(&form).map_err(map_registration_error)?;
    let account = state.accounts.register(request).await?;
    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid email or password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        body.email.as_deref().unwrap_or_default(),
        body.password.as_deref().unwrap_or_default(),
    )
    .map_err(map_login_validation_error)?;
    let account = state.accounts.login(credentials).await?;
    Ok(web::Json(AccountResponse::from(account)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
