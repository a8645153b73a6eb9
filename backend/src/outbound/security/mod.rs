//! Credential adapters: password hashing and signed session tokens.

mod argon2_password_hasher;
mod jwt_session_token_service;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_session_token_service::{DEFAULT_TOKEN_TTL_DAYS, JwtSessionTokenService};
