//! HS256 JWT implementation of the [`SessionTokenService`] port.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SessionTokenError, SessionTokenService};
use crate::domain::{SessionToken, UserId};

/// Token lifetime used when no override is configured.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates HS256-signed tokens carrying the user id as `sub`.
///
/// Expiry is checked against the injected clock with zero leeway rather than
/// the library's wall-clock check.
#[derive(Clone)]
pub struct JwtSessionTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtSessionTokenService {
    /// Create a service signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: &[u8], ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }
}

impl SessionTokenService for JwtSessionTokenService {
    fn issue(&self, user_id: &UserId) -> Result<SessionToken, SessionTokenError> {
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| SessionTokenError::signing("token expiry is out of range"))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(SessionToken::new)
            .map_err(|err| SessionTokenError::signing(err.to_string()))
    }

    fn validate(&self, token: &str) -> Result<UserId, SessionTokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| SessionTokenError::Invalid)?;
        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(SessionTokenError::Expired);
        }
        UserId::new(&data.claims.sub).map_err(|_| SessionTokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MutableClock, fixed_now};
    use rstest::rstest;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn service(clock: Arc<MutableClock>) -> JwtSessionTokenService {
        JwtSessionTokenService::new(SECRET, TimeDelta::days(DEFAULT_TOKEN_TTL_DAYS), clock)
    }

    #[rstest]
    fn issued_token_names_its_user() {
        let tokens = service(Arc::new(MutableClock::new(fixed_now())));
        let user = UserId::random();

        let token = tokens.issue(&user).expect("token issued");

        assert_eq!(tokens.validate(token.as_str()).expect("valid"), user);
    }

    #[rstest]
    #[case(TimeDelta::days(29), true)]
    #[case(TimeDelta::days(30), false)]
    #[case(TimeDelta::days(31), false)]
    fn token_expires_after_ttl(#[case] elapsed: TimeDelta, #[case] accepted: bool) {
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let tokens = service(Arc::clone(&clock));
        let token = tokens.issue(&UserId::random()).expect("token issued");

        clock.advance(elapsed);
        let result = tokens.validate(token.as_str());

        if accepted {
            assert!(result.is_ok());
        } else {
            assert_eq!(result, Err(SessionTokenError::Expired));
        }
    }

    #[rstest]
    fn unrepresentable_expiry_is_a_signing_error() {
        let ttl = TimeDelta::try_days(100_000_000).expect("fits in a TimeDelta");
        let tokens =
            JwtSessionTokenService::new(SECRET, ttl, Arc::new(MutableClock::new(fixed_now())));

        let result = tokens.issue(&UserId::random());

        assert!(matches!(result, Err(SessionTokenError::Signing { .. })));
    }

    #[rstest]
    fn token_signed_with_other_secret_is_invalid() {
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let foreign = JwtSessionTokenService::new(
            b"another-secret-another-secret-xx",
            TimeDelta::days(1),
            clock.clone(),
        );
        let token = foreign.issue(&UserId::random()).expect("token issued");

        let result = service(clock).validate(token.as_str());

        assert_eq!(result, Err(SessionTokenError::Invalid));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    fn garbage_is_invalid(#[case] token: &str) {
        let tokens = service(Arc::new(MutableClock::new(fixed_now())));

        assert_eq!(tokens.validate(token), Err(SessionTokenError::Invalid));
    }
}
