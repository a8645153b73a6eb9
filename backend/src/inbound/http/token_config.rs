//! Bearer token configuration parsing and validation.
//!
//! The signing secret comes from a mounted file so it never appears in the
//! process environment. Settings are validated consistently here and can be
//! tested in isolation.

pub mod fingerprint;

use rand::RngCore;
use std::path::PathBuf;
use tracing::warn;
use zeroize::Zeroizing;

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Environment lookup used by [`token_settings_from_env`].
pub trait TokenEnv {
    /// Value of `name`, or `None` when unset or not valid Unicode.
    fn string(&self, name: &str) -> Option<String>;
}

/// [`TokenEnv`] backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl TokenEnv for ProcessEnv {
    fn string(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid toggles and a real secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hostel_backend::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Token settings derived from configuration.
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    ephemeral: bool,
}

impl TokenSettings {
    /// HMAC signing secret.
    #[must_use]
    pub fn secret(&self) -> &[u8] {
        self.secret.as_slice()
    }

    /// Whether the secret was generated for this process only, so tokens do
    /// not survive a restart.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Loggable fingerprint of the signing secret.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        fingerprint::secret_fingerprint(self.secret())
    }
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("fingerprint", &self.fingerprint())
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file exists but is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not sign tokens with a throwaway secret.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use hostel_backend::inbound::http::token_config::{
///     BuildMode, TokenEnv, token_settings_from_env,
/// };
///
/// struct Fixed(String);
///
/// impl TokenEnv for Fixed {
///     fn string(&self, name: &str) -> Option<String> {
///         match name {
///             "TOKEN_SECRET_FILE" => Some(self.0.clone()),
///             "TOKEN_ALLOW_EPHEMERAL" => Some("0".to_string()),
///             _ => None,
///         }
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let secret_path = std::env::temp_dir().join("token_secret_example");
/// std::fs::write(&secret_path, vec![b'a'; 32])?;
///
/// let env = Fixed(secret_path.to_string_lossy().to_string());
/// let settings = token_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.secret().len(), 32);
/// assert!(!settings.is_ephemeral());
/// # Ok(())
/// # }
/// ```
pub fn token_settings_from_env<E: TokenEnv>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    secret_from_env(env, mode, allow_ephemeral)
}

fn allow_ephemeral_from_env<E: TokenEnv>(
    env: &E,
    mode: BuildMode,
) -> Result<bool, TokenConfigError> {
    match env.string(ALLOW_EPHEMERAL_ENV) {
        Some(value) => match parse_bool(&value) {
            Some(true) if mode.is_debug() => Ok(true),
            Some(true) => Err(TokenConfigError::EphemeralNotAllowed),
            Some(false) => Ok(false),
            None if mode.is_debug() => {
                warn!(
                    value = %value,
                    "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled"
                );
                Ok(false)
            }
            None => Err(TokenConfigError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                value,
                expected: BOOL_EXPECTED,
            }),
        },
        None if mode.is_debug() => {
            warn!("TOKEN_ALLOW_EPHEMERAL not set; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::MissingEnv {
            name: ALLOW_EPHEMERAL_ENV,
        }),
    }
}

fn secret_from_env<E: TokenEnv>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<TokenSettings, TokenConfigError> {
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_string()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => {
            let secret = Zeroizing::new(bytes);
            let length = secret.len();
            if mode == BuildMode::Release && length < TOKEN_SECRET_MIN_LEN {
                return Err(TokenConfigError::SecretTooShort {
                    path,
                    length,
                    min_len: TOKEN_SECRET_MIN_LEN,
                });
            }
            Ok(TokenSettings {
                secret,
                ephemeral: false,
            })
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary token secret (dev only)"
            );
            let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
            rand::rngs::OsRng.fill_bytes(secret.as_mut_slice());
            Ok(TokenSettings {
                secret,
                ephemeral: true,
            })
        }
        Err(error) => Err(TokenConfigError::SecretRead {
            path,
            source: error,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
