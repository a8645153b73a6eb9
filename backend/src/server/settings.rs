//! Server settings loaded via OrthoConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::TimeDelta;
use hostel_backend::outbound::security::DEFAULT_TOKEN_TTL_DAYS;
use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Longest accepted token lifetime; larger values fall back to the default.
const MAX_TOKEN_TTL_DAYS: i64 = 3650;

/// Listener, storage and token lifetime settings.
///
/// Every field can be set with a `HOSTEL_`-prefixed environment variable or
/// the matching command-line flag.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOSTEL")]
pub struct ServerSettings {
    /// Address to bind, `0.0.0.0` when unset.
    pub bind_addr: Option<IpAddr>,
    /// TCP port.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// PostgreSQL URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Bearer token lifetime in days.
    #[ortho_config(default = 30)]
    pub token_ttl_days: i64,
}

impl ServerSettings {
    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.bind_addr.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port,
        )
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Lifetime of issued bearer tokens; values outside one day to ten
    /// years fall back to the default.
    pub fn token_ttl(&self) -> TimeDelta {
        let days = if (1..=MAX_TOKEN_TTL_DAYS).contains(&self.token_ttl_days) {
            self.token_ttl_days
        } else {
            DEFAULT_TOKEN_TTL_DAYS
        };
        TimeDelta::days(days)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("hostel-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("HOSTEL_BIND_ADDR", None::<String>),
            ("HOSTEL_PORT", None::<String>),
            ("HOSTEL_DATABASE_URL", None::<String>),
            ("HOSTEL_TOKEN_TTL_DAYS", None::<String>),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.socket_addr(), "0.0.0.0:5000".parse().expect("addr"));
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.token_ttl(), TimeDelta::days(30));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("HOSTEL_BIND_ADDR", Some("127.0.0.1".to_owned())),
            ("HOSTEL_PORT", Some("8081".to_owned())),
            (
                "HOSTEL_DATABASE_URL",
                Some("postgres://localhost/hostel".to_owned()),
            ),
            ("HOSTEL_TOKEN_TTL_DAYS", Some("7".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.socket_addr(), "127.0.0.1:8081".parse().expect("addr"));
        assert_eq!(settings.database_url(), Some("postgres://localhost/hostel"));
        assert_eq!(settings.token_ttl(), TimeDelta::days(7));
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    #[case(MAX_TOKEN_TTL_DAYS + 1)]
    #[case(100_000_000)]
    #[case(i64::MAX)]
    fn unusable_ttl_falls_back_to_default(#[case] days: i64) {
        let settings = ServerSettings {
            bind_addr: None,
            port: 5000,
            database_url: Some("   ".to_owned()),
            token_ttl_days: days,
        };

        assert_eq!(settings.token_ttl(), TimeDelta::days(DEFAULT_TOKEN_TTL_DAYS));
        assert_eq!(settings.database_url(), None);
    }
}
