//! Builders for HTTP state ports.
//!
//! Each service is generic over its repositories, so the PostgreSQL and
//! in-memory wirings share [`ports_from_repositories`] and differ only in the
//! adapters handed to it.

use std::sync::Arc;

use actix_web::web;
use chrono::TimeDelta;
use mockable::{Clock, DefaultClock};

use hostel_backend::domain::ports::{
    ComplaintRepository, HostelRepository, MaintenanceRepository, UserRepository,
};
use hostel_backend::domain::{AccountService, ComplaintService, MaintenanceService};
use hostel_backend::inbound::http::state::{HttpState, HttpStatePorts};
use hostel_backend::outbound::memory::{
    MemoryComplaintRepository, MemoryHostelRepository, MemoryMaintenanceRepository,
    MemoryUserRepository,
};
use hostel_backend::outbound::persistence::{
    DbPool, DieselComplaintRepository, DieselHostelRepository, DieselMaintenanceRepository,
    DieselUserRepository,
};
use hostel_backend::outbound::security::{Argon2PasswordHasher, JwtSessionTokenService};

use super::ServerConfig;

/// Repository adapters for one storage backend.
struct Repositories<U, H, C, M> {
    users: Arc<U>,
    hostels: Arc<H>,
    complaints: Arc<C>,
    maintenance: Arc<M>,
}

/// Token signing inputs shared by both wirings.
struct TokenInputs<'a> {
    secret: &'a [u8],
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

fn ports_from_repositories<U, H, C, M>(
    repos: Repositories<U, H, C, M>,
    token: TokenInputs<'_>,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    H: HostelRepository + 'static,
    C: ComplaintRepository + 'static,
    M: MaintenanceRepository + 'static,
{
    let tokens = Arc::new(JwtSessionTokenService::new(
        token.secret,
        token.ttl,
        Arc::clone(&token.clock),
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::clone(&repos.users),
        repos.hostels,
        Arc::new(Argon2PasswordHasher::new()),
        tokens,
    ));
    let complaints = Arc::new(ComplaintService::new(
        repos.complaints,
        repos.users,
        token.clock,
    ));
    HttpStatePorts {
        accounts: accounts.clone(),
        actors: accounts,
        complaints: complaints.clone(),
        complaints_query: complaints,
        maintenance: Arc::new(MaintenanceService::new(repos.maintenance)),
    }
}

fn database_ports(pool: &DbPool, token: TokenInputs<'_>) -> HttpStatePorts {
    ports_from_repositories(
        Repositories {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            hostels: Arc::new(DieselHostelRepository::new(pool.clone())),
            complaints: Arc::new(DieselComplaintRepository::new(pool.clone())),
            maintenance: Arc::new(DieselMaintenanceRepository::new(pool.clone())),
        },
        token,
    )
}

fn memory_ports(token: TokenInputs<'_>) -> HttpStatePorts {
    ports_from_repositories(
        Repositories {
            users: Arc::new(MemoryUserRepository::default()),
            hostels: Arc::new(MemoryHostelRepository::default()),
            complaints: Arc::new(MemoryComplaintRepository::default()),
            maintenance: Arc::new(MemoryMaintenanceRepository::default()),
        },
        token,
    )
}

/// Build the shared HTTP state, selecting PostgreSQL adapters when a pool is
/// configured and in-memory adapters otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let token = TokenInputs {
        secret: config.token.secret(),
        ttl: config.token_ttl,
        clock: Arc::new(DefaultClock),
    };
    let ports = match &config.db_pool {
        Some(pool) => database_ports(pool, token),
        None => memory_ports(token),
    };
    web::Data::new(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_backend::domain::{
        ErrorCode, LoginCredentials, RegistrationForm, RegistrationRequest,
    };
    use hostel_backend::outbound::memory::reference_hostels;
    use rstest::rstest;

    fn token_inputs() -> TokenInputs<'static> {
        TokenInputs {
            secret: b"state-builder-secret-state-build",
            ttl: TimeDelta::days(30),
            clock: Arc::new(DefaultClock),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn memory_ports_share_one_user_store() {
        let ports = memory_ports(token_inputs());
        let hostel = reference_hostels()[0].id().to_string();
        let request = RegistrationRequest::try_from_form(&RegistrationForm {
            email: "warden@hostel.edu",
            password: "hunter22",
            role: "Warden",
            hostel_id: &hostel,
            username: "Warden",
            floor_number: None,
            room_number: None,
        })
        .expect("valid registration");

        let registered = ports.accounts.register(request).await.expect("registers");
        let actor = ports
            .actors
            .resolve(registered.token.as_str())
            .await
            .expect("token resolves against the same store");
        let listed = ports.complaints_query.list(&actor).await.expect("lists");
        let login = ports
            .accounts
            .login(LoginCredentials::try_from_parts("warden@hostel.edu", "hunter22").expect("creds"))
            .await;

        assert_eq!(actor.user_id, registered.user.id());
        assert!(listed.is_empty());
        assert!(login.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_tokens_are_rejected() {
        let ports = memory_ports(token_inputs());

        let err = ports.actors.resolve("not-a-token").await.expect_err("garbage");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
