//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers take an [`AuthenticatedActor`] argument; the extractor reads the
//! `Authorization: Bearer <token>` header and asks the [`ActorResolver`]
//! port in [`HttpState`] who is calling.
//!
//! [`ActorResolver`]: crate::domain::ports::ActorResolver

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Actor, Error};
use crate::inbound::http::state::HttpState;

const NO_TOKEN: &str = "Not authorized, no token";

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor(pub Actor);

impl AuthenticatedActor {
    /// Unwrap the resolved actor.
    #[must_use]
    pub fn into_inner(self) -> Actor {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl FromRequest for AuthenticatedActor {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req);
        let path = req.path().to_owned();
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let Some(token) = token else {
                warn!(%path, "request without bearer token");
                return Err(Error::unauthorized(NO_TOKEN).into());
            };
            let actor = state.actors.resolve(&token).await?;
            Ok(Self(actor))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::MockActorResolver;
    use crate::domain::{HostelId, Role, UserId};
    use crate::inbound::http::test_utils::memory_ports;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    fn resolved_actor() -> Actor {
        Actor {
            user_id: UserId::random(),
            role: Role::Warden,
            hostel_id: HostelId::random(),
        }
    }

    fn state_with(resolver: MockActorResolver) -> web::Data<HttpState> {
        let mut ports = memory_ports();
        ports.actors = Arc::new(resolver);
        web::Data::new(HttpState::new(ports))
    }

    async fn whoami(actor: AuthenticatedActor) -> HttpResponse {
        HttpResponse::Ok().body(actor.into_inner().user_id.to_string())
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Bearer   "))]
    #[actix_web::test]
    async fn missing_bearer_token_is_unauthorised(#[case] header: Option<&str>) {
        let mut resolver = MockActorResolver::new();
        resolver.expect_resolve().times(0);
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(resolver))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let mut request = actix_test::TestRequest::get().uri("/me");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("message").and_then(Value::as_str), Some(NO_TOKEN));
    }

    #[actix_web::test]
    async fn resolver_receives_token_and_yields_actor() {
        let actor = resolved_actor();
        let mut resolver = MockActorResolver::new();
        resolver
            .expect_resolve()
            .withf(|token| token == "abc.def.ghi")
            .times(1)
            .return_once(move |_| Ok(actor));
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(resolver))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/me")
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        assert_eq!(body, actor.user_id.to_string());
    }

    #[actix_web::test]
    async fn resolver_rejection_is_forwarded() {
        let mut resolver = MockActorResolver::new();
        resolver
            .expect_resolve()
            .return_once(|_| Err(Error::unauthorized("Not authorized, token expired")));
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(resolver))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/me")
            .insert_header((AUTHORIZATION, "Bearer stale"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Not authorized, token expired")
        );
    }
}
