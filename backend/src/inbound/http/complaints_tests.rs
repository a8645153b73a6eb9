//! Tests for complaint HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test};
use chrono::TimeDelta;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::error::json_config;
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{hostel, memory_ports, memory_ports_with_clock};
use crate::inbound::http::users::{AccountResponse, register};
use crate::test_support::{MutableClock, fixed_now};

fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .app_data(json_config())
        .service(web::scope("/api/users").service(register))
        .service(
            web::scope("/api/complaints")
                .service(list_complaints)
                .service(create_complaint)
                .service(vote_complaint)
                .service(get_complaint)
                .service(update_complaint)
                .service(delete_complaint),
        )
}

fn faucet_body() -> Value {
    json!({
        "title": "Leaking Faucet",
        "room": "201",
        "category": "Plumbing",
        "description": "Drips all night"
    })
}

fn registration(email: &str, role: &str, index: usize) -> Value {
    let mut body = json!({
        "email": email,
        "password": "hunter22",
        "role": role,
        "hostel_id": hostel(index).to_string(),
        "username": role,
    });
    if role == "Student" {
        body["floor_number"] = json!(2);
        body["room_number"] = json!("201");
    }
    body
}

fn authed(request: actix_test::TestRequest, token: &str) -> actix_test::TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}

macro_rules! call {
    ($app:expr, $request:expr) => {
        actix_test::call_service(&$app, $request.to_request()).await
    };
}

/// Register an account in hostel `$index` and evaluate to its token.
macro_rules! sign_up {
    ($app:expr, $email:expr, $role:expr, $index:expr) => {{
        let response = call!(
            $app,
            actix_test::TestRequest::post()
                .uri("/api/users/register")
                .set_json(registration($email, $role, $index))
        );
        assert_eq!(response.status(), StatusCode::CREATED);
        let account: AccountResponse = actix_test::read_body_json(response).await;
        account.token
    }};
}

/// File the standard complaint and evaluate to its body.
macro_rules! file_complaint {
    ($app:expr, $token:expr) => {{
        let response = call!(
            $app,
            authed(
                actix_test::TestRequest::post()
                    .uri("/api/complaints")
                    .set_json(faucet_body()),
                &$token
            )
        );
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: ComplaintBody = actix_test::read_body_json(response).await;
        body
    }};
}

fn error_code(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}

#[actix_web::test]
async fn student_files_complaint_with_own_vote() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let student = sign_up!(app, "asha@hostel.edu", "Student", 0);

    let created = file_complaint!(app, student);

    assert_eq!(created.status, "Submitted");
    assert_eq!(created.votes, 1);
    assert_eq!(created.voted_by.len(), 1);
    assert_eq!(created.object_id, created.id);
    assert_eq!(created.hostel_id, hostel(0).to_string());
    assert_eq!(created.warden_comments, "");
    assert!(created.scheduled_for.is_none());
    assert!(matches!(created.user_id, Some(AuthorRef::Id(ref id)) if *id == created.voted_by[0]));
}

#[actix_web::test]
async fn missing_title_names_the_field() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let student = sign_up!(app, "asha@hostel.edu", "Student", 0);
    let mut body = faucet_body();
    body["title"] = json!("");

    let response = call!(
        app,
        authed(
            actix_test::TestRequest::post()
                .uri("/api/complaints")
                .set_json(body),
            &student
        )
    );

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], json!("title"));
}

#[actix_web::test]
async fn warden_cannot_file_complaints() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let warden = sign_up!(app, "warden@hostel.edu", "Warden", 0);

    let response = call!(
        app,
        authed(
            actix_test::TestRequest::post()
                .uri("/api/complaints")
                .set_json(faucet_body()),
            &warden
        )
    );

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn warden_with_invalid_body_is_still_forbidden() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let warden = sign_up!(app, "warden@hostel.edu", "Warden", 0);

    let response = call!(
        app,
        authed(
            actix_test::TestRequest::post()
                .uri("/api/complaints")
                .set_json(json!({ "title": "" })),
            &warden
        )
    );

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_code(&body), Some("forbidden"));
}

#[actix_web::test]
async fn listing_expands_authors_and_is_hostel_scoped() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);
    let ravi = sign_up!(app, "ravi@hostel.edu", "Student", 1);
    let ours = file_complaint!(app, asha);
    file_complaint!(app, ravi);

    let response = call!(
        app,
        authed(
            actix_test::TestRequest::get().uri("/api/complaints"),
            &asha
        )
    );

    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<ComplaintBody> = actix_test::read_body_json(response).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, ours.id);
    match &listed[0].user_id {
        Some(AuthorRef::Summary(author)) => {
            assert_eq!(author.email, "asha@hostel.edu");
            assert_eq!(author.username, "Student");
        }
        other => panic!("expected expanded author, got {other:?}"),
    }
}

#[actix_web::test]
async fn other_hostel_cannot_see_or_vote() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);
    let ravi = sign_up!(app, "ravi@hostel.edu", "Student", 1);
    let complaint = file_complaint!(app, asha);

    let read = call!(
        app,
        authed(
            actix_test::TestRequest::get().uri(&format!("/api/complaints/{}", complaint.id)),
            &ravi
        )
    );
    let vote = call!(
        app,
        authed(
            actix_test::TestRequest::post()
                .uri(&format!("/api/complaints/vote/{}", complaint.id)),
            &ravi
        )
    );

    assert_eq!(read.status(), StatusCode::NOT_FOUND);
    assert_eq!(vote.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(read).await;
    assert_eq!(body["message"], json!("Complaint not found"));
}

#[actix_web::test]
async fn neighbour_vote_counts_once() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);
    let meera = sign_up!(app, "meera@hostel.edu", "Student", 0);
    let complaint = file_complaint!(app, asha);
    let uri = format!("/api/complaints/vote/{}", complaint.id);

    let first = call!(
        app,
        authed(actix_test::TestRequest::post().uri(&uri), &meera)
    );
    assert_eq!(first.status(), StatusCode::OK);
    let voted: ComplaintBody = actix_test::read_body_json(first).await;
    assert_eq!(voted.votes, 2);

    let second = call!(
        app,
        authed(actix_test::TestRequest::post().uri(&uri), &meera)
    );
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(error_code(&body), Some("already_voted"));
    assert_eq!(body["message"], json!("You have already voted"));
}

#[actix_web::test]
async fn warden_triage_merges_fields() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);
    let warden = sign_up!(app, "warden@hostel.edu", "Warden", 0);
    let complaint = file_complaint!(app, asha);
    let uri = format!("/api/complaints/{}", complaint.id);

    let scheduled = call!(
        app,
        authed(
            actix_test::TestRequest::patch().uri(&uri).set_json(json!({
                "status": "In Progress",
                "warden_comments": "Plumber booked",
                "scheduledFor": "2026-03-20T10:00:00Z"
            })),
            &warden
        )
    );
    assert_eq!(scheduled.status(), StatusCode::OK);

    let resolved = call!(
        app,
        authed(
            actix_test::TestRequest::patch()
                .uri(&uri)
                .set_json(json!({ "status": "Resolved", "warden_comments": "" })),
            &warden
        )
    );
    assert_eq!(resolved.status(), StatusCode::OK);
    let body: ComplaintBody = actix_test::read_body_json(resolved).await;
    assert_eq!(body.status, "Resolved");
    assert_eq!(body.warden_comments, "Plumber booked");
    assert_eq!(body.scheduled_for.as_deref(), Some("2026-03-20T10:00:00.000Z"));
}

#[rstest]
#[case(json!({ "status": "Closed" }), "status")]
#[case(json!({ "scheduledFor": "soon" }), "scheduledFor")]
#[actix_rt::test]
async fn invalid_triage_fields_are_rejected(#[case] patch: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);
    let warden = sign_up!(app, "warden@hostel.edu", "Warden", 0);
    let complaint = file_complaint!(app, asha);

    let response = call!(
        app,
        authed(
            actix_test::TestRequest::patch()
                .uri(&format!("/api/complaints/{}", complaint.id))
                .set_json(patch),
            &warden
        )
    );

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], json!(field));
}

#[actix_web::test]
async fn students_cannot_triage_or_delete() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);
    let complaint = file_complaint!(app, asha);
    let uri = format!("/api/complaints/{}", complaint.id);

    let patch = call!(
        app,
        authed(
            actix_test::TestRequest::patch()
                .uri(&uri)
                .set_json(json!({ "status": "Resolved" })),
            &asha
        )
    );
    let delete = call!(
        app,
        authed(actix_test::TestRequest::delete().uri(&uri), &asha)
    );

    assert_eq!(patch.status(), StatusCode::FORBIDDEN);
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case("not-a-uuid", json!({ "status": "Resolved" }))]
#[case("6f1d1b1e-0a59-4a8e-9e4d-7c1c2a0000ff", json!({ "status": "Closed" }))]
#[case("not-a-uuid", json!({ "scheduledFor": "soon" }))]
#[actix_rt::test]
async fn student_triage_is_forbidden_before_validation(#[case] id: &str, #[case] patch: Value) {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);
    let uri = format!("/api/complaints/{id}");

    let patched = call!(
        app,
        authed(actix_test::TestRequest::patch().uri(&uri).set_json(patch), &asha)
    );
    let deleted = call!(
        app,
        authed(actix_test::TestRequest::delete().uri(&uri), &asha)
    );

    assert_eq!(patched.status(), StatusCode::FORBIDDEN);
    assert_eq!(deleted.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn warden_deletes_complaint() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);
    let warden = sign_up!(app, "warden@hostel.edu", "Warden", 0);
    let complaint = file_complaint!(app, asha);
    let uri = format!("/api/complaints/{}", complaint.id);

    let removed = call!(
        app,
        authed(actix_test::TestRequest::delete().uri(&uri), &warden)
    );
    assert_eq!(removed.status(), StatusCode::OK);
    let body: DeleteResponse = actix_test::read_body_json(removed).await;
    assert!(body.success);
    assert_eq!(body.message, "Complaint removed");

    let again = call!(
        app,
        authed(actix_test::TestRequest::get().uri(&uri), &asha)
    );
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_id_is_not_found() {
    let app = actix_test::init_service(test_app(memory_ports())).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);

    let response = call!(
        app,
        authed(
            actix_test::TestRequest::get().uri("/api/complaints/not-a-uuid"),
            &asha
        )
    );

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let app = actix_test::init_service(test_app(memory_ports())).await;

    let response = call!(app, actix_test::TestRequest::get().uri("/api/complaints"));

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn token_expires_after_thirty_days() {
    let clock = Arc::new(MutableClock::new(fixed_now()));
    let app = actix_test::init_service(test_app(memory_ports_with_clock(clock.clone()))).await;
    let asha = sign_up!(app, "asha@hostel.edu", "Student", 0);

    clock.advance(TimeDelta::days(29));
    let fresh = call!(
        app,
        authed(
            actix_test::TestRequest::get().uri("/api/complaints"),
            &asha
        )
    );
    assert_eq!(fresh.status(), StatusCode::OK);

    clock.advance(TimeDelta::days(2));
    let stale = call!(
        app,
        authed(
            actix_test::TestRequest::get().uri("/api/complaints"),
            &asha
        )
    );
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);
}
