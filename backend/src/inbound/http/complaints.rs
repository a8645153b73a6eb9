//! Complaint HTTP handlers.
//!
//! ```text
//! GET    /api/complaints
//! POST   /api/complaints {"title":"Leaking Faucet","room":"201",...}
//! GET    /api/complaints/{id}
//! POST   /api/complaints/vote/{id}
//! PATCH  /api/complaints/{id} {"status":"Resolved"}
//! DELETE /api/complaints/{id}
//! ```
//!
//! Response bodies keep the field spelling the web client already consumes,
//! so snake_case and camelCase keys appear side by side.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::{AuthorSummary, ComplaintView};
use crate::domain::{Action, Complaint, NewComplaint, TriageUpdate, decide};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedActor;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, body_object, map_complaint_validation_error, parse_complaint_id, truthy_text,
    truthy_timestamp,
};

pub(crate) fn wire_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Author details expanded into list and detail responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorBody {
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<AuthorSummary> for AuthorBody {
    fn from(author: AuthorSummary) -> Self {
        Self {
            id: author.id.to_string(),
            username: author.username,
            email: author.email,
        }
    }
}

/// The complaint author: a bare id, or the expanded summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AuthorRef {
    Id(String),
    Summary(AuthorBody),
}

/// Complaint representation returned by every complaint endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintBody {
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub object_id: String,
    #[schema(format = "uuid")]
    pub id: String,
    /// Author id string, or `{_id, username, email}` on list and detail
    /// responses (`null` when the author no longer exists).
    pub user_id: Option<AuthorRef>,
    #[schema(format = "uuid")]
    pub hostel_id: String,
    pub title: String,
    pub room: String,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    /// `Submitted`, `In Progress` or `Resolved`.
    pub status: String,
    pub votes: usize,
    #[serde(rename = "votedBy")]
    pub voted_by: Vec<String>,
    #[serde(rename = "scheduledFor")]
    #[schema(format = "date-time")]
    pub scheduled_for: Option<String>,
    pub warden_comments: String,
    #[serde(rename = "createdAt")]
    #[schema(format = "date-time")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl ComplaintBody {
    fn with_author(complaint: &Complaint, user_id: Option<AuthorRef>) -> Self {
        Self {
            object_id: complaint.id().to_string(),
            id: complaint.id().to_string(),
            user_id,
            hostel_id: complaint.hostel_id().to_string(),
            title: complaint.title().to_owned(),
            room: complaint.room().to_owned(),
            category: complaint.category().to_owned(),
            description: complaint.description().to_owned(),
            image_url: complaint.image_url().map(str::to_owned),
            status: complaint.status().to_string(),
            votes: complaint.vote_count(),
            voted_by: complaint
                .voters()
                .as_slice()
                .iter()
                .map(ToString::to_string)
                .collect(),
            scheduled_for: complaint.scheduled_for().map(wire_timestamp),
            warden_comments: complaint.warden_comments().to_owned(),
            created_at: wire_timestamp(complaint.created_at()),
            updated_at: wire_timestamp(complaint.updated_at()),
        }
    }
}

impl From<&Complaint> for ComplaintBody {
    fn from(complaint: &Complaint) -> Self {
        Self::with_author(complaint, Some(AuthorRef::Id(complaint.author().to_string())))
    }
}

impl From<ComplaintView> for ComplaintBody {
    fn from(view: ComplaintView) -> Self {
        let author = view.author.map(|summary| AuthorRef::Summary(summary.into()));
        Self::with_author(&view.complaint, author)
    }
}

/// Fields accepted by `POST /api/complaints`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateComplaintRequest {
    pub title: String,
    pub room: String,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Fields accepted by `PATCH /api/complaints/{id}`; falsy values are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct TriageRequest {
    /// `Submitted`, `In Progress` or `Resolved`.
    pub status: Option<String>,
    pub warden_comments: Option<String>,
    /// RFC 3339 timestamp, `YYYY-MM-DD` date or epoch milliseconds.
    #[serde(rename = "scheduledFor")]
    pub scheduled_for: Option<String>,
}

/// Confirmation returned by `DELETE /api/complaints/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

fn parse_new_complaint(body: &Value) -> ApiResult<NewComplaint> {
    let body = body_object(body)?;
    let text = |name: &'static str| truthy_text(body, FieldName::new(name)).unwrap_or_default();
    let image_url = truthy_text(body, FieldName::new("image_url"));
    NewComplaint::try_from_parts(
        &text("title"),
        &text("room"),
        &text("category"),
        &text("description"),
        image_url.as_deref(),
    )
    .map_err(map_complaint_validation_error)
}

fn parse_triage_update(body: &Value) -> ApiResult<TriageUpdate> {
    let body = body_object(body)?;
    let status = truthy_text(body, FieldName::new("status"));
    let comments = truthy_text(body, FieldName::new("warden_comments"));
    let scheduled_for = truthy_timestamp(body, FieldName::new("scheduledFor"))?;
    TriageUpdate::from_inputs(status.as_deref(), comments.as_deref(), scheduled_for)
        .map_err(map_complaint_validation_error)
}

/// List complaints of the caller's hostel, newest first.
#[utoipa::path(
    get,
    path = "/api/complaints",
    responses(
        (status = 200, description = "Complaints of the caller's hostel", body = [ComplaintBody]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "listComplaints"
)]
#[get("")]
pub async fn list_complaints(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
) -> ApiResult<web::Json<Vec<ComplaintBody>>> {
    let views = state.complaints_query.list(&actor.into_inner()).await?;
    Ok(web::Json(views.into_iter().map(ComplaintBody::from).collect()))
}

/// File a complaint in the caller's hostel. Students only.
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintRequest,
    responses(
        (status = 201, description = "Complaint created", body = ComplaintBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Only students file complaints", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "createComplaint"
)]
#[post("")]
pub async fn create_complaint(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let actor = actor.into_inner();
    // Role gates precede path and body parsing.
    decide(&actor, Action::CreateComplaint).into_result()?;
    let content = parse_new_complaint(&payload)?;
    let complaint = state.complaints.create(&actor, content).await?;
    Ok(HttpResponse::Created().json(ComplaintBody::from(&complaint)))
}

/// Fetch one complaint of the caller's hostel.
#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    params(("id" = String, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint", body = ComplaintBody),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "getComplaint"
)]
#[get("/{id}")]
pub async fn get_complaint(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<String>,
) -> ApiResult<web::Json<ComplaintBody>> {
    let id = parse_complaint_id(&path)?;
    let view = state.complaints_query.get(&actor.into_inner(), &id).await?;
    Ok(web::Json(ComplaintBody::from(view)))
}

/// Endorse a complaint. Each user votes at most once.
#[utoipa::path(
    post,
    path = "/api/complaints/vote/{id}",
    params(("id" = String, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Vote recorded", body = ComplaintBody),
        (status = 400, description = "Already voted", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "voteComplaint"
)]
#[post("/vote/{id}")]
pub async fn vote_complaint(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<String>,
) -> ApiResult<web::Json<ComplaintBody>> {
    let id = parse_complaint_id(&path)?;
    let complaint = state.complaints.vote(&actor.into_inner(), &id).await?;
    Ok(web::Json(ComplaintBody::from(&complaint)))
}

/// Update status, comments or schedule. Wardens of the complaint's hostel only.
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}",
    params(("id" = String, Path, description = "Complaint id")),
    request_body = TriageRequest,
    responses(
        (status = 200, description = "Complaint updated", body = ComplaintBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Wardens only", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "updateComplaint"
)]
#[patch("/{id}")]
pub async fn update_complaint(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<ComplaintBody>> {
    let actor = actor.into_inner();
    decide(&actor, Action::ManageComplaints).into_result()?;
    let id = parse_complaint_id(&path)?;
    let update = parse_triage_update(&payload)?;
    let complaint = state.complaints.update_triage(&actor, &id, update).await?;
    Ok(web::Json(ComplaintBody::from(&complaint)))
}

/// Permanently remove a complaint. Wardens of the complaint's hostel only.
#[utoipa::path(
    delete,
    path = "/api/complaints/{id}",
    params(("id" = String, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint removed", body = DeleteResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Wardens only", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "deleteComplaint"
)]
#[delete("/{id}")]
pub async fn delete_complaint(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let actor = actor.into_inner();
    decide(&actor, Action::ManageComplaints).into_result()?;
    let id = parse_complaint_id(&path)?;
    state.complaints.delete(&actor, &id).await?;
    Ok(web::Json(DeleteResponse {
        success: true,
        message: "Complaint removed".to_owned(),
    }))
}

#[cfg(test)]
#[path = "complaints_tests.rs"]
mod tests;
