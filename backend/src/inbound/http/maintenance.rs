//! Maintenance schedule HTTP handler.
//!
//! ```text
//! GET /api/maintenance
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::MaintenanceCheck;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedActor;
use crate::inbound::http::complaints::wire_timestamp;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// One scheduled maintenance visit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceBody {
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub object_id: String,
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    /// `Pending` or `Completed`.
    pub status: String,
    #[serde(rename = "scheduledFor")]
    #[schema(format = "date-time")]
    pub scheduled_for: String,
    #[schema(format = "uuid")]
    pub hostel_id: String,
    #[serde(rename = "createdAt")]
    #[schema(format = "date-time")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<MaintenanceCheck> for MaintenanceBody {
    fn from(check: MaintenanceCheck) -> Self {
        Self {
            object_id: check.id.to_string(),
            id: check.id.to_string(),
            title: check.title,
            status: check.status.to_string(),
            scheduled_for: wire_timestamp(check.scheduled_for),
            hostel_id: check.hostel_id.to_string(),
            created_at: wire_timestamp(check.created_at),
            updated_at: wire_timestamp(check.updated_at),
        }
    }
}

/// Maintenance checks of the caller's hostel, soonest first.
#[utoipa::path(
    get,
    path = "/api/maintenance",
    responses(
        (status = 200, description = "Scheduled checks", body = [MaintenanceBody]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["maintenance"],
    operation_id = "listMaintenance"
)]
#[get("")]
pub async fn list_maintenance(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
) -> ApiResult<web::Json<Vec<MaintenanceBody>>> {
    let checks = state.maintenance.list(&actor.into_inner()).await?;
    Ok(web::Json(checks.into_iter().map(MaintenanceBody::from).collect()))
}
