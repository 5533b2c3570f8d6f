//! Application API handlers.
//!
//! ```text
//! POST   /apply              Submit an application
//! GET    /applications       List applications, newest first
//! GET    /applications/{id}  Fetch one application
//! PUT    /applications/{id}  Update an application
//! DELETE /applications/{id}  Delete one application
//! DELETE /applications       Delete every application
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Application, ApplicationDetails, ApplicationId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Envelope for a stored application plus a confirmation message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The stored record.
    pub application: Application,
}

/// Envelope for simple confirmations.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Envelope for the bulk delete confirmation.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// How many records were removed.
    pub deleted_count: u64,
}

/// Submit a new application.
#[utoipa::path(
    post,
    path = "/apply",
    request_body = ApplicationDetails,
    responses(
        (status = 201, description = "Application stored", body = ApplicationResponse),
        (status = 400, description = "Missing required fields or duplicate submission", body = crate::domain::Error),
        (status = 500, description = "Notification dispatch or server failure", body = crate::domain::Error)
    ),
    tags = ["applications"],
    operation_id = "submitApplication",
    security([])
)]
#[post("/apply")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    payload: web::Json<ApplicationDetails>,
) -> ApiResult<HttpResponse> {
    let application = state.applications.submit(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApplicationResponse {
        message: "Application submitted successfully!".to_owned(),
        application,
    }))
}

/// List every application, newest first.
#[utoipa::path(
    get,
    path = "/applications",
    responses(
        (status = 200, description = "Applications", body = [Application]),
        (status = 500, description = "Server failure", body = crate::domain::Error)
    ),
    tags = ["applications"],
    operation_id = "listApplications",
    security([])
)]
#[get("/applications")]
pub async fn list_applications(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Application>>> {
    Ok(web::Json(state.applications.list().await?))
}

/// Fetch one application by id.
#[utoipa::path(
    get,
    path = "/applications/{id}",
    params(("id" = Uuid, Path, description = "Application identifier")),
    responses(
        (status = 200, description = "Application", body = Application),
        (status = 404, description = "No such application", body = crate::domain::Error)
    ),
    tags = ["applications"],
    operation_id = "getApplication",
    security([])
)]
#[get("/applications/{id}")]
pub async fn get_application(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<Application>> {
    let application = state
        .applications
        .get(ApplicationId::new(id.into_inner()))
        .await?;
    Ok(web::Json(application))
}

/// Overlay fields onto an existing application.
#[utoipa::path(
    put,
    path = "/applications/{id}",
    params(("id" = Uuid, Path, description = "Application identifier")),
    request_body = ApplicationDetails,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 400, description = "Update collides with another submission", body = crate::domain::Error),
        (status = 404, description = "No such application", body = crate::domain::Error)
    ),
    tags = ["applications"],
    operation_id = "updateApplication",
    security([])
)]
#[put("/applications/{id}")]
pub async fn update_application(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<ApplicationDetails>,
) -> ApiResult<HttpResponse> {
    let application = state
        .applications
        .update(ApplicationId::new(id.into_inner()), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApplicationResponse {
        message: "Application updated successfully".to_owned(),
        application,
    }))
}

/// Delete one application.
#[utoipa::path(
    delete,
    path = "/applications/{id}",
    params(("id" = Uuid, Path, description = "Application identifier")),
    responses(
        (status = 200, description = "Application deleted", body = MessageResponse),
        (status = 404, description = "No such application", body = crate::domain::Error)
    ),
    tags = ["applications"],
    operation_id = "deleteApplication",
    security([])
)]
#[delete("/applications/{id}")]
pub async fn delete_application(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .applications
        .delete(ApplicationId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Application deleted successfully".to_owned(),
    }))
}

/// Delete every application. Zero matches is still a success.
#[utoipa::path(
    delete,
    path = "/applications",
    responses(
        (status = 200, description = "Applications purged", body = BulkDeleteResponse),
        (status = 500, description = "Server failure", body = crate::domain::Error)
    ),
    tags = ["applications"],
    operation_id = "deleteAllApplications",
    security([])
)]
#[delete("/applications")]
pub async fn delete_all_applications(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let deleted_count = state.applications.delete_all().await?;
    Ok(HttpResponse::Ok().json(BulkDeleteResponse {
        message: "All applications deleted".to_owned(),
        deleted_count,
    }))
}
