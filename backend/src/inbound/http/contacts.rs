//! Contact API handlers.
//!
//! ```text
//! POST /contact   Submit a contact message
//! GET  /contacts  List contact messages, newest first
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;

use crate::domain::{Contact, ContactDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Envelope for a stored contact message plus a confirmation.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The stored record.
    pub contact: Contact,
}

/// Submit a new contact message.
#[utoipa::path(
    post,
    path = "/contact",
    request_body = ContactDraft,
    responses(
        (status = 201, description = "Contact stored", body = ContactResponse),
        (status = 400, description = "Missing email or message", body = crate::domain::Error),
        (status = 500, description = "Server failure", body = crate::domain::Error)
    ),
    tags = ["contacts"],
    operation_id = "submitContact",
    security([])
)]
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactDraft>,
) -> ApiResult<HttpResponse> {
    let contact = state.contacts.submit(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(ContactResponse {
        message: "Contact info submitted!".to_owned(),
        contact,
    }))
}

/// List every contact message, newest first.
#[utoipa::path(
    get,
    path = "/contacts",
    responses(
        (status = 200, description = "Contacts", body = [Contact]),
        (status = 500, description = "Server failure", body = crate::domain::Error)
    ),
    tags = ["contacts"],
    operation_id = "listContacts",
    security([])
)]
#[get("/contacts")]
pub async fn list_contacts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Contact>>> {
    Ok(web::Json(state.contacts.list().await?))
}
