use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    error::{ApiJson, ApiPath, AppError, AppResult},
    state::AppState,
};

use super::dto::{
    ContactBody, ContactCreatedResponse, ContactListResponse, CreateContactRequest,
    MessageResponse,
};
use super::repo::Contact;

pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/:id", delete(delete_contact))
}

#[instrument(skip(state, payload))]
pub async fn create_contact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<CreateContactRequest>,
) -> AppResult<(StatusCode, Json<ContactCreatedResponse>)> {
    if payload.name.trim().is_empty() || payload.phone.trim().is_empty() {
        return Err(AppError::BadRequest("name and phone are required".into()));
    }

    let contact = Contact::create(&state.db, user_id, &payload.name, &payload.phone).await?;

    info!(user_id, contact_id = contact.id, "contact created");
    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            msg: "Contact created",
            contact: ContactBody {
                name: contact.name,
                phone: contact.phone,
            },
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_contacts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<ContactListResponse>> {
    let contacts = Contact::list_by_user(&state.db, user_id).await?;
    Ok(Json(ContactListResponse {
        contacts: contacts.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_contact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !Contact::delete_owned(&state.db, user_id, id).await? {
        warn!(user_id, contact_id = id, "contact not found");
        return Err(AppError::NotFound("Contact not found".into()));
    }

    info!(user_id, contact_id = id, "contact deleted");
    Ok(Json(MessageResponse {
        msg: "Contact deleted",
    }))
}
