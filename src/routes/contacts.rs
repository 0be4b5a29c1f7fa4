use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::Contact,
    response::ApiResponse,
    routes::params::Pagination,
    services::contact_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateContactRequest {
    pub store_id: Uuid,
    pub phone: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateContactRequest {
    pub phone: String,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ContactList {
    pub items: Vec<Contact>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route(
            "/{id}",
            get(get_contact)
                .put(update_contact)
                .patch(update_contact)
                .delete(delete_contact),
        )
}

#[utoipa::path(get, path = "/contact", tag = "Contacts")]
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ContactList>>> {
    let resp = contact_service::list_contacts(&state.pool, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/contact/{id}", tag = "Contacts")]
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Contact>>> {
    let resp = contact_service::get_contact(&state.pool, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/contact",
    request_body = CreateContactRequest,
    responses(
        (status = 200, description = "Create store contact", body = ApiResponse<Contact>),
        (status = 403, description = "Store ownership required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
pub async fn create_contact(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateContactRequest>,
) -> AppResult<Json<ApiResponse<Contact>>> {
    let resp = contact_service::create_contact(&state.pool, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(put, path = "/contact/{id}", request_body = UpdateContactRequest, security(("bearer_auth" = [])), tag = "Contacts")]
pub async fn update_contact(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactRequest>,
) -> AppResult<Json<ApiResponse<Contact>>> {
    let resp = contact_service::update_contact(&state.pool, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/contact/{id}", security(("bearer_auth" = [])), tag = "Contacts")]
pub async fn delete_contact(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = contact_service::delete_contact(&state.pool, &user, id).await?;
    Ok(Json(resp))
}
