use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::users::{UpdateUserRequest, UserProfile, UserProfileList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_profiles)).route(
        "/{id}",
        get(get_profile)
            .put(update_profile)
            .patch(update_profile)
            .delete(delete_profile),
    )
}

#[utoipa::path(
    get,
    path = "/user",
    responses(
        (status = 200, description = "The requester's own profile", body = ApiResponse<UserProfileList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_profiles(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserProfileList>>> {
    let resp = user_service::list_profiles(&state.pool, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/user/{id}", security(("bearer_auth" = [])), tag = "Users")]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let resp = user_service::get_profile(&state.pool, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(put, path = "/user/{id}", request_body = UpdateUserRequest, security(("bearer_auth" = [])), tag = "Users")]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let resp = user_service::update_profile(&state.pool, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/user/{id}", security(("bearer_auth" = [])), tag = "Users")]
pub async fn delete_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::delete_profile(&state.pool, &user, id).await?;
    Ok(Json(resp))
}
