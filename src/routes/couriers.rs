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
    models::Courier,
    response::ApiResponse,
    routes::params::Pagination,
    services::courier_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourierRequest {
    pub user_id: Uuid,
    pub current_order_id: Uuid,
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCourierRequest {
    pub current_order_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct CourierList {
    pub items: Vec<Courier>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_couriers).post(create_courier))
        .route(
            "/{id}",
            get(get_courier)
                .put(update_courier)
                .patch(update_courier)
                .delete(delete_courier),
        )
}

#[utoipa::path(
    get,
    path = "/courier",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List couriers", body = ApiResponse<CourierList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Couriers"
)]
pub async fn list_couriers(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CourierList>>> {
    let resp = courier_service::list_couriers(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/courier/{id}", security(("bearer_auth" = [])), tag = "Couriers")]
pub async fn get_courier(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Courier>>> {
    let resp = courier_service::get_courier(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/courier",
    request_body = CreateCourierRequest,
    responses(
        (status = 200, description = "Create courier", body = ApiResponse<Courier>),
        (status = 400, description = "Invalid status, user or order"),
    ),
    security(("bearer_auth" = [])),
    tag = "Couriers"
)]
pub async fn create_courier(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCourierRequest>,
) -> AppResult<Json<ApiResponse<Courier>>> {
    let resp = courier_service::create_courier(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(put, path = "/courier/{id}", request_body = UpdateCourierRequest, security(("bearer_auth" = [])), tag = "Couriers")]
pub async fn update_courier(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourierRequest>,
) -> AppResult<Json<ApiResponse<Courier>>> {
    let resp = courier_service::update_courier(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/courier/{id}", security(("bearer_auth" = [])), tag = "Couriers")]
pub async fn delete_courier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = courier_service::delete_courier(&state, &user, id).await?;
    Ok(Json(resp))
}
