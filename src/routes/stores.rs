use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::stores::{CreateStoreRequest, StoreDetail, StoreList, UpdateStoreRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Store,
    response::ApiResponse,
    routes::params::StoreQuery,
    services::store_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/store", get(list_stores))
        .route(
            "/store/{id}",
            get(store_detail)
                .put(update_store)
                .patch(update_store)
                .delete(delete_store),
        )
        .route("/create", post(create_store))
}

#[utoipa::path(
    get,
    path = "/store",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("category" = Option<Uuid>, Query, description = "Filter by category"),
        ("q" = Option<String>, Query, description = "Search by store name")
    ),
    responses(
        (status = 200, description = "List stores with rating stats", body = ApiResponse<StoreList>)
    ),
    tag = "Stores"
)]
pub async fn list_stores(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
) -> AppResult<Json<ApiResponse<StoreList>>> {
    let resp = store_service::list_stores(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/store/{id}",
    params(
        ("id" = Uuid, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Store detail with nested graph", body = ApiResponse<StoreDetail>),
        (status = 404, description = "Store not found"),
    ),
    tag = "Stores"
)]
pub async fn store_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<StoreDetail>>> {
    let resp = store_service::get_store_detail(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = CreateStoreRequest,
    responses(
        (status = 200, description = "Create store", body = ApiResponse<Store>),
        (status = 403, description = "Owner role required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn create_store(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateStoreRequest>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let resp = store_service::create_store(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/store/{id}",
    params(
        ("id" = Uuid, Path, description = "Store ID")
    ),
    request_body = UpdateStoreRequest,
    responses(
        (status = 200, description = "Update store", body = ApiResponse<Store>),
        (status = 403, description = "Owner role and ownership required"),
        (status = 404, description = "Store not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn update_store(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStoreRequest>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let resp = store_service::update_store(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/store/{id}",
    params(
        ("id" = Uuid, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Delete store"),
        (status = 403, description = "Owner role and ownership required"),
        (status = 404, description = "Store not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn delete_store(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = store_service::delete_store(&state, &user, id).await?;
    Ok(Json(resp))
}
