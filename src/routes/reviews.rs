use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::reviews::{
        CourierReviewList, CreateCourierReviewRequest, CreateStoreReviewRequest,
        StoreReviewDisplay, StoreReviewList, UpdateCourierReviewRequest, UpdateStoreReviewRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{CourierReview, StoreReview},
    response::ApiResponse,
    routes::params::Pagination,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/store_review",
            get(list_store_reviews).post(create_store_review),
        )
        .route(
            "/store_review/{id}",
            get(get_store_review)
                .put(update_store_review)
                .patch(update_store_review)
                .delete(delete_store_review),
        )
        .route(
            "/courier_review",
            get(list_courier_reviews).post(create_courier_review),
        )
        .route(
            "/courier_review/{id}",
            get(get_courier_review)
                .put(update_courier_review)
                .patch(update_courier_review)
                .delete(delete_courier_review),
        )
}

#[utoipa::path(
    get,
    path = "/store_review",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List store reviews", body = ApiResponse<StoreReviewList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn list_store_reviews(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<StoreReviewList>>> {
    let resp = review_service::list_store_reviews(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/store_review/{id}", security(("bearer_auth" = [])), tag = "Reviews")]
pub async fn get_store_review(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<StoreReviewDisplay>>> {
    let resp = review_service::get_store_review(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/store_review",
    request_body = CreateStoreReviewRequest,
    responses(
        (status = 200, description = "Create store review", body = ApiResponse<StoreReview>),
        (status = 400, description = "Rating out of range or store missing"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn create_store_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateStoreReviewRequest>,
) -> AppResult<Json<ApiResponse<StoreReview>>> {
    let resp = review_service::create_store_review(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(put, path = "/store_review/{id}", request_body = UpdateStoreReviewRequest, security(("bearer_auth" = [])), tag = "Reviews")]
pub async fn update_store_review(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStoreReviewRequest>,
) -> AppResult<Json<ApiResponse<StoreReview>>> {
    let resp = review_service::update_store_review(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/store_review/{id}", security(("bearer_auth" = [])), tag = "Reviews")]
pub async fn delete_store_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = review_service::delete_store_review(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/courier_review",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List courier reviews", body = ApiResponse<CourierReviewList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn list_courier_reviews(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CourierReviewList>>> {
    let resp = review_service::list_courier_reviews(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/courier_review/{id}", security(("bearer_auth" = [])), tag = "Reviews")]
pub async fn get_courier_review(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CourierReview>>> {
    let resp = review_service::get_courier_review(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/courier_review",
    request_body = CreateCourierReviewRequest,
    responses(
        (status = 200, description = "Create courier review", body = ApiResponse<CourierReview>),
        (status = 400, description = "Rating out of range or courier missing"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn create_courier_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCourierReviewRequest>,
) -> AppResult<Json<ApiResponse<CourierReview>>> {
    let resp = review_service::create_courier_review(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(put, path = "/courier_review/{id}", request_body = UpdateCourierReviewRequest, security(("bearer_auth" = [])), tag = "Reviews")]
pub async fn update_courier_review(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourierReviewRequest>,
) -> AppResult<Json<ApiResponse<CourierReview>>> {
    let resp = review_service::update_courier_review(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/courier_review/{id}", security(("bearer_auth" = [])), tag = "Reviews")]
pub async fn delete_courier_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = review_service::delete_courier_review(&state, &user, id).await?;
    Ok(Json(resp))
}
