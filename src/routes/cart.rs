use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::cart::{AddCartItemRequest, CartItemList, UpdateCartItemRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Cart, CartItem},
    response::ApiResponse,
    routes::params::Pagination,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(list_carts).post(create_cart))
        .route("/cart/{id}", get(get_cart).delete(delete_cart))
        .route("/cart_item", get(list_cart_items).post(add_cart_item))
        .route(
            "/cart_item/{id}",
            axum::routing::put(update_cart_item)
                .patch(update_cart_item)
                .delete(remove_cart_item),
        )
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "List the requester's cart", body = ApiResponse<Vec<Cart>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn list_carts(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Cart>>>> {
    let resp = cart_service::list_carts(&state.pool, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/cart",
    responses(
        (status = 200, description = "Create the requester's cart", body = ApiResponse<Cart>),
        (status = 400, description = "Cart already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn create_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let resp = cart_service::create_cart(&state.pool, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/cart/{id}", security(("bearer_auth" = [])), tag = "Cart")]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let resp = cart_service::get_cart(&state.pool, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/cart/{id}", security(("bearer_auth" = [])), tag = "Cart")]
pub async fn delete_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = cart_service::delete_cart(&state.pool, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/cart_item",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List cart items with product data", body = ApiResponse<CartItemList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn list_cart_items(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CartItemList>>> {
    let resp = cart_service::list_cart_items(&state.pool, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/cart_item",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Add or update a cart item", body = ApiResponse<CartItem>),
        (status = 400, description = "Bad request"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let resp = cart_service::add_cart_item(&state.pool, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(put, path = "/cart_item/{id}", request_body = UpdateCartItemRequest, security(("bearer_auth" = [])), tag = "Cart")]
pub async fn update_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let resp = cart_service::update_cart_item(&state.pool, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/cart_item/{id}", security(("bearer_auth" = [])), tag = "Cart")]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = cart_service::remove_cart_item(&state.pool, &user, id).await?;
    Ok(Json(resp))
}
