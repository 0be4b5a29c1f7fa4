use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::combos::{ComboList, CreateComboRequest, UpdateComboRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Combo,
    response::ApiResponse,
    routes::params::ComboQuery,
    services::combo_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/combos", get(list_combos).post(create_combo))
        .route(
            "/combos/{id}",
            get(get_combo)
                .put(update_combo)
                .patch(update_combo)
                .delete(delete_combo),
        )
        // Legacy paths kept alongside the collection mount.
        .route("/add_product_combo", post(create_combo))
        .route(
            "/add_product_combo/{id}",
            get(get_combo)
                .put(update_combo)
                .patch(update_combo)
                .delete(delete_combo),
        )
}

#[utoipa::path(
    get,
    path = "/combos",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("price_gt" = Option<i64>, Query, description = "Only combos strictly above this price"),
        ("price_lt" = Option<i64>, Query, description = "Only combos strictly below this price"),
        ("sort_order" = Option<String>, Query, description = "Price ordering: asc, desc")
    ),
    responses(
        (status = 200, description = "List combos", body = ApiResponse<ComboList>)
    ),
    tag = "Combos"
)]
pub async fn list_combos(
    State(state): State<AppState>,
    Query(query): Query<ComboQuery>,
) -> AppResult<Json<ApiResponse<ComboList>>> {
    let resp = combo_service::list_combos(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/combos/{id}", tag = "Combos")]
pub async fn get_combo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Combo>>> {
    let resp = combo_service::get_combo(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/add_product_combo",
    request_body = CreateComboRequest,
    responses(
        (status = 200, description = "Create combo", body = ApiResponse<Combo>),
        (status = 400, description = "Combo name already taken"),
        (status = 403, description = "Owner role required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Combos"
)]
pub async fn create_combo(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateComboRequest>,
) -> AppResult<Json<ApiResponse<Combo>>> {
    let resp = combo_service::create_combo(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/add_product_combo/{id}",
    params(
        ("id" = Uuid, Path, description = "Combo ID")
    ),
    request_body = UpdateComboRequest,
    responses(
        (status = 200, description = "Update combo", body = ApiResponse<Combo>),
        (status = 403, description = "Owner role and ownership required"),
        (status = 404, description = "Combo not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Combos"
)]
pub async fn update_combo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateComboRequest>,
) -> AppResult<Json<ApiResponse<Combo>>> {
    let resp = combo_service::update_combo(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/add_product_combo/{id}", security(("bearer_auth" = [])), tag = "Combos")]
pub async fn delete_combo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = combo_service::delete_combo(&state, &user, id).await?;
    Ok(Json(resp))
}
