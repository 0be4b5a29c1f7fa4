use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::{
        couriers::{ActiveModel, Column, Entity as Couriers, Model as CourierModel},
        orders::Entity as Orders,
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Courier,
    response::{ApiResponse, Meta},
    routes::couriers::{CourierList, CreateCourierRequest, UpdateCourierRequest},
    routes::params::Pagination,
    state::AppState,
};

pub const STATUS_AVAILABLE: &str = "available";
pub const STATUS_BUSY: &str = "busy";

fn validate_courier_status(status: &str) -> Result<(), AppError> {
    if status == STATUS_AVAILABLE || status == STATUS_BUSY {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid courier status".into()))
    }
}

pub async fn list_couriers(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CourierList>> {
    let (page, limit, offset) = pagination.normalize();

    let finder = Couriers::find().order_by_asc(Column::Status);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(courier_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Couriers",
        CourierList { items },
        Some(meta),
    ))
}

pub async fn get_courier(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Courier>> {
    let courier = Couriers::find_by_id(id).one(&state.orm).await?;
    let courier = match courier {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Courier",
        courier_from_entity(courier),
        None,
    ))
}

pub async fn create_courier(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCourierRequest,
) -> AppResult<ApiResponse<Courier>> {
    validate_courier_status(&payload.status)?;

    let courier_user = Users::find_by_id(payload.user_id).one(&state.orm).await?;
    if courier_user.is_none() {
        return Err(AppError::BadRequest("User not found".into()));
    }

    let order = Orders::find_by_id(payload.current_order_id)
        .one(&state.orm)
        .await?;
    if order.is_none() {
        return Err(AppError::BadRequest("Order not found".into()));
    }

    let courier = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(payload.user_id),
        current_order_id: Set(payload.current_order_id),
        status: Set(payload.status),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "courier_create",
        Some("couriers"),
        Some(serde_json::json!({ "courier_id": courier.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Courier created",
        courier_from_entity(courier),
        Some(Meta::empty()),
    ))
}

pub async fn update_courier(
    state: &AppState,
    id: Uuid,
    payload: UpdateCourierRequest,
) -> AppResult<ApiResponse<Courier>> {
    let existing = Couriers::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    if let Some(status) = payload.status.as_ref() {
        validate_courier_status(status)?;
    }

    if let Some(current_order_id) = payload.current_order_id {
        let order = Orders::find_by_id(current_order_id).one(&state.orm).await?;
        if order.is_none() {
            return Err(AppError::BadRequest("Order not found".into()));
        }
    }

    let mut active: ActiveModel = existing.into();
    if let Some(current_order_id) = payload.current_order_id {
        active.current_order_id = Set(current_order_id);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }

    let courier = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        courier_from_entity(courier),
        Some(Meta::empty()),
    ))
}

pub async fn delete_courier(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Couriers::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "courier_delete",
        Some("couriers"),
        Some(serde_json::json!({ "courier_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn courier_from_entity(model: CourierModel) -> Courier {
    Courier {
        id: model.id,
        user_id: model.user_id,
        current_order_id: model.current_order_id,
        status: model.status,
    }
}
