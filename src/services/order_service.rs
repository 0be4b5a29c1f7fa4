use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::{CreateOrderRequest, OrderList, UpdateOrderRequest},
    entity::{
        carts::Entity as Carts,
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

pub const STATUS_PENDING: &str = "pending";

// The full value set; transitions between the values are deliberately not
// constrained.
const VALID_STATUSES: [&str; 4] = ["pending", "delivering", "delivered", "cancelled"];

fn validate_order_status(status: &str) -> Result<(), AppError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid order status".into()))
    }
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Order", order_from_entity(order), None))
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let status = payload
        .status
        .unwrap_or_else(|| STATUS_PENDING.to_string());
    validate_order_status(&status)?;

    if payload.delivery_address.is_empty() {
        return Err(AppError::BadRequest(
            "delivery_address must not be empty".into(),
        ));
    }

    let cart = Carts::find_by_id(payload.cart_id).one(&state.orm).await?;
    let cart = match cart {
        Some(c) => c,
        None => return Err(AppError::BadRequest("Cart not found".into())),
    };
    // The order's cart and client must agree.
    if cart.user_id != user.user_id {
        return Err(AppError::BadRequest(
            "Cart does not belong to the client".into(),
        ));
    }

    let courier = Users::find_by_id(payload.courier_id).one(&state.orm).await?;
    if courier.is_none() {
        return Err(AppError::BadRequest("Courier not found".into()));
    }

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        client_id: Set(user.user_id),
        cart_id: Set(payload.cart_id),
        courier_id: Set(payload.courier_id),
        status: Set(status),
        delivery_address: Set(payload.delivery_address),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order created",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if let Some(status) = payload.status.as_ref() {
        validate_order_status(status)?;
    }

    if let Some(courier_id) = payload.courier_id {
        let courier = Users::find_by_id(courier_id).one(&state.orm).await?;
        if courier.is_none() {
            return Err(AppError::BadRequest("Courier not found".into()));
        }
    }

    let mut active: OrderActive = existing.into();
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(delivery_address) = payload.delivery_address {
        if delivery_address.is_empty() {
            return Err(AppError::BadRequest(
                "delivery_address must not be empty".into(),
            ));
        }
        active.delivery_address = Set(delivery_address);
    }
    if let Some(courier_id) = payload.courier_id {
        active.courier_id = Set(courier_id);
    }

    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": order.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Orders::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_delete",
        Some("orders"),
        Some(serde_json::json!({ "order_id": id })),
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

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        client_id: model.client_id,
        cart_id: model.cart_id,
        courier_id: model.courier_id,
        status: model.status,
        delivery_address: model.delivery_address,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
