use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        stores::Entity as Stores,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner_role, ensure_owns},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, SortOrder},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(Expr::col(Column::Name).ilike(pattern));
    }

    // Strict bounds: price_gt=10&price_lt=50 keeps only 10 < price < 50.
    if let Some(price_gt) = query.price_gt {
        condition = condition.add(Column::Price.gt(price_gt));
    }

    if let Some(price_lt) = query.price_lt {
        condition = condition.add(Column::Price.lt(price_lt));
    }

    let mut finder = Products::find().filter(condition);
    finder = match query.sort_order {
        Some(SortOrder::Asc) => finder.order_by_asc(Column::Price),
        Some(SortOrder::Desc) => finder.order_by_desc(Column::Price),
        None => finder.order_by_asc(Column::Name),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    let data = ProductList { items };
    Ok(ApiResponse::success("Products", data, Some(meta)))
}

pub async fn get_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    ensure_owner_role(user)?;
    let product = find_owned_product(state, user, id).await?;
    Ok(ApiResponse::success(
        "Product",
        product_from_entity(product),
        None,
    ))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_owner_role(user)?;

    if payload.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    if payload.quantity < 0 {
        return Err(AppError::BadRequest("quantity must not be negative".into()));
    }

    let store = Stores::find_by_id(payload.store_id).one(&state.orm).await?;
    if store.is_none() {
        return Err(AppError::BadRequest("Store not found".into()));
    }

    let id = Uuid::new_v4();
    let active = ActiveModel {
        id: Set(id),
        store_id: Set(payload.store_id),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        quantity: Set(payload.quantity),
    };
    let product = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_owner_role(user)?;
    let existing = find_owned_product(state, user, id).await?;

    if let Some(price) = payload.price {
        if price < 0 {
            return Err(AppError::BadRequest("price must not be negative".into()));
        }
    }
    if let Some(quantity) = payload.quantity {
        if quantity < 0 {
            return Err(AppError::BadRequest("quantity must not be negative".into()));
        }
    }

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }

    let product = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_owner_role(user)?;
    let existing = find_owned_product(state, user, id).await?;

    Products::delete_by_id(existing.id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
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

/// Resolve a product and check the requester owns its store.
async fn find_owned_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ProductModel> {
    let product = Products::find_by_id(id).one(&state.orm).await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let store = Stores::find_by_id(product.store_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owns(user, store.owner_id)?;

    Ok(product)
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        store_id: model.store_id,
        name: model.name,
        description: model.description,
        price: model.price,
        quantity: model.quantity,
    }
}
