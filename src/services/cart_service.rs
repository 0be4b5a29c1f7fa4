use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::DbPool,
    dto::cart::{AddCartItemRequest, CartItemDto, CartItemList, UpdateCartItemRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Cart, CartItem, Product},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
};

#[derive(FromRow)]
struct CartItemWithProductRow {
    item_id: Uuid,
    quantity: i32,
    product_id: Uuid,
    store_id: Uuid,
    name: String,
    description: String,
    price: i64,
    product_quantity: i32,
}

/// Every cart operation is scoped to the requester; other carts are invisible.
pub async fn list_carts(pool: &DbPool, user: &AuthUser) -> AppResult<ApiResponse<Vec<Cart>>> {
    let carts = sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_all(pool)
        .await?;

    Ok(ApiResponse::success("Carts", carts, None))
}

pub async fn get_cart(pool: &DbPool, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Cart>> {
    let cart: Option<Cart> = sqlx::query_as("SELECT * FROM carts WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.user_id)
        .fetch_optional(pool)
        .await?;

    let cart = match cart {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Cart", cart, None))
}

pub async fn create_cart(pool: &DbPool, user: &AuthUser) -> AppResult<ApiResponse<Cart>> {
    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM carts WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_optional(pool)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("Cart already exists".to_string()));
    }

    let cart: Cart = sqlx::query_as("INSERT INTO carts (id, user_id) VALUES ($1, $2) RETURNING *")
        .bind(Uuid::new_v4())
        .bind(user.user_id)
        .fetch_one(pool)
        .await?;

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "cart_create",
        Some("carts"),
        Some(serde_json::json!({ "cart_id": cart.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("Cart created", cart, Some(Meta::empty())))
}

pub async fn delete_cart(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM carts WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "cart_delete",
        Some("carts"),
        Some(serde_json::json!({ "cart_id": id })),
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

pub async fn list_cart_items(
    pool: &DbPool,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<CartItemList>> {
    let (page, limit, offset) = pagination.normalize();
    let rows = sqlx::query_as::<_, CartItemWithProductRow>(
        r#"
        SELECT ci.id AS item_id, ci.quantity,
               p.id AS product_id, p.store_id, p.name, p.description, p.price,
               p.quantity AS product_quantity
        FROM cart_items ci
        JOIN carts c ON c.id = ci.cart_id
        JOIN products p ON p.id = ci.product_id
        WHERE c.user_id = $1
        ORDER BY ci.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user.user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM cart_items ci JOIN carts c ON c.id = ci.cart_id WHERE c.user_id = $1",
    )
    .bind(user.user_id)
    .fetch_one(pool)
    .await?;

    let items = rows
        .into_iter()
        .map(|row| CartItemDto {
            id: row.item_id,
            product: Product {
                id: row.product_id,
                store_id: row.store_id,
                name: row.name,
                description: row.description,
                price: row.price,
                quantity: row.product_quantity,
            },
            quantity: row.quantity,
        })
        .collect();

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success("OK", CartItemList { items }, Some(meta)))
}

pub async fn add_cart_item(
    pool: &DbPool,
    user: &AuthUser,
    payload: AddCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let quantity = payload.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let cart: Option<Cart> = sqlx::query_as("SELECT * FROM carts WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_optional(pool)
        .await?;
    let cart = match cart {
        Some(c) => c,
        None => return Err(AppError::BadRequest("Cart not found".to_string())),
    };

    let product_exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(payload.product_id)
        .fetch_optional(pool)
        .await?;
    if product_exist.is_none() {
        return Err(AppError::BadRequest("Product not found".to_string()));
    }

    let exist: Option<CartItem> =
        sqlx::query_as("SELECT * FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart.id)
            .bind(payload.product_id)
            .fetch_optional(pool)
            .await?;

    let cart_item = if let Some(item) = exist {
        sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $3
            WHERE id = $1 AND cart_id = $2
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(cart.id)
        .bind(quantity)
        .fetch_one(pool)
        .await?
    } else {
        sqlx::query_as(
            "INSERT INTO cart_items (id, cart_id, product_id, quantity) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(cart.id)
        .bind(payload.product_id)
        .bind(quantity)
        .fetch_one(pool)
        .await?
    };

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "cart_item_add",
        Some("cart_items"),
        Some(serde_json::json!({ "product_id": payload.product_id, "quantity": quantity })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    Ok(ApiResponse::success("OK", cart_item, None))
}

pub async fn update_cart_item(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    if payload.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let updated: Option<CartItem> = sqlx::query_as(
        r#"
        UPDATE cart_items
        SET quantity = $3
        WHERE id = $1
          AND cart_id IN (SELECT id FROM carts WHERE user_id = $2)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.user_id)
    .bind(payload.quantity)
    .fetch_optional(pool)
    .await?;

    let updated = match updated {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success("Updated", updated, Some(Meta::empty())))
}

pub async fn remove_cart_item(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = sqlx::query(
        r#"
        DELETE FROM cart_items
        WHERE id = $1
          AND cart_id IN (SELECT id FROM carts WHERE user_id = $2)
        "#,
    )
    .bind(id)
    .bind(user.user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "cart_item_remove",
        Some("cart_items"),
        Some(serde_json::json!({ "cart_item_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Removed from cart",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
