use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Internal row shape; never serialized so the hash cannot leak.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub description: Option<String>,
    pub address: String,
    pub owner_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub store_id: Uuid,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Combo {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub client_id: Uuid,
    pub cart_id: Uuid,
    pub courier_id: Uuid,
    pub status: String,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Courier {
    pub id: Uuid,
    pub user_id: Uuid,
    pub current_order_id: Uuid,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoreReview {
    pub id: Uuid,
    pub client_id: Uuid,
    pub store_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourierReview {
    pub id: Uuid,
    pub client_id: Uuid,
    pub courier_id: Uuid,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}
