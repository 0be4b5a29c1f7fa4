use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::reviews::StoreReviewDisplay;
use crate::dto::users::UserSummary;
use crate::models::{Category, Contact};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStoreRequest {
    pub name: String,
    pub category_id: Uuid,
    pub description: Option<String>,
    pub address: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
    pub address: Option<String>,
}

/// List shape: minimal fields plus the derived rating statistics.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreListItem {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub avg_rating: f64,
    pub total_people: String,
    pub check_good: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct StoreList {
    #[schema(value_type = Vec<StoreListItem>)]
    pub items: Vec<StoreListItem>,
}

/// Brief product shape nested under a store detail.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductBrief {
    pub name: String,
    pub price: i64,
    pub description: String,
}

/// Brief combo shape nested under a store detail.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComboBrief {
    pub name: String,
    pub price: i64,
    pub description: String,
}

/// Detail shape: the full nested graph. Nested collections are read-only.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreDetail {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub description: Option<String>,
    pub address: String,
    pub owner: UserSummary,
    pub contacts: Vec<Contact>,
    pub products: Vec<ProductBrief>,
    pub combos: Vec<ComboBrief>,
    pub reviews: Vec<StoreReviewDisplay>,
}
