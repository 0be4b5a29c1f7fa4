use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Combo;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateComboRequest {
    pub store_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateComboRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ComboList {
    #[schema(value_type = Vec<Combo>)]
    pub items: Vec<Combo>,
}
