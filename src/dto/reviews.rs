use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::users::ReviewAuthor;
use crate::models::CourierReview;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStoreReviewRequest {
    pub store_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStoreReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// Read shape: author names plus a pre-formatted timestamp.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreReviewDisplay {
    pub client: ReviewAuthor,
    pub rating: i32,
    pub comment: String,
    pub created_date: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreReviewList {
    pub items: Vec<StoreReviewDisplay>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourierReviewRequest {
    pub courier_id: Uuid,
    pub rating: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCourierReviewRequest {
    pub rating: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourierReviewList {
    pub items: Vec<CourierReview>,
}
