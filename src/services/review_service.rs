use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::reviews::{
        CourierReviewList, CreateCourierReviewRequest, CreateStoreReviewRequest,
        StoreReviewDisplay, StoreReviewList, UpdateCourierReviewRequest, UpdateStoreReviewRequest,
    },
    dto::users::ReviewAuthor,
    entity::{
        courier_reviews::{
            ActiveModel as CourierReviewActive, Column as CourierReviewCol,
            Entity as CourierReviews, Model as CourierReviewModel,
        },
        store_reviews::{ActiveModel as StoreReviewActive, Entity as StoreReviews},
        stores::Entity as Stores,
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CourierReview, StoreReview},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::store_service::REVIEW_DATE_FORMAT,
    state::AppState,
};

fn validate_rating(rating: i32) -> Result<(), AppError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ))
    }
}

#[derive(FromRow)]
struct StoreReviewRow {
    first_name: String,
    last_name: String,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
}

impl StoreReviewRow {
    fn into_display(self) -> StoreReviewDisplay {
        StoreReviewDisplay {
            client: ReviewAuthor {
                first_name: self.first_name,
                last_name: self.last_name,
            },
            rating: self.rating,
            comment: self.comment,
            created_date: self.created_at.format(REVIEW_DATE_FORMAT).to_string(),
        }
    }
}

pub async fn list_store_reviews(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<StoreReviewList>> {
    let (page, limit, offset) = pagination.normalize();
    let rows = sqlx::query_as::<_, StoreReviewRow>(
        r#"
        SELECT u.first_name, u.last_name, r.rating, r.comment, r.created_at
        FROM store_reviews r
        JOIN users u ON u.id = r.client_id
        ORDER BY r.created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM store_reviews")
        .fetch_one(&state.pool)
        .await?;

    let items = rows.into_iter().map(StoreReviewRow::into_display).collect();

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Store reviews",
        StoreReviewList { items },
        Some(meta),
    ))
}

pub async fn get_store_review(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<StoreReviewDisplay>> {
    let row: Option<StoreReviewRow> = sqlx::query_as(
        r#"
        SELECT u.first_name, u.last_name, r.rating, r.comment, r.created_at
        FROM store_reviews r
        JOIN users u ON u.id = r.client_id
        WHERE r.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await?;

    let row = match row {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Store review", row.into_display(), None))
}

pub async fn create_store_review(
    state: &AppState,
    user: &AuthUser,
    payload: CreateStoreReviewRequest,
) -> AppResult<ApiResponse<StoreReview>> {
    validate_rating(payload.rating)?;

    let store = Stores::find_by_id(payload.store_id).one(&state.orm).await?;
    if store.is_none() {
        return Err(AppError::BadRequest("Store not found".into()));
    }

    let review = StoreReviewActive {
        id: Set(Uuid::new_v4()),
        client_id: Set(user.user_id),
        store_id: Set(payload.store_id),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "store_review_create",
        Some("store_reviews"),
        Some(serde_json::json!({ "review_id": review.id, "store_id": review.store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Review created",
        StoreReview {
            id: review.id,
            client_id: review.client_id,
            store_id: review.store_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at.with_timezone(&Utc),
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_store_review(
    state: &AppState,
    id: Uuid,
    payload: UpdateStoreReviewRequest,
) -> AppResult<ApiResponse<StoreReview>> {
    let existing = StoreReviews::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
    }

    let mut active: StoreReviewActive = existing.into();
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }
    if let Some(comment) = payload.comment {
        active.comment = Set(comment);
    }

    let review = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        StoreReview {
            id: review.id,
            client_id: review.client_id,
            store_id: review.store_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at.with_timezone(&Utc),
        },
        Some(Meta::empty()),
    ))
}

pub async fn delete_store_review(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = StoreReviews::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "store_review_delete",
        Some("store_reviews"),
        Some(serde_json::json!({ "review_id": id })),
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

pub async fn list_courier_reviews(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CourierReviewList>> {
    let (page, limit, offset) = pagination.normalize();

    let finder = CourierReviews::find().order_by_desc(CourierReviewCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(courier_review_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Courier reviews",
        CourierReviewList { items },
        Some(meta),
    ))
}

pub async fn get_courier_review(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<CourierReview>> {
    let review = CourierReviews::find_by_id(id).one(&state.orm).await?;
    let review = match review {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Courier review",
        courier_review_from_entity(review),
        None,
    ))
}

pub async fn create_courier_review(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCourierReviewRequest,
) -> AppResult<ApiResponse<CourierReview>> {
    validate_rating(payload.rating)?;

    let courier = Users::find_by_id(payload.courier_id).one(&state.orm).await?;
    if courier.is_none() {
        return Err(AppError::BadRequest("Courier not found".into()));
    }

    let review = CourierReviewActive {
        id: Set(Uuid::new_v4()),
        client_id: Set(user.user_id),
        courier_id: Set(payload.courier_id),
        rating: Set(payload.rating),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "courier_review_create",
        Some("courier_reviews"),
        Some(serde_json::json!({ "review_id": review.id, "courier_id": review.courier_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Review created",
        courier_review_from_entity(review),
        Some(Meta::empty()),
    ))
}

pub async fn update_courier_review(
    state: &AppState,
    id: Uuid,
    payload: UpdateCourierReviewRequest,
) -> AppResult<ApiResponse<CourierReview>> {
    validate_rating(payload.rating)?;

    let existing = CourierReviews::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    let mut active: CourierReviewActive = existing.into();
    active.rating = Set(payload.rating);
    let review = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        courier_review_from_entity(review),
        Some(Meta::empty()),
    ))
}

pub async fn delete_courier_review(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = CourierReviews::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "courier_review_delete",
        Some("courier_reviews"),
        Some(serde_json::json!({ "review_id": id })),
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

fn courier_review_from_entity(model: CourierReviewModel) -> CourierReview {
    CourierReview {
        id: model.id,
        client_id: model.client_id,
        courier_id: model.courier_id,
        rating: model.rating,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
