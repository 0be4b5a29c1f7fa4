use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::DbPool,
    dto::users::{UpdateUserRequest, UserProfile, UserProfileList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
};

/// The collection only ever exposes the requester's own profile.
pub async fn list_profiles(
    pool: &DbPool,
    user: &AuthUser,
) -> AppResult<ApiResponse<UserProfileList>> {
    let me: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user.user_id)
        .fetch_optional(pool)
        .await?;

    let items: Vec<UserProfile> = me.into_iter().map(UserProfile::from).collect();
    Ok(ApiResponse::success(
        "Users",
        UserProfileList { items },
        None,
    ))
}

pub async fn get_profile(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<UserProfile>> {
    if id != user.user_id {
        return Err(AppError::NotFound);
    }

    let me: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let me = match me {
        Some(u) => u,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("User", me.into(), None))
}

pub async fn update_profile(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<UserProfile>> {
    if id != user.user_id {
        return Err(AppError::NotFound);
    }

    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let existing = match existing {
        Some(u) => u,
        None => return Err(AppError::NotFound),
    };

    let email = payload.email.unwrap_or(existing.email);
    let first_name = payload.first_name.unwrap_or(existing.first_name);
    let last_name = payload.last_name.unwrap_or(existing.last_name);
    let phone_number = payload.phone_number.or(existing.phone_number);

    let updated: User = sqlx::query_as(
        r#"
        UPDATE users
        SET email = $2, first_name = $3, last_name = $4, phone_number = $5
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .bind(phone_number)
    .fetch_one(pool)
    .await?;

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "user_update",
        Some("users"),
        Some(serde_json::json!({ "user_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        updated.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_profile(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if id != user.user_id {
        return Err(AppError::NotFound);
    }

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
