use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::DbPool,
    dto::auth::{
        Claims, LoginRequest, LoginResponse, LoginUser, LogoutRequest, RefreshClaims,
        RegisterRequest,
    },
    dto::users::UserProfile,
    error::{AppError, AppResult},
    middleware::auth::{ROLE_CLIENT, VALID_ROLES},
    models::User,
    response::{ApiResponse, Meta},
};

const ACCESS_TTL_HOURS: i64 = 24;
const REFRESH_TTL_DAYS: i64 = 7;

pub async fn register_user(
    pool: &DbPool,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<UserProfile>> {
    let RegisterRequest {
        username,
        email,
        password,
        first_name,
        last_name,
        phone_number,
        role,
    } = payload;

    let role = role.unwrap_or_else(|| ROLE_CLIENT.to_string());
    if !VALID_ROLES.contains(&role.as_str()) {
        return Err(AppError::BadRequest("Invalid user role".to_string()));
    }

    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
        .bind(username.as_str())
        .fetch_optional(pool)
        .await?;

    if exist.is_some() {
        return Err(AppError::BadRequest(
            "Username is already taken".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let id = Uuid::new_v4();

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash, first_name, last_name, phone_number, role)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(username.as_str())
    .bind(email.as_str())
    .bind(password_hash)
    .bind(first_name.as_str())
    .bind(last_name.as_str())
    .bind(phone_number)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    if let Err(err) = log_audit(
        pool,
        Some(user.id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    Ok(ApiResponse::success("User created", user.into(), None))
}

pub async fn login_user(
    pool: &DbPool,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { username, password } = payload;
    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username.as_str())
        .fetch_optional(pool)
        .await?;

    // Same error either way so the response never reveals which part was wrong.
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized);
    }

    let secret = jwt_secret()?;
    let access = issue_access_token(&user, &secret)?;
    let refresh = issue_refresh_token(&user, &secret)?;

    let resp = LoginResponse {
        user: LoginUser {
            username: user.username.clone(),
            email: user.email.clone(),
        },
        access,
        refresh,
    };

    if let Err(err) = log_audit(
        pool,
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub async fn logout_user(
    pool: &DbPool,
    payload: LogoutRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let secret = jwt_secret()?;
    let decoded = decode::<RefreshClaims>(
        &payload.refresh,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::BadRequest("Invalid refresh token".into()))?;

    let claims = decoded.claims;
    if claims.typ != "refresh" {
        return Err(AppError::BadRequest("Invalid refresh token".into()));
    }

    let jti = Uuid::parse_str(&claims.jti)
        .map_err(|_| AppError::BadRequest("Invalid refresh token".into()))?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::BadRequest("Invalid refresh token".into()))?;

    let already: Option<(Uuid,)> = sqlx::query_as("SELECT jti FROM revoked_tokens WHERE jti = $1")
        .bind(jti)
        .fetch_optional(pool)
        .await?;
    if already.is_some() {
        return Err(AppError::BadRequest("Token already revoked".into()));
    }

    let expires_at = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0)
        .ok_or_else(|| AppError::BadRequest("Invalid refresh token".into()))?;

    sqlx::query("INSERT INTO revoked_tokens (jti, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(jti)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;

    if let Err(err) = log_audit(
        pool,
        Some(user_id),
        "user_logout",
        Some("users"),
        Some(serde_json::json!({ "jti": jti })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn jwt_secret() -> AppResult<String> {
    std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))
}

fn issue_access_token(user: &User, secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ACCESS_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role.clone(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn issue_refresh_token(user: &User, secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::days(REFRESH_TTL_DAYS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = RefreshClaims {
        sub: user.id.to_string(),
        exp: expiration.timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
        typ: "refresh".to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
