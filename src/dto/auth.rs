use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUser {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: LoginUser,
    pub access: String,
    pub refresh: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LogoutRequest {
    pub refresh: String,
}

/// Access-token claims.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Refresh-token claims; `jti` backs the revocation list.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RefreshClaims {
    pub sub: String,
    pub exp: usize,
    pub jti: String,
    pub typ: String,
}
