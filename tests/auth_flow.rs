use axum_delivery_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::auth::{LoginRequest, LogoutRequest, RegisterRequest},
    error::AppError,
    services::auth_service::{login_user, logout_user, register_user},
};
use sea_orm::{ConnectionTrait, Statement};

// Register -> login -> logout against a real database; both login failure
// modes must collapse into the same generic error.
#[tokio::test]
async fn register_login_logout_flow() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };
    if std::env::var("JWT_SECRET").is_err() {
        eprintln!("Skipping test: set JWT_SECRET to run auth flow tests.");
        return Ok(());
    }

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE courier_reviews, store_reviews, couriers, orders, cart_items, carts, \
         combos, products, contacts, stores, categories, revoked_tokens, audit_logs, users \
         RESTART IDENTITY CASCADE",
    ))
    .await?;

    let registered = register_user(
        &pool,
        RegisterRequest {
            username: "aibek".into(),
            email: "aibek@example.com".into(),
            password: "correct horse".into(),
            first_name: "Aibek".into(),
            last_name: "K".into(),
            phone_number: None,
            role: Some("client".into()),
        },
    )
    .await?;

    // The profile shape carries no password material at all.
    let profile = registered.data.unwrap();
    let as_json = serde_json::to_value(&profile)?;
    let rendered = as_json.to_string();
    assert!(!rendered.contains("password"));
    assert_eq!(profile.username, "aibek");

    // Duplicate username is a validation error.
    let dup = register_user(
        &pool,
        RegisterRequest {
            username: "aibek".into(),
            email: "other@example.com".into(),
            password: "pw".into(),
            first_name: "Other".into(),
            last_name: "User".into(),
            phone_number: None,
            role: None,
        },
    )
    .await;
    assert!(matches!(dup.unwrap_err(), AppError::BadRequest(_)));

    // Valid credentials return a token pair.
    let logged_in = login_user(
        &pool,
        LoginRequest {
            username: "aibek".into(),
            password: "correct horse".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(!logged_in.access.is_empty());
    assert!(!logged_in.refresh.is_empty());
    assert_ne!(logged_in.access, logged_in.refresh);
    assert_eq!(logged_in.user.username, "aibek");

    // Wrong password and unknown username produce the identical fixed error.
    let wrong_password = login_user(
        &pool,
        LoginRequest {
            username: "aibek".into(),
            password: "wrong".into(),
        },
    )
    .await
    .unwrap_err();
    let unknown_user = login_user(
        &pool,
        LoginRequest {
            username: "nobody".into(),
            password: "correct horse".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(wrong_password, AppError::Unauthorized));
    assert!(matches!(unknown_user, AppError::Unauthorized));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());

    // Logout revokes the refresh token exactly once.
    logout_user(
        &pool,
        LogoutRequest {
            refresh: logged_in.refresh.clone(),
        },
    )
    .await?;
    let second = logout_user(
        &pool,
        LogoutRequest {
            refresh: logged_in.refresh,
        },
    )
    .await;
    assert!(matches!(second.unwrap_err(), AppError::BadRequest(_)));

    // An access token is not a refresh token.
    let not_refresh = logout_user(
        &pool,
        LogoutRequest {
            refresh: logged_in.access,
        },
    )
    .await;
    assert!(matches!(not_refresh.unwrap_err(), AppError::BadRequest(_)));

    Ok(())
}
