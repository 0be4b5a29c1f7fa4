use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_delivery_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let owner_id = ensure_user(&pool, "owner_demo", "owner@example.com", "owner123", "owner").await?;
    let client_id =
        ensure_user(&pool, "client_demo", "client@example.com", "client123", "client").await?;
    let courier_id = ensure_user(
        &pool,
        "courier_demo",
        "courier@example.com",
        "courier123",
        "courier",
    )
    .await?;

    let category_id = ensure_category(&pool, "Groceries").await?;
    let store_id = ensure_store(&pool, owner_id, category_id).await?;
    seed_products(&pool, store_id).await?;

    println!(
        "Seed completed. Owner: {owner_id}, Client: {client_id}, Courier: {courier_id}, Store: {store_id}"
    );
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash, first_name, last_name, role)
        VALUES ($1, $2, $3, $4, '', '', $5)
        ON CONFLICT (username) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE username = $1")
                .bind(username)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {username} (role={role})");
    Ok(user_id)
}

async fn ensure_category(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<Uuid> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO categories (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_optional(pool)
    .await?;

    let category_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM categories WHERE name = $1")
                .bind(name)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    Ok(category_id)
}

async fn ensure_store(
    pool: &sqlx::PgPool,
    owner_id: Uuid,
    category_id: Uuid,
) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM stores WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO stores (id, name, category_id, description, address, owner_id)
        VALUES ($1, 'Corner Market', $2, 'Demo grocery store', '12 Demo Street', $3)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(category_id)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    println!("Seeded store");
    Ok(row.0)
}

async fn seed_products(pool: &sqlx::PgPool, store_id: Uuid) -> anyhow::Result<()> {
    let products = vec![
        ("Sourdough Loaf", "Baked every morning", 450, 30),
        ("Whole Milk 1L", "Local dairy", 120, 80),
        ("Free-range Eggs", "Pack of ten", 300, 50),
        ("House Lemonade", "Made in store", 250, 40),
    ];

    for (name, desc, price, quantity) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, store_id, name, description, price, quantity)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE store_id = $2 AND name = $3)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(store_id)
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(quantity)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
