use axum_delivery_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::cart::AddCartItemRequest,
    dto::orders::{CreateOrderRequest, UpdateOrderRequest},
    dto::products::CreateProductRequest,
    dto::reviews::CreateStoreReviewRequest,
    dto::stores::{CreateStoreRequest, UpdateStoreRequest},
    entity::{Stores, users::ActiveModel as UserActive},
    error::AppError,
    middleware::auth::AuthUser,
    routes::categories::CreateCategoryRequest,
    routes::params::{Pagination, ProductQuery, StoreQuery},
    services::{
        cart_service, category_service, order_service, product_service, review_service,
        store_service,
    },
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set, Statement};
use uuid::Uuid;

// Integration flow: owner builds a store with products, clients review it,
// a client carts a product and places an order; permission failures along the way.
#[tokio::test]
async fn store_reviews_and_order_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
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

    let state = setup_state(&database_url).await?;

    // Seed users
    let owner_id = create_user(&state, "owner", "mira_owner", "mira@example.com").await?;
    let other_owner_id = create_user(&state, "owner", "talant_owner", "talant@example.com").await?;
    let client_id = create_user(&state, "client", "aida_client", "aida@example.com").await?;
    let courier_id = create_user(&state, "courier", "ruslan_courier", "ruslan@example.com").await?;

    let auth_owner = AuthUser {
        user_id: owner_id,
        role: "owner".into(),
    };
    let auth_other_owner = AuthUser {
        user_id: other_owner_id,
        role: "owner".into(),
    };
    let auth_client = AuthUser {
        user_id: client_id,
        role: "client".into(),
    };

    let category = category_service::create_category(
        &state,
        &auth_owner,
        CreateCategoryRequest {
            name: "Groceries".into(),
        },
    )
    .await?
    .data
    .unwrap();

    // A client must not be able to create a store, and nothing may be persisted.
    let denied = store_service::create_store(
        &state,
        &auth_client,
        CreateStoreRequest {
            name: "Sneaky Store".into(),
            category_id: category.id,
            description: None,
            address: "Nowhere 1".into(),
        },
    )
    .await;
    assert!(matches!(denied.unwrap_err(), AppError::Forbidden));
    assert_eq!(Stores::find().count(&state.orm).await?, 0);

    let store = store_service::create_store(
        &state,
        &auth_owner,
        CreateStoreRequest {
            name: "Corner Market".into(),
            category_id: category.id,
            description: Some("Open late".into()),
            address: "12 Demo Street".into(),
        },
    )
    .await?
    .data
    .unwrap();

    // Another owner cannot touch this store.
    let denied = store_service::update_store(
        &state,
        &auth_other_owner,
        store.id,
        UpdateStoreRequest {
            name: Some("Taken Over".into()),
            category_id: None,
            description: None,
            address: None,
        },
    )
    .await;
    assert!(matches!(denied.unwrap_err(), AppError::Forbidden));

    // Products at several price points
    let mut product_ids = Vec::new();
    for (name, price) in [("Bread", 5), ("Milk", 10), ("Cheese", 25), ("Wine", 50), ("Caviar", 60)]
    {
        let product = product_service::create_product(
            &state,
            &auth_owner,
            CreateProductRequest {
                store_id: store.id,
                name: name.into(),
                description: "test product".into(),
                price,
                quantity: 10,
            },
        )
        .await?
        .data
        .unwrap();
        product_ids.push(product.id);
    }

    // Strict price bounds: 10 < price < 50 keeps only Cheese.
    let filtered = product_service::list_products(
        &state,
        ProductQuery {
            pagination: Pagination {
                page: None,
                per_page: None,
            },
            q: None,
            price_gt: Some(10),
            price_lt: Some(50),
            sort_order: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0].name, "Cheese");

    // Reviews [5, 5, 2, 4] -> avg 4.0, "3+", "75%"
    for rating in [5, 5, 2, 4] {
        review_service::create_store_review(
            &state,
            &auth_client,
            CreateStoreReviewRequest {
                store_id: store.id,
                rating,
                comment: format!("rated {rating}"),
            },
        )
        .await?;
    }

    let listed = store_service::list_stores(
        &state,
        StoreQuery {
            pagination: Pagination {
                page: None,
                per_page: None,
            },
            q: None,
            category: Some(category.id),
        },
    )
    .await?
    .data
    .unwrap();
    let item = listed
        .items
        .iter()
        .find(|s| s.id == store.id)
        .expect("store in listing");
    assert_eq!(item.avg_rating, 4.0);
    assert_eq!(item.total_people, "3+");
    assert_eq!(item.check_good, "75%");

    // Cart and order
    let cart = cart_service::create_cart(&state.pool, &auth_client)
        .await?
        .data
        .unwrap();
    cart_service::add_cart_item(
        &state.pool,
        &auth_client,
        AddCartItemRequest {
            product_id: product_ids[0],
            quantity: Some(2),
        },
    )
    .await?;

    let order = order_service::create_order(
        &state,
        &auth_client,
        CreateOrderRequest {
            cart_id: cart.id,
            courier_id,
            delivery_address: "12 Demo Street".into(),
            status: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(order.status, "pending");
    assert_eq!(order.client_id, client_id);

    // Any of the four statuses is accepted, anything else is rejected.
    let bad = order_service::update_order(
        &state,
        &auth_client,
        order.id,
        UpdateOrderRequest {
            status: Some("teleported".into()),
            delivery_address: None,
            courier_id: None,
        },
    )
    .await;
    assert!(matches!(bad.unwrap_err(), AppError::BadRequest(_)));

    let updated = order_service::update_order(
        &state,
        &auth_client,
        order.id,
        UpdateOrderRequest {
            status: Some("delivering".into()),
            delivery_address: None,
            courier_id: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.status, "delivering");

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE courier_reviews, store_reviews, couriers, orders, cart_items, carts, \
         combos, products, contacts, stores, categories, revoked_tokens, audit_logs, users \
         RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_user(
    state: &AppState,
    role: &str,
    username: &str,
    email: &str,
) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        first_name: Set("Test".into()),
        last_name: Set("User".into()),
        phone_number: Set(None),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}
