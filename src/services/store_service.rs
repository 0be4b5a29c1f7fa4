use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::reviews::StoreReviewDisplay,
    dto::stores::{
        ComboBrief, CreateStoreRequest, ProductBrief, StoreDetail, StoreList, StoreListItem,
        UpdateStoreRequest,
    },
    dto::users::{ReviewAuthor, UserSummary},
    entity::{
        categories::Entity as Categories,
        combos::{Column as ComboCol, Entity as Combos},
        contacts::{Column as ContactCol, Entity as Contacts},
        products::{Column as ProdCol, Entity as Products},
        store_reviews::{Column as ReviewCol, Entity as StoreReviews},
        stores::{ActiveModel as StoreActive, Column, Entity as Stores, Model as StoreModel},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner_role, ensure_owns},
    models::{Category, Contact, Store},
    ratings::{average_rating, good_review_percentage, reviewer_count_label},
    response::{ApiResponse, Meta},
    routes::params::StoreQuery,
    state::AppState,
};

pub const REVIEW_DATE_FORMAT: &str = "%d-%m-%Y %H:%M";

pub async fn list_stores(
    state: &AppState,
    query: StoreQuery,
) -> AppResult<ApiResponse<StoreList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(category) = query.category {
        condition = condition.add(Column::CategoryId.eq(category));
    }

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(Expr::col(Column::Name).ilike(pattern));
    }

    let finder = Stores::find().filter(condition).order_by_asc(Column::Name);
    let total = finder.clone().count(&state.orm).await? as i64;

    let stores = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(stores.len());
    for store in stores {
        let category = Categories::find_by_id(store.category_id)
            .one(&state.orm)
            .await?
            .ok_or(AppError::NotFound)?;
        let ratings = store_ratings(state, store.id).await?;
        items.push(StoreListItem {
            id: store.id,
            name: store.name,
            category: Category {
                id: category.id,
                name: category.name,
            },
            avg_rating: average_rating(&ratings),
            total_people: reviewer_count_label(ratings.len()),
            check_good: good_review_percentage(&ratings),
        });
    }

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Stores",
        StoreList { items },
        Some(meta),
    ))
}

pub async fn get_store_detail(state: &AppState, id: Uuid) -> AppResult<ApiResponse<StoreDetail>> {
    let store = Stores::find_by_id(id).one(&state.orm).await?;
    let store = match store {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let category = Categories::find_by_id(store.category_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let owner = Users::find_by_id(store.owner_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let contacts = Contacts::find()
        .filter(ContactCol::StoreId.eq(store.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| Contact {
            id: c.id,
            store_id: c.store_id,
            phone: c.phone,
        })
        .collect();

    let products = Products::find()
        .filter(ProdCol::StoreId.eq(store.id))
        .order_by_asc(ProdCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| ProductBrief {
            name: p.name,
            price: p.price,
            description: p.description,
        })
        .collect();

    let combos = Combos::find()
        .filter(ComboCol::StoreId.eq(store.id))
        .order_by_asc(ComboCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| ComboBrief {
            name: c.name,
            price: c.price,
            description: c.description,
        })
        .collect();

    let reviews = store_review_displays(state, store.id).await?;

    let detail = StoreDetail {
        id: store.id,
        name: store.name,
        category: Category {
            id: category.id,
            name: category.name,
        },
        description: store.description,
        address: store.address,
        owner: UserSummary {
            first_name: owner.first_name,
            last_name: owner.last_name,
            username: owner.username,
        },
        contacts,
        products,
        combos,
        reviews,
    };

    Ok(ApiResponse::success("Store", detail, None))
}

pub async fn create_store(
    state: &AppState,
    user: &AuthUser,
    payload: CreateStoreRequest,
) -> AppResult<ApiResponse<Store>> {
    ensure_owner_role(user)?;

    let category = Categories::find_by_id(payload.category_id)
        .one(&state.orm)
        .await?;
    if category.is_none() {
        return Err(AppError::BadRequest("Category not found".to_string()));
    }

    let id = Uuid::new_v4();
    let active = StoreActive {
        id: Set(id),
        name: Set(payload.name),
        category_id: Set(payload.category_id),
        description: Set(payload.description),
        address: Set(payload.address),
        owner_id: Set(user.user_id),
    };
    let store = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "store_create",
        Some("stores"),
        Some(serde_json::json!({ "store_id": store.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Store created",
        store_from_entity(store),
        Some(Meta::empty()),
    ))
}

pub async fn update_store(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateStoreRequest,
) -> AppResult<ApiResponse<Store>> {
    ensure_owner_role(user)?;
    let existing = Stores::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    ensure_owns(user, existing.owner_id)?;

    if let Some(category_id) = payload.category_id {
        let category = Categories::find_by_id(category_id).one(&state.orm).await?;
        if category.is_none() {
            return Err(AppError::BadRequest("Category not found".to_string()));
        }
    }

    let mut active: StoreActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(address) = payload.address {
        active.address = Set(address);
    }

    let store = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "store_update",
        Some("stores"),
        Some(serde_json::json!({ "store_id": store.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        store_from_entity(store),
        Some(Meta::empty()),
    ))
}

pub async fn delete_store(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_owner_role(user)?;
    let existing = Stores::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    ensure_owns(user, existing.owner_id)?;

    Stores::delete_by_id(id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "store_delete",
        Some("stores"),
        Some(serde_json::json!({ "store_id": id })),
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

async fn store_ratings(state: &AppState, store_id: Uuid) -> AppResult<Vec<i32>> {
    let ratings = StoreReviews::find()
        .filter(ReviewCol::StoreId.eq(store_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|r| r.rating)
        .collect();
    Ok(ratings)
}

#[derive(FromRow)]
struct ReviewAuthorRow {
    first_name: String,
    last_name: String,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
}

async fn store_review_displays(
    state: &AppState,
    store_id: Uuid,
) -> AppResult<Vec<StoreReviewDisplay>> {
    let rows = sqlx::query_as::<_, ReviewAuthorRow>(
        r#"
        SELECT u.first_name, u.last_name, r.rating, r.comment, r.created_at
        FROM store_reviews r
        JOIN users u ON u.id = r.client_id
        WHERE r.store_id = $1
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(store_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| StoreReviewDisplay {
            client: ReviewAuthor {
                first_name: row.first_name,
                last_name: row.last_name,
            },
            rating: row.rating,
            comment: row.comment,
            created_date: row.created_at.format(REVIEW_DATE_FORMAT).to_string(),
        })
        .collect())
}

fn store_from_entity(model: StoreModel) -> Store {
    Store {
        id: model.id,
        name: model.name,
        category_id: model.category_id,
        description: model.description,
        address: model.address,
        owner_id: model.owner_id,
    }
}
