use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::combos::{ComboList, CreateComboRequest, UpdateComboRequest},
    entity::{
        combos::{ActiveModel, Column, Entity as Combos, Model as ComboModel},
        stores::Entity as Stores,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner_role, ensure_owns},
    models::Combo,
    response::{ApiResponse, Meta},
    routes::params::{ComboQuery, SortOrder},
    state::AppState,
};

pub async fn list_combos(state: &AppState, query: ComboQuery) -> AppResult<ApiResponse<ComboList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(price_gt) = query.price_gt {
        condition = condition.add(Column::Price.gt(price_gt));
    }

    if let Some(price_lt) = query.price_lt {
        condition = condition.add(Column::Price.lt(price_lt));
    }

    let mut finder = Combos::find().filter(condition);
    finder = match query.sort_order {
        Some(SortOrder::Asc) => finder.order_by_asc(Column::Price),
        Some(SortOrder::Desc) => finder.order_by_desc(Column::Price),
        None => finder.order_by_asc(Column::Name),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(combo_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Combos", ComboList { items }, Some(meta)))
}

pub async fn get_combo(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Combo>> {
    let combo = Combos::find_by_id(id).one(&state.orm).await?;
    let combo = match combo {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Combo", combo_from_entity(combo), None))
}

pub async fn create_combo(
    state: &AppState,
    user: &AuthUser,
    payload: CreateComboRequest,
) -> AppResult<ApiResponse<Combo>> {
    ensure_owner_role(user)?;

    if payload.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }

    let store = Stores::find_by_id(payload.store_id).one(&state.orm).await?;
    if store.is_none() {
        return Err(AppError::BadRequest("Store not found".into()));
    }

    // Combo names are unique; surface the conflict as a validation error.
    let taken = Combos::find()
        .filter(Column::Name.eq(payload.name.clone()))
        .one(&state.orm)
        .await?;
    if taken.is_some() {
        return Err(AppError::BadRequest(
            "Combo name is already taken".to_string(),
        ));
    }

    let id = Uuid::new_v4();
    let active = ActiveModel {
        id: Set(id),
        store_id: Set(payload.store_id),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
    };
    let combo = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "combo_create",
        Some("combos"),
        Some(serde_json::json!({ "combo_id": combo.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Combo created",
        combo_from_entity(combo),
        Some(Meta::empty()),
    ))
}

pub async fn update_combo(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateComboRequest,
) -> AppResult<ApiResponse<Combo>> {
    ensure_owner_role(user)?;
    let existing = find_owned_combo(state, user, id).await?;

    if let Some(price) = payload.price {
        if price < 0 {
            return Err(AppError::BadRequest("price must not be negative".into()));
        }
    }

    if let Some(name) = payload.name.as_ref() {
        let taken = Combos::find()
            .filter(
                Condition::all()
                    .add(Column::Name.eq(name.clone()))
                    .add(Column::Id.ne(id)),
            )
            .one(&state.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::BadRequest(
                "Combo name is already taken".to_string(),
            ));
        }
    }

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }

    let combo = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "combo_update",
        Some("combos"),
        Some(serde_json::json!({ "combo_id": combo.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        combo_from_entity(combo),
        Some(Meta::empty()),
    ))
}

pub async fn delete_combo(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_owner_role(user)?;
    let existing = find_owned_combo(state, user, id).await?;

    Combos::delete_by_id(existing.id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "combo_delete",
        Some("combos"),
        Some(serde_json::json!({ "combo_id": id })),
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

/// Resolve a combo and check the requester owns its store.
async fn find_owned_combo(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ComboModel> {
    let combo = Combos::find_by_id(id).one(&state.orm).await?;
    let combo = match combo {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let store = Stores::find_by_id(combo.store_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owns(user, store.owner_id)?;

    Ok(combo)
}

fn combo_from_entity(model: ComboModel) -> Combo {
    Combo {
        id: model.id,
        store_id: model.store_id,
        name: model.name,
        description: model.description,
        price: model.price,
    }
}
