use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::DbPool,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owns},
    models::Contact,
    response::{ApiResponse, Meta},
    routes::contacts::{ContactList, CreateContactRequest, UpdateContactRequest},
    routes::params::Pagination,
};

pub async fn list_contacts(
    pool: &DbPool,
    pagination: Pagination,
) -> AppResult<ApiResponse<ContactList>> {
    let (page, limit, offset) = pagination.normalize();
    let items = sqlx::query_as::<_, Contact>(
        "SELECT * FROM contacts ORDER BY phone LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts")
        .fetch_one(pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Contacts",
        ContactList { items },
        Some(meta),
    ))
}

pub async fn get_contact(pool: &DbPool, id: Uuid) -> AppResult<ApiResponse<Contact>> {
    let contact: Option<Contact> = sqlx::query_as("SELECT * FROM contacts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let contact = match contact {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Contact", contact, None))
}

pub async fn create_contact(
    pool: &DbPool,
    user: &AuthUser,
    payload: CreateContactRequest,
) -> AppResult<ApiResponse<Contact>> {
    ensure_store_owner(pool, user, payload.store_id).await?;

    let contact: Contact = sqlx::query_as(
        "INSERT INTO contacts (id, store_id, phone) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.store_id)
    .bind(payload.phone)
    .fetch_one(pool)
    .await?;

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "contact_create",
        Some("contacts"),
        Some(serde_json::json!({ "contact_id": contact.id, "store_id": contact.store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Contact created",
        contact,
        Some(Meta::empty()),
    ))
}

pub async fn update_contact(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateContactRequest,
) -> AppResult<ApiResponse<Contact>> {
    let existing: Option<Contact> = sqlx::query_as("SELECT * FROM contacts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    ensure_store_owner(pool, user, existing.store_id).await?;

    let contact: Contact =
        sqlx::query_as("UPDATE contacts SET phone = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(payload.phone)
            .fetch_one(pool)
            .await?;

    Ok(ApiResponse::success("Updated", contact, Some(Meta::empty())))
}

pub async fn delete_contact(
    pool: &DbPool,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing: Option<Contact> = sqlx::query_as("SELECT * FROM contacts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    ensure_store_owner(pool, user, existing.store_id).await?;

    sqlx::query("DELETE FROM contacts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "contact_delete",
        Some("contacts"),
        Some(serde_json::json!({ "contact_id": id })),
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

async fn ensure_store_owner(pool: &DbPool, user: &AuthUser, store_id: Uuid) -> AppResult<()> {
    let owner: Option<(Uuid,)> = sqlx::query_as("SELECT owner_id FROM stores WHERE id = $1")
        .bind(store_id)
        .fetch_optional(pool)
        .await?;
    let owner = match owner {
        Some((id,)) => id,
        None => return Err(AppError::BadRequest("Store not found".into())),
    };
    ensure_owns(user, owner)?;
    Ok(())
}
