//! Customer Repository

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str =
    "SELECT customer_id, name, contact, id_card, points, created_at, updated_at FROM customers";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE customer_id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id_card(pool: &SqlitePool, id_card: &str) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id_card = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id_card)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Customer>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{CUSTOMER_SELECT} WHERE name LIKE ?1 OR contact LIKE ?1 OR id_card LIKE ?1 ORDER BY created_at DESC"
    );
    let rows = sqlx::query_as::<_, Customer>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: CustomerCreate) -> RepoResult<Customer> {
    if find_by_id_card(pool, &data.id_card).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "A customer with id card {} is already registered",
            data.id_card
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO customers (customer_id, name, contact, id_card, points, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.contact)
    .bind(&data.id_card)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CustomerUpdate) -> RepoResult<Customer> {
    if let Some(id_card) = &data.id_card
        && let Some(found) = find_by_id_card(pool, id_card).await?
        && found.customer_id != id
    {
        return Err(RepoError::Duplicate(format!(
            "A customer with id card {id_card} is already registered"
        )));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE customers SET name = COALESCE(?1, name), contact = COALESCE(?2, contact), id_card = COALESCE(?3, id_card), updated_at = ?4 WHERE customer_id = ?5",
    )
    .bind(data.name)
    .bind(data.contact)
    .bind(data.id_card)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

/// Hard delete. Customers referenced by reservations are never cascade
/// deleted; the RESTRICT foreign key rejects them as [`RepoError::Conflict`].
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM customers WHERE customer_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
