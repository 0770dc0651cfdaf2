//! User Repository

use super::{RepoError, RepoResult};
use crate::auth::password;
use shared::models::{User, UserCreate, UserRole, UserUpdate};
use sqlx::SqlitePool;

const USER_SELECT: &str = "SELECT user_id, username, password_hash, role, created_at FROM users";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let sql = format!("{USER_SELECT} ORDER BY username");
    let rows = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE user_id = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE username = ? LIMIT 1");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn count_admins(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = ?")
        .bind(UserRole::Admin)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    if find_by_username(pool, &data.username).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Username '{}' already exists",
            data.username
        )));
    }

    let password_hash = password::hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO users (user_id, username, password_hash, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(&data.username)
    .bind(&password_hash)
    .bind(data.role)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<User> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;

    let password_hash = match &data.password {
        Some(password) => password::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?,
        None => existing.password_hash.clone(),
    };
    let role = data.role.unwrap_or(existing.role);

    sqlx::query("UPDATE users SET password_hash = ?1, role = ?2 WHERE user_id = ?3")
        .bind(&password_hash)
        .bind(role)
        .bind(id)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM users WHERE user_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Seed the default admin account when no admin exists yet (fresh install
/// or every admin removed out-of-band).
pub async fn ensure_default_admin(pool: &SqlitePool) -> RepoResult<()> {
    if count_admins(pool).await? > 0 {
        return Ok(());
    }

    create(
        pool,
        UserCreate {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role: UserRole::Admin,
        },
    )
    .await?;
    tracing::warn!("Seeded default admin account 'admin' - change its password immediately");
    Ok(())
}
