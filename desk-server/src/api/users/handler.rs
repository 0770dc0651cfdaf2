//! User Administration Handlers
//!
//! Every route is admin-gated. The last admin account can neither be
//! deleted nor demoted, and operators cannot delete themselves.

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::{CurrentUser, require_admin};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{User, UserCreate, UserRole, UserUpdate};

/// GET /api/users - 获取用户列表
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<User>>> {
    require_admin(&current_user)?;
    let users = user::find_all(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/:id - 获取单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    require_admin(&current_user)?;
    let found = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
    Ok(Json(found))
}

/// POST /api/users - 新增用户
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    require_admin(&current_user)?;
    validate_required_text(&payload.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    if payload.password.len() < 6 {
        return Err(AppError::validation(
            "password must be at least 6 characters",
        ));
    }

    let created = user::create(&state.pool, payload).await?;
    tracing::info!(
        user_id = created.user_id,
        username = %created.username,
        operator = %current_user.username,
        "User created"
    );
    Ok(Json(created))
}

/// PUT /api/users/:id - 修改用户 (重置密码/调整角色)
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    require_admin(&current_user)?;
    if let Some(password) = &payload.password {
        validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
        if password.len() < 6 {
            return Err(AppError::validation(
                "password must be at least 6 characters",
            ));
        }
    }

    // Demoting the last admin would lock user administration out entirely
    if payload.role == Some(UserRole::Staff) {
        let target = user::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        if target.role == UserRole::Admin && user::count_admins(&state.pool).await? <= 1 {
            return Err(AppError::business_rule("Cannot demote the last admin"));
        }
    }

    let updated = user::update(&state.pool, id, payload).await?;
    tracing::info!(
        user_id = id,
        operator = %current_user.username,
        "User updated"
    );
    Ok(Json(updated))
}

/// DELETE /api/users/:id - 删除用户
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    require_admin(&current_user)?;
    if id == current_user.id {
        return Err(AppError::business_rule("Cannot delete your own account"));
    }

    let target = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
    if target.role == UserRole::Admin && user::count_admins(&state.pool).await? <= 1 {
        return Err(AppError::business_rule("Cannot delete the last admin"));
    }

    let deleted = user::delete(&state.pool, id).await?;
    tracing::info!(
        user_id = id,
        operator = %current_user.username,
        "User deleted"
    );
    Ok(Json(deleted))
}
