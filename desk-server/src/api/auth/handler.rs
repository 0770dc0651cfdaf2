//! Authentication Handlers
//!
//! Handles login and token issuance

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::password;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::AppError;
use crate::utils::validation::{MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text};
use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_required_text(&req.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let found = user::find_by_username(&state.pool, &req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let account = match found {
        Some(account) => {
            let password_valid = password::verify_password(&account.password_hash, &req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            account
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(account.user_id, &account.username, account.role.as_str())
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = account.user_id,
        username = %account.username,
        role = %account.role.as_str(),
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account.user_id,
            username: account.username,
            role: account.role,
        },
    }))
}
