//! Authentication
//!
//! JWT bearer auth for the desktop UI layer: argon2 credential verification
//! at login, token validation middleware for everything else.

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use shared::models::UserRole;

use crate::utils::AppError;

/// Authenticated operator attached to the request by the auth middleware
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| format!("sub '{}' is not a user id", claims.sub))?;
        let role = match claims.role.as_str() {
            "ADMIN" => UserRole::Admin,
            "STAFF" => UserRole::Staff,
            other => return Err(format!("unknown role '{other}'")),
        };
        Ok(Self {
            id,
            username: claims.username,
            role,
        })
    }
}

/// Admin gate for user administration and transaction deletion
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.role != UserRole::Admin {
        return Err(AppError::forbidden("Administrator role required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            username: "frontdesk".to_string(),
            role: role.to_string(),
            token_type: "access".to_string(),
            exp: 0,
            iat: 0,
            iss: "desk-server".to_string(),
            aud: "desk-clients".to_string(),
        }
    }

    #[test]
    fn current_user_parses_valid_claims() {
        let user = CurrentUser::try_from(claims("7", "ADMIN")).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn current_user_rejects_malformed_claims() {
        assert!(CurrentUser::try_from(claims("not-a-number", "ADMIN")).is_err());
        assert!(CurrentUser::try_from(claims("7", "OWNER")).is_err());
    }

    #[test]
    fn staff_cannot_pass_the_admin_gate() {
        let staff = CurrentUser {
            id: 1,
            username: "desk".to_string(),
            role: UserRole::Staff,
        };
        assert!(require_admin(&staff).is_err());
    }
}
