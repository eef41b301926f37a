pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims, ACCESS_TOKEN_COOKIE};

lazy_static! {
    // Display names: letters, digits, spaces, underscores, hyphens.
    static ref NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _-]*$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account.
    #[validate(
        length(min = 2, max = 64),
        regex(
            path = "NAME_REGEX",
            message = "Name may contain letters, digits, spaces, underscores, or hyphens"
        )
    )]
    pub name: String,
    /// Email address for the new account.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response body after a successful registration or login.
///
/// The token is also delivered as an HTTP-only cookie; the body copy exists
/// for clients that cannot use cookies.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let short_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_name_register = RegisterRequest {
            name: "grace!".to_string(), // Contains exclamation
            email: "grace@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_name_register.validate().is_err());

        let short_name_register = RegisterRequest {
            name: "g".to_string(),
            email: "grace@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(short_name_register.validate().is_err());
    }

    #[test]
    fn test_auth_response_shape() {
        let response = AuthResponse {
            id: 1,
            username: "Grace".into(),
            email: "grace@example.com".into(),
            is_admin: false,
            access_token: "tok".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["isAdmin"], false);
        assert_eq!(json["accessToken"], "tok");
        assert_eq!(json["username"], "Grace");
    }
}
