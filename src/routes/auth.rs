use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, ACCESS_TOKEN_COOKIE},
    error::AppError,
    service::{Session, SessionService},
};
use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    post, web, HttpResponse, Responder,
};
use serde_json::json;

/// Register a new user
///
/// Creates the account, sets the session cookie, and echoes the token in the
/// body for clients that cannot use cookies.
#[post("/register")]
pub async fn register(
    sessions: web::Data<SessionService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let session = sessions.register(register_data.into_inner()).await?;
    Ok(session_response(session))
}

/// Login user
///
/// Authenticates a user and issues a fresh session.
#[post("/login")]
pub async fn login(
    sessions: web::Data<SessionService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let session = sessions.login(login_data.into_inner()).await?;
    Ok(session_response(session))
}

/// Logout
///
/// Clears the session cookie. The token itself stays valid until it expires;
/// there is no server-side session table to revoke it from.
#[post("/logout")]
pub async fn logout() -> impl Responder {
    let cookie = Cookie::build(ACCESS_TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .finish();

    HttpResponse::Ok().cookie(cookie).json(json!({
        "message": "Logged out successfully"
    }))
}

fn session_response(session: Session) -> HttpResponse {
    let user = session.user;
    let body = AuthResponse {
        id: user.id,
        username: user.name,
        email: user.email,
        is_admin: user.is_admin,
        access_token: session.token.clone(),
    };

    HttpResponse::Ok()
        .cookie(session_cookie(&session.token))
        .json(body)
}

fn session_cookie(token: &str) -> Cookie<'_> {
    Cookie::build(ACCESS_TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure_cookies())
        .same_site(SameSite::Strict)
        .max_age(Duration::days(30))
        .finish()
}

// Secure cookies everywhere except explicit development environments.
fn secure_cookies() -> bool {
    std::env::var("APP_ENV")
        .map(|env| env != "development")
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok-123");
        assert_eq!(cookie.name(), "accessToken");
        assert_eq!(cookie.value(), "tok-123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
        assert_eq!(cookie.path(), Some("/"));
    }
}
