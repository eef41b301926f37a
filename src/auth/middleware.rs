use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;
use std::rc::Rc;

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::{verify_token, ACCESS_TOKEN_COOKIE};
use crate::error::AppError;
use crate::store::UserStore;

/// Authenticates every request passing through the wrapped scope.
///
/// Token precedence: the `accessToken` cookie first, then an
/// `Authorization: Bearer` header. A valid token is only half the check: the
/// user id in its claims must still exist in the Credential Store, and the
/// current record is fetched on every request so downstream handlers never
/// see a stale identity.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = extract_token(&req).ok_or_else(|| {
                AppError::Unauthorized("Unauthorized request: No token provided".into())
            })?;

            let claims = verify_token(&token)
                .map_err(|_| AppError::Unauthorized("Unauthorized request: Invalid access token".into()))?;

            let pool = req
                .app_data::<web::Data<PgPool>>()
                .cloned()
                .ok_or_else(|| AppError::Internal("Database pool not configured".into()))?;

            let user = UserStore::new(pool.get_ref().clone())
                .find_by_id(claims.sub)
                .await
                .map_err(AppError::from)?
                .ok_or_else(|| {
                    AppError::Unauthorized("Unauthorized request: Invalid token".into())
                })?;

            req.extensions_mut().insert(AuthenticatedUser::from(user));

            service.call(req).await
        })
    }
}

/// Pulls the session token from the request: cookie first, bearer header
/// second.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.request().cookie(ACCESS_TOKEN_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_extract_token_prefers_cookie() {
        let req = test::TestRequest::default()
            .cookie(actix_web::cookie::Cookie::new(ACCESS_TOKEN_COOKIE, "cookie-token"))
            .insert_header((header::AUTHORIZATION, "Bearer header-token"))
            .to_srv_request();

        assert_eq!(extract_token(&req).as_deref(), Some("cookie-token"));
    }

    #[actix_rt::test]
    async fn test_extract_token_falls_back_to_bearer() {
        let req = test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer header-token"))
            .to_srv_request();

        assert_eq!(extract_token(&req).as_deref(), Some("header-token"));
    }

    #[actix_rt::test]
    async fn test_extract_token_absent() {
        let req = test::TestRequest::default().to_srv_request();
        assert!(extract_token(&req).is_none());

        // A non-bearer Authorization header does not count as a token.
        let req = test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_srv_request();
        assert!(extract_token(&req).is_none());
    }
}
