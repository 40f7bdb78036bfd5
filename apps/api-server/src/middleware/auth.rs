//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::{LocalBoxFuture, Ready, ready};

use blog_core::domain::{Email, UserId};
use blog_core::services::AuthContext;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the session credential.
pub const SESSION_COOKIE: &str = "blog_session";

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub email: Email,
}

impl From<AuthContext> for Identity {
    fn from(ctx: AuthContext) -> Self {
        Self {
            user_id: ctx.user_id,
            email: ctx.email,
        }
    }
}

/// Credential presented with the request: the Bearer token, or failing that
/// the session cookie.
pub fn credential(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from);

    bearer.or_else(|| {
        req.cookie(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|token| !token.is_empty())
    })
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = credential(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Domain(blog_core::DomainError::Internal(
                    "Server configuration error".to_string(),
                )));
            };
            let token = token.ok_or(AppError::Unauthenticated)?;

            let ctx = state.auth.verify_token(&token).await?;
            Ok(Identity::from(ctx))
        })
    }
}

/// The raw credential, if any, without validating it.
pub struct OptionalCredential(pub Option<String>);

impl FromRequest for OptionalCredential {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalCredential(credential(req))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_wins_over_cookie() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc"))
            .cookie(Cookie::new(SESSION_COOKIE, "from-cookie"))
            .to_http_request();
        assert_eq!(credential(&req).as_deref(), Some("abc"));
    }

    #[test]
    fn test_cookie_fallback_and_absence() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "sid"))
            .to_http_request();
        assert_eq!(credential(&req).as_deref(), Some("sid"));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcg=="))
            .to_http_request();
        assert_eq!(credential(&req), None);
    }
}
