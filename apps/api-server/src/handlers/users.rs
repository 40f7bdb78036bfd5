//! Account handlers: registration, login, logout and profile.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, web};

use blog_core::usecases::{LoginUserInput, RegisterUserInput};
use blog_shared::MessageResponse;
use blog_shared::dto::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterUserRequest, RegisteredResponse,
};

use super::user_view;
use crate::middleware::auth::{Identity, OptionalCredential, SESSION_COOKIE};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn session_cookie(state: &AppState, token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

fn removal_cookie(state: &AppState) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .finish();
    cookie.make_removal();
    cookie
}

/// POST /api/users/register
///
/// Sign-in after registration is best-effort: if no credential can be issued
/// the account still exists, the response is 201 without a cookie and
/// `sessionStarted` is `false`.
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .register_user
        .execute(RegisterUserInput {
            email: req.email,
            username: req.username,
            password: req.password,
        })
        .await?;

    tracing::info!(user_id = %user.id(), "User registered");

    let mut response = HttpResponse::Created();

    let session_started = match state.auth.issue_token(user.id(), user.email()).await {
        Ok(issued) => {
            response.cookie(session_cookie(&state, issued.token, issued.expires_in));
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not start session after registration");
            false
        }
    };

    Ok(response.json(RegisteredResponse {
        message: "User registered successfully".to_string(),
        user: user_view(&user),
        session_started,
    }))
}

/// POST /api/users/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let result = state
        .login_user
        .execute(LoginUserInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    tracing::info!(user_id = %result.user.id(), "User logged in");

    let cookie = session_cookie(&state, result.token.token.clone(), result.token.expires_in);

    Ok(HttpResponse::Ok().cookie(cookie).json(AuthResponse {
        message: "Login successful".to_string(),
        token: result.token.token,
        token_type: "Bearer".to_string(),
        expires_in: result.token.expires_in,
        user: user_view(&result.user),
    }))
}

/// POST /api/users/logout
pub async fn logout(
    state: web::Data<AppState>,
    credential: OptionalCredential,
) -> AppResult<HttpResponse> {
    if let Some(token) = credential.0 {
        state.logout_user.execute(&token).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(&state))
        .json(MessageResponse::new("Logout successful")))
}

/// GET /api/users/profile
pub async fn profile(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.get_user_profile.execute(&identity.user_id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user: user_view(&user),
    }))
}
