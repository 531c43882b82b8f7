//! Authentication controller.

use crate::{
    extractors::{Session, ValidatedJson},
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use courier_service::{LoginRequest, LoginResponse, MessageResponse, SessionResponse};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
}

/// Checks the credentials upstream and sets the session cookie.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    debug!("Login request: {}", request.email);

    let response = state.auth_service.login(request).await?;

    let security = state.token_provider.config();
    let cookie = Cookie::build((security.session_cookie.clone(), response.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(security.secure_cookie);

    Ok((jar.add(cookie), Json(response)))
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let cookie = Cookie::build((state.token_provider.cookie_name().to_string(), "")).path("/");
    (jar.remove(cookie), Json(MessageResponse::new("Signed out")))
}

async fn session(session: Session) -> ApiResult<SessionResponse> {
    ok(SessionResponse::from(&session.0))
}
