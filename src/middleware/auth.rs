//! Session authentication middleware.
//!
//! Validates the session cookie against the sessions table and injects the
//! authenticated user into request extensions as an explicit per-request
//! value; handlers never consult ambient state.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    handlers::FlashRedirect,
    models::{flash::Flash, users::User},
    services::{cookies, sessions},
    state::AppState,
};

/// Authenticated user resolved from the session cookie
///
/// This struct is added to request extensions by the session middleware
/// after successful validation.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    /// User's unique identifier
    pub id: i64,
    /// User's login name
    pub username: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Session authentication middleware
///
/// # Behavior
/// 1. Extracts the session token from the `session_token` cookie
/// 2. Looks up the token hash in the sessions table and checks expiry
/// 3. Adds `CurrentUser` to request extensions
/// 4. On any failure, redirects to `/login` with a notice and clears the
///    stale cookie
///
/// # Usage
/// Apply this middleware to protected routes using `route_layer()`:
///
/// ```ignore
/// Router::new()
///     .route("/", get(index))
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         session_auth_middleware,
///     ))
/// ```
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| cookies::extract_cookie_value(h, cookies::SESSION_COOKIE));

    let Some(token) = token else {
        return login_redirect();
    };

    // The connection goes back to the pool before the handler runs; holding
    // it across `next.run` would starve handlers of pool capacity.
    let auth_result = {
        let mut conn = match state.pool.acquire().await {
            Ok(conn) => conn,
            Err(e) => return crate::Error::Sqlx(e).into_response(),
        };
        sessions::authenticate_session(&mut conn, &token).await
    };

    match auth_result {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser::from(user));
            next.run(request).await
        }
        Err(error) => {
            tracing::debug!(error = %error, "session rejected");
            login_redirect()
        }
    }
}

fn login_redirect() -> Response {
    FlashRedirect::to("/login", Flash::error("Please log in first"))
        .with_cookie(cookies::build_clear_cookie(cookies::SESSION_COOKIE))
        .into_response()
}
