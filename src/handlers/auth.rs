use axum::{Form, extract::State, http::HeaderMap, response::Response};

use crate::{
    error::{Error, Result},
    models::{
        flash::Flash,
        requests::{AuthPage, LoginForm, RegisterForm},
    },
    services::{
        cookies::{self, CookieConfig},
        sessions, users,
    },
    state::AppState,
};

use super::{FlashRedirect, flash_for_error, render_page, take_flash};

/// GET /register
///
/// Public registration page view model, carrying any pending flash.
pub async fn register_form(headers: HeaderMap) -> Response {
    let flash = take_flash(&headers);
    let consumed = flash.is_some();
    render_page(AuthPage { flash }, consumed)
}

/// POST /register
///
/// Registers a new user and seeds their default categories.
///
/// # Form fields
/// - `username`: at least 3 characters, unique
/// - `password`: at least 6 characters
///
/// # Outcome
/// Redirects to `/login` with a success flash, or back to `/register` with
/// the validation or duplicate-username message.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<FlashRedirect> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    match users::register_user(&mut conn, form).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "user registered");
            Ok(FlashRedirect::to(
                "/login",
                Flash::success("Registration successful. Please log in."),
            ))
        }
        Err(error) => Ok(FlashRedirect::to("/register", flash_for_error(error))),
    }
}

/// GET /login
///
/// Public login page view model, carrying any pending flash.
pub async fn login_form(headers: HeaderMap) -> Response {
    let flash = take_flash(&headers);
    let consumed = flash.is_some();
    render_page(AuthPage { flash }, consumed)
}

/// POST /login
///
/// Authenticates the user and establishes a session.
///
/// Unknown usernames and wrong passwords both produce the same generic
/// "Invalid credentials" flash. On success a server-side session is created
/// and its token set as an HttpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<FlashRedirect> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    let user = match users::login_user(&mut conn, form).await {
        Ok(user) => user,
        Err(error) => {
            return Ok(FlashRedirect::to("/login", flash_for_error(error)));
        }
    };

    let ttl_hours = state.config.session.ttl_hours;
    let token = sessions::start_session(&mut conn, user.id, ttl_hours).await?;

    tracing::info!(user_id = user.id, "user logged in");

    let cookie = cookies::build_session_cookie(&token, ttl_hours * 3600, &CookieConfig::default());
    Ok(FlashRedirect::to("/", Flash::success("Welcome back!")).with_cookie(cookie))
}

/// GET /logout
///
/// Revokes the server-side session (if any), clears the cookie and redirects
/// to `/login`. Always succeeds.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<FlashRedirect> {
    let token = headers
        .get(axum::http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| cookies::extract_cookie_value(h, cookies::SESSION_COOKIE));

    if let Some(token) = token {
        let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;
        sessions::revoke_session(&mut conn, &token).await?;
    }

    Ok(
        FlashRedirect::to("/login", Flash::success("Logged out successfully"))
            .with_cookie(cookies::build_clear_cookie(cookies::SESSION_COOKIE)),
    )
}
