pub mod auth;
pub mod categories;
pub mod contacts;
pub mod export;
pub mod health;

use axum::{
    Router,
    http::{HeaderMap, HeaderValue, header::COOKIE, header::SET_COOKIE},
    middleware as axum_middleware,
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
};
use serde::Serialize;

use crate::{
    error::Error,
    middleware::auth::session_auth_middleware,
    models::flash::Flash,
    services::cookies,
    state::AppState,
};

/// Build the application router: public auth routes plus the session-gated
/// contact, category and export routes.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(contacts::index))
        .route("/add", post(contacts::add))
        .route("/edit/{id}", get(contacts::edit_form).post(contacts::edit))
        .route("/delete/{id}", get(contacts::delete))
        .route("/categories", get(categories::index))
        .route("/add_category", post(categories::add))
        .route("/delete_category/{id}", get(categories::delete))
        .route("/export", get(export::export_contacts))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .merge(protected)
        .with_state(state)
}

/// Redirect response carrying a one-time flash message, the standard reply
/// to every mutation route.
pub struct FlashRedirect {
    location: String,
    flash: Flash,
    extra_cookies: Vec<String>,
}

impl FlashRedirect {
    pub fn to(location: impl Into<String>, flash: Flash) -> Self {
        Self {
            location: location.into(),
            flash,
            extra_cookies: Vec::new(),
        }
    }

    /// Attach an additional Set-Cookie value, e.g. a session cookie.
    pub fn with_cookie(mut self, cookie: String) -> Self {
        self.extra_cookies.push(cookie);
        self
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let mut response = Redirect::to(&self.location).into_response();

        // Append every Set-Cookie header; `append` keeps multiple values.
        if let Ok(value) = HeaderValue::from_str(&cookies::build_flash_cookie(&self.flash)) {
            response.headers_mut().append(SET_COOKIE, value);
        }
        for cookie in &self.extra_cookies {
            if let Ok(value) = HeaderValue::from_str(cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }

        response
    }
}

/// Reads the pending flash message out of the request cookies, if any.
pub fn take_flash(headers: &HeaderMap) -> Option<Flash> {
    headers
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| cookies::extract_cookie_value(h, cookies::FLASH_COOKIE))
        .and_then(|value| cookies::decode_flash(&value))
}

/// Renders a page view model as JSON, clearing the flash cookie when the
/// page consumed one.
pub fn render_page<T: Serialize>(body: T, consumed_flash: bool) -> Response {
    let mut response = Json(body).into_response();

    if consumed_flash {
        if let Ok(value) = HeaderValue::from_str(&cookies::build_clear_cookie(cookies::FLASH_COOKIE))
        {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Converts a handler-boundary error into user-facing flash feedback.
/// Persistence details are logged, never shown.
pub fn flash_for_error(error: Error) -> Flash {
    match error {
        Error::Validation(msg)
        | Error::NotFound(msg)
        | Error::Forbidden(msg)
        | Error::Conflict(msg)
        | Error::Authentication(msg) => Flash::error(msg),
        error => {
            tracing::error!(error = %error, "request failed");
            Flash::error("Database error occurred")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flash::FlashKind;

    #[test]
    fn test_flash_for_error_passes_user_messages() {
        let flash = flash_for_error(Error::NotFound("Contact not found".to_string()));
        assert_eq!(flash.kind, FlashKind::Error);
        assert_eq!(flash.message, "Contact not found");
    }

    #[test]
    fn test_flash_for_error_hides_database_detail() {
        let flash = flash_for_error(Error::Sqlx(sqlx::Error::PoolClosed));
        assert_eq!(flash.message, "Database error occurred");
    }

    #[test]
    fn test_take_flash_roundtrip() {
        let flash = Flash::success("Welcome back!");
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!(
                "{}={}",
                cookies::FLASH_COOKIE,
                cookies::encode_flash(&flash)
            ))
            .unwrap(),
        );
        assert_eq!(take_flash(&headers), Some(flash));
        assert_eq!(take_flash(&HeaderMap::new()), None);
    }
}
