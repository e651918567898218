use axum::{
    Form, Json,
    extract::{Extension, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    error::{Error, Result},
    middleware::auth::CurrentUser,
    models::{
        flash::Flash,
        requests::{ContactForm, EditPage, IndexPage, ListQuery},
    },
    services::{categories, contacts},
    state::AppState,
};

use super::{FlashRedirect, flash_for_error, render_page, take_flash};

/// GET /
///
/// The contact listing: optional substring search, optional category filter,
/// page number (default 1, page size 10). The view model carries the page of
/// contacts, the user's categories, the echoed filters and pagination
/// numbers derived from the count of the same filtered set.
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    let page = contacts::list_contacts(&mut conn, user.id, &query).await?;
    let categories = categories::list_categories(&mut conn, user.id).await?;

    let flash = take_flash(&headers);
    let consumed = flash.is_some();

    Ok(render_page(
        IndexPage {
            username: user.username,
            contacts: page,
            categories,
            search: query.search.unwrap_or_default(),
            category_filter: query.category.unwrap_or_default(),
            flash,
        },
        consumed,
    ))
}

/// POST /add
///
/// Validates and inserts a contact for the current user. Success and every
/// failure redirect back to the listing with a flash message.
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<ContactForm>,
) -> Result<FlashRedirect> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    match contacts::create_contact(&mut conn, user.id, form).await {
        Ok(contact) => {
            tracing::info!(user_id = user.id, contact_id = contact.id, "contact added");
            Ok(FlashRedirect::to(
                "/",
                Flash::success("Contact added successfully"),
            ))
        }
        Err(error) => Ok(FlashRedirect::to("/", flash_for_error(error))),
    }
}

/// GET /edit/{id}
///
/// Loads the edit form view model, scoped to the current user. A contact
/// that is absent or owned by another user yields the same not-found flash,
/// never the data.
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    let contact = match contacts::get_contact(&mut conn, user.id, id).await {
        Ok(contact) => contact,
        Err(error) => {
            return Ok(FlashRedirect::to("/", flash_for_error(error)).into_response());
        }
    };

    let categories = categories::list_categories(&mut conn, user.id).await?;

    let flash = take_flash(&headers);
    let consumed = flash.is_some();

    Ok(render_page(
        EditPage {
            contact,
            categories,
            flash,
        },
        consumed,
    ))
}

/// POST /edit/{id}
///
/// Re-validates and applies the edit. On a validation failure the response
/// echoes the submitted values so the form re-renders without losing input;
/// ownership mismatches redirect with the same not-found flash as a missing
/// contact.
pub async fn edit(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    match contacts::update_contact(&mut conn, user.id, id, form.clone()).await {
        Ok(contact) => {
            tracing::info!(user_id = user.id, contact_id = contact.id, "contact updated");
            Ok(
                FlashRedirect::to("/", Flash::success("Contact updated successfully"))
                    .into_response(),
            )
        }
        Err(Error::Validation(message)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": message,
                "code": "VALIDATION_ERROR",
                "values": form
            })),
        )
            .into_response()),
        Err(error) => Ok(FlashRedirect::to("/", flash_for_error(error)).into_response()),
    }
}

/// GET /delete/{id}
///
/// Deletes the contact scoped to the current user. Zero rows affected is
/// reported as a not-found flash; repeating the request reports the same.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<FlashRedirect> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    match contacts::delete_contact(&mut conn, user.id, id).await {
        Ok(()) => {
            tracing::info!(user_id = user.id, contact_id = id, "contact deleted");
            Ok(FlashRedirect::to(
                "/",
                Flash::success("Contact deleted successfully"),
            ))
        }
        Err(error) => Ok(FlashRedirect::to("/", flash_for_error(error))),
    }
}
