use axum::{
    Form,
    extract::{Extension, Path, State},
    http::HeaderMap,
    response::Response,
};

use crate::{
    error::{Error, Result},
    middleware::auth::CurrentUser,
    models::{
        flash::Flash,
        requests::{CategoriesPage, CategoryForm},
    },
    services::categories,
    state::AppState,
};

use super::{FlashRedirect, flash_for_error, render_page, take_flash};

/// GET /categories
///
/// The category management page: the user's categories ordered by name.
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Result<Response> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    let categories = categories::list_categories(&mut conn, user.id).await?;

    let flash = take_flash(&headers);
    let consumed = flash.is_some();

    Ok(render_page(CategoriesPage { categories, flash }, consumed))
}

/// POST /add_category
///
/// Adds a category for the current user. An empty name is rejected and a
/// duplicate name (per user) reports a conflict.
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<CategoryForm>,
) -> Result<FlashRedirect> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    match categories::create_category(&mut conn, user.id, form).await {
        Ok(category) => {
            tracing::info!(
                user_id = user.id,
                category_id = category.id,
                "category added"
            );
            Ok(FlashRedirect::to(
                "/categories",
                Flash::success("Category added successfully"),
            ))
        }
        Err(error) => Ok(FlashRedirect::to("/categories", flash_for_error(error))),
    }
}

/// GET /delete_category/{id}
///
/// Deletes a category scoped to the current user. Default categories and
/// categories still in use by contacts are refused.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<FlashRedirect> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    match categories::delete_category(&mut conn, user.id, id).await {
        Ok(()) => {
            tracing::info!(user_id = user.id, category_id = id, "category deleted");
            Ok(FlashRedirect::to(
                "/categories",
                Flash::success("Category deleted successfully"),
            ))
        }
        Err(error) => Ok(FlashRedirect::to("/categories", flash_for_error(error))),
    }
}
