use axum::{
    extract::{Extension, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    error::{Error, Result},
    middleware::auth::CurrentUser,
    queries::contacts,
    services::export,
    state::AppState,
};

/// GET /export
///
/// Streams all of the current user's contacts as a downloadable CSV
/// attachment, ordered by name, columns
/// `Name, Phone, Email, Address, Notes, Category`.
pub async fn export_contacts(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response> {
    let mut conn = state.pool.acquire().await.map_err(Error::Sqlx)?;

    let rows = contacts::list_all_contacts(&mut conn, user.id).await?;
    let csv = export::contacts_to_csv(&rows);

    tracing::info!(user_id = user.id, contact_count = rows.len(), "contacts exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", export::EXPORT_FILENAME),
            ),
        ],
        csv,
    )
        .into_response())
}
