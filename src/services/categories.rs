use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::{
        categories::{Category, DEFAULT_COLOR, NewCategory, is_default_category},
        requests::CategoryForm,
    },
    queries::categories,
};

/// Lists the user's categories, ordered by name.
pub async fn list_categories(conn: &mut DbConn, user_id: i64) -> Result<Vec<Category>> {
    categories::list_categories(conn, user_id).await
}

/// Validates and inserts a category for the user. Duplicate names (per user)
/// surface as a conflict.
pub async fn create_category(
    conn: &mut DbConn,
    user_id: i64,
    form: CategoryForm,
) -> Result<Category> {
    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation("Category name is required".to_string()));
    }

    let color = match form.color.trim() {
        "" => DEFAULT_COLOR.to_string(),
        other => other.to_string(),
    };

    categories::create_category(
        conn,
        NewCategory {
            user_id,
            name,
            color,
        },
    )
    .await
}

/// Deletes a category scoped to its owner.
///
/// Refuses when the category is one of the seeded defaults or still has
/// contacts filed under it.
pub async fn delete_category(conn: &mut DbConn, user_id: i64, id: i64) -> Result<()> {
    let category = categories::get_category_by_id(conn, id, user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;

    if is_default_category(&category.name) {
        return Err(Error::Forbidden(
            "Cannot delete default categories".to_string(),
        ));
    }

    let in_use = categories::count_contacts_in_category(conn, user_id, &category.name).await?;
    if in_use > 0 {
        return Err(Error::Conflict(
            "Cannot delete category that is in use by contacts".to_string(),
        ));
    }

    let rows_affected = categories::delete_category(conn, id, user_id).await?;
    if rows_affected == 0 {
        return Err(Error::NotFound("Category not found".to_string()));
    }

    Ok(())
}
