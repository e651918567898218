use crate::{
    error::{Error, Result},
    models::categories::{Category, DEFAULT_CATEGORIES, NewCategory},
};

use crate::DbConn;

/// Creates a new category in the database.
pub async fn create_category(conn: &mut DbConn, new_category: NewCategory) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (user_id, name, color)
        VALUES (?, ?, ?)
        RETURNING id, user_id, name, color
        "#,
    )
    .bind(new_category.user_id)
    .bind(new_category.name)
    .bind(new_category.color)
    .fetch_one(conn)
    .await
    .map_err(|e| {
        let error_msg = e.to_string().to_lowercase();

        // Per-user unique constraint on the category name
        if error_msg.contains("unique") || error_msg.contains("categories.name") {
            Error::Conflict("Category already exists".to_string())
        } else {
            Error::Sqlx(e)
        }
    })?;

    Ok(category)
}

/// Seeds the four default categories for a freshly registered user.
pub async fn seed_default_categories(conn: &mut DbConn, user_id: i64) -> Result<()> {
    for (name, color) in DEFAULT_CATEGORIES {
        sqlx::query(
            r#"
            INSERT INTO categories (user_id, name, color)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(color)
        .execute(&mut *conn)
        .await
        .map_err(Error::Sqlx)?;
    }

    Ok(())
}

/// Lists all categories owned by the user, ordered by name.
pub async fn list_categories(conn: &mut DbConn, user_id: i64) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, user_id, name, color
        FROM categories
        WHERE user_id = ?
        ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(categories)
}

/// Gets a category scoped to its owner. The category may not exist.
pub async fn get_category_by_id(
    conn: &mut DbConn,
    id: i64,
    user_id: i64,
) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, user_id, name, color
        FROM categories
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(category)
}

/// Gets a category by name, scoped to its owner. The category may not exist.
pub async fn get_category_by_name(
    conn: &mut DbConn,
    user_id: i64,
    name: &str,
) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, user_id, name, color
        FROM categories
        WHERE user_id = ? AND name = ?
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(category)
}

/// Counts the user's contacts currently filed under the given category name.
pub async fn count_contacts_in_category(
    conn: &mut DbConn,
    user_id: i64,
    name: &str,
) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM contacts
        WHERE user_id = ? AND category = ?
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(count)
}

/// Deletes a category scoped to its owner. Returns the number of rows deleted.
pub async fn delete_category(conn: &mut DbConn, id: i64, user_id: i64) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM categories
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(conn)
    .await
    .map_err(Error::Sqlx)?
    .rows_affected();

    Ok(rows_affected)
}
