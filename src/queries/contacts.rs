use crate::{
    error::{Error, Result},
    models::contacts::{Contact, NewContact},
};
use sqlx::{QueryBuilder, Sqlite};

use crate::DbConn;

const CONTACT_COLUMNS: &str =
    "id, user_id, name, phone, email, address, notes, category, created_at, updated_at";

/// Filter predicates shared by the listing and count queries.
///
/// Both queries render their WHERE clause from the same value, so the count
/// always reflects exactly the filtered set the page was taken from.
#[derive(Debug, Clone)]
pub struct ContactFilter {
    pub user_id: i64,
    /// Case-insensitive substring matched against name, phone, email and notes.
    pub search: Option<String>,
    /// Exact match against the stored category name.
    pub category: Option<String>,
}

impl ContactFilter {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            search: None,
            category: None,
        }
    }

    fn push_predicates(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(" WHERE user_id = ").push_bind(self.user_id);

        if let Some(search) = &self.search {
            // SQLite LIKE is case-insensitive for ASCII.
            let pattern = format!("%{}%", search);
            qb.push(" AND (name LIKE ").push_bind(pattern.clone());
            qb.push(" OR phone LIKE ").push_bind(pattern.clone());
            qb.push(" OR email LIKE ").push_bind(pattern.clone());
            qb.push(" OR notes LIKE ").push_bind(pattern);
            qb.push(")");
        }

        if let Some(category) = &self.category {
            qb.push(" AND category = ").push_bind(category.clone());
        }
    }
}

/// Creates a new contact in the database.
pub async fn create_contact(conn: &mut DbConn, new_contact: NewContact) -> Result<Contact> {
    let contact = sqlx::query_as::<_, Contact>(&format!(
        r#"
        INSERT INTO contacts (user_id, name, phone, email, address, notes, category)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {CONTACT_COLUMNS}
        "#
    ))
    .bind(new_contact.user_id)
    .bind(new_contact.name)
    .bind(new_contact.phone)
    .bind(new_contact.email)
    .bind(new_contact.address)
    .bind(new_contact.notes)
    .bind(new_contact.category)
    .fetch_one(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(contact)
}

/// Gets a contact scoped to its owner. Returns `None` when the contact does
/// not exist or belongs to a different user; callers cannot tell the two
/// apart.
pub async fn get_contact_by_id(
    conn: &mut DbConn,
    id: i64,
    user_id: i64,
) -> Result<Option<Contact>> {
    let contact = sqlx::query_as::<_, Contact>(&format!(
        r#"
        SELECT {CONTACT_COLUMNS}
        FROM contacts
        WHERE id = ? AND user_id = ?
        "#
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(contact)
}

/// Lists one page of contacts matching the filter, ordered by name.
pub async fn list_contacts(
    conn: &mut DbConn,
    filter: &ContactFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Contact>> {
    let mut qb = QueryBuilder::new(format!("SELECT {CONTACT_COLUMNS} FROM contacts"));
    filter.push_predicates(&mut qb);
    qb.push(" ORDER BY name ASC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let contacts = qb
        .build_query_as::<Contact>()
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(contacts)
}

/// Counts the contacts matching the filter.
pub async fn count_contacts(conn: &mut DbConn, filter: &ContactFilter) -> Result<i64> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM contacts");
    filter.push_predicates(&mut qb);

    let total = qb
        .build_query_scalar::<i64>()
        .fetch_one(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(total)
}

/// Lists every contact owned by the user, ordered by name. Used for export.
pub async fn list_all_contacts(conn: &mut DbConn, user_id: i64) -> Result<Vec<Contact>> {
    let contacts = sqlx::query_as::<_, Contact>(&format!(
        r#"
        SELECT {CONTACT_COLUMNS}
        FROM contacts
        WHERE user_id = ?
        ORDER BY name ASC
        "#
    ))
    .bind(user_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(contacts)
}

/// Updates a contact scoped to its owner. Returns the number of rows touched;
/// zero means the contact is absent or owned by someone else. `updated_at` is
/// refreshed by the schema trigger.
pub async fn update_contact(
    conn: &mut DbConn,
    id: i64,
    user_id: i64,
    contact: &NewContact,
) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        UPDATE contacts
        SET name = ?, phone = ?, email = ?, address = ?, notes = ?, category = ?
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(&contact.name)
    .bind(&contact.phone)
    .bind(&contact.email)
    .bind(&contact.address)
    .bind(&contact.notes)
    .bind(&contact.category)
    .bind(id)
    .bind(user_id)
    .execute(conn)
    .await
    .map_err(Error::Sqlx)?
    .rows_affected();

    Ok(rows_affected)
}

/// Deletes a contact scoped to its owner. Returns the number of rows deleted.
pub async fn delete_contact(conn: &mut DbConn, id: i64, user_id: i64) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM contacts
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
