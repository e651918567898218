use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::{
        categories::GENERAL_CATEGORY,
        contacts::{Contact, ContactPage, NewContact},
        requests::{ContactForm, ListQuery},
    },
    queries::{categories, contacts},
    validation,
};

/// Fixed page size of the contact listing.
pub const PER_PAGE: u32 = 10;

/// Turns a submitted form into a validated `NewContact` for this user.
///
/// Fields are trimmed; optional fields left empty become NULL. The category
/// defaults to "General" and must name a category the user owns, so contacts
/// can never carry an orphaned label.
async fn prepare_contact(
    conn: &mut DbConn,
    user_id: i64,
    form: ContactForm,
) -> Result<NewContact> {
    let name = form.name.trim().to_string();
    let phone = form.phone.trim().to_string();
    let email = form.email.trim().to_string();

    validation::validate_name(&name)?;
    validation::validate_phone(&phone)?;
    validation::validate_email(&email)?;

    let category = match form.category.trim() {
        "" => GENERAL_CATEGORY.to_string(),
        other => other.to_string(),
    };

    if categories::get_category_by_name(conn, user_id, &category)
        .await?
        .is_none()
    {
        return Err(Error::Validation(format!("Unknown category: {}", category)));
    }

    let opt = |s: String| if s.is_empty() { None } else { Some(s) };

    Ok(NewContact {
        user_id,
        name,
        phone: opt(phone),
        email: opt(email),
        address: opt(form.address.trim().to_string()),
        notes: opt(form.notes.trim().to_string()),
        category,
    })
}

/// Validates and inserts a contact for the user.
pub async fn create_contact(conn: &mut DbConn, user_id: i64, form: ContactForm) -> Result<Contact> {
    let new_contact = prepare_contact(conn, user_id, form).await?;
    contacts::create_contact(conn, new_contact).await
}

/// Loads a contact for the edit form, scoped to its owner.
pub async fn get_contact(conn: &mut DbConn, user_id: i64, id: i64) -> Result<Contact> {
    contacts::get_contact_by_id(conn, id, user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Contact not found".to_string()))
}

/// Validates and applies an edit, scoped to the owner. A contact that is
/// absent or owned by another user yields the same not-found error.
pub async fn update_contact(
    conn: &mut DbConn,
    user_id: i64,
    id: i64,
    form: ContactForm,
) -> Result<Contact> {
    let updated = prepare_contact(conn, user_id, form).await?;

    let rows_affected = contacts::update_contact(conn, id, user_id, &updated).await?;
    if rows_affected == 0 {
        return Err(Error::NotFound("Contact not found".to_string()));
    }

    get_contact(conn, user_id, id).await
}

/// Deletes a contact scoped to its owner. Zero rows affected is reported as
/// not-found, never as a silent success.
pub async fn delete_contact(conn: &mut DbConn, user_id: i64, id: i64) -> Result<()> {
    let rows_affected = contacts::delete_contact(conn, id, user_id).await?;
    if rows_affected == 0 {
        return Err(Error::NotFound(
            "Contact not found or you don't have permission to delete it".to_string(),
        ));
    }

    Ok(())
}

/// Runs the filtered, paginated listing for the user.
///
/// The page and the total come from the same `ContactFilter`, so the count
/// always reflects the filtered set. The page number is clamped to 1.
pub async fn list_contacts(
    conn: &mut DbConn,
    user_id: i64,
    query: &ListQuery,
) -> Result<ContactPage> {
    let mut filter = contacts::ContactFilter::new(user_id);
    filter.search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);
    filter.category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    let page = query.page.unwrap_or(1).max(1);
    let offset = i64::from(page - 1) * i64::from(PER_PAGE);

    let total = contacts::count_contacts(conn, &filter).await?;
    let rows = contacts::list_contacts(conn, &filter, i64::from(PER_PAGE), offset).await?;

    let total_pages = ((total as u64).div_ceil(u64::from(PER_PAGE))) as u32;

    Ok(ContactPage {
        contacts: rows,
        page,
        per_page: PER_PAGE,
        total,
        total_pages,
    })
}
