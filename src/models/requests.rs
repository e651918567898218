//! Form payloads and the view models handed to the presentation layer.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{categories::Category, contacts::ContactPage, flash::Flash};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Submitted contact fields, shared by the add and edit flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Query parameters accepted by the contact listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<u32>,
}

/// Parses the page number leniently: anything that is not a positive integer
/// (`?page=abc`, `?page=-1`) falls back to the default page instead of
/// rejecting the request.
fn lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// View model for the register and login pages.
#[derive(Debug, Serialize)]
pub struct AuthPage {
    pub flash: Option<Flash>,
}

/// View model for the contact listing page.
#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub username: String,
    #[serde(flatten)]
    pub contacts: ContactPage,
    pub categories: Vec<Category>,
    pub search: String,
    pub category_filter: String,
    pub flash: Option<Flash>,
}

/// View model for the edit form.
#[derive(Debug, Serialize)]
pub struct EditPage {
    pub contact: crate::models::contacts::Contact,
    pub categories: Vec<Category>,
    pub flash: Option<Flash>,
}

/// View model for the category management page.
#[derive(Debug, Serialize)]
pub struct CategoriesPage {
    pub categories: Vec<Category>,
    pub flash: Option<Flash>,
}
