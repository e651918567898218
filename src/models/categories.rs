use serde::Serialize;
use sqlx::FromRow;

/// Categories seeded for every new user. These can never be deleted.
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("General", "#3B82F6"),
    ("Family", "#EF4444"),
    ("Work", "#10B981"),
    ("Friends", "#F59E0B"),
];

/// Fallback category for contacts submitted without one.
pub const GENERAL_CATEGORY: &str = "General";

/// Default color for user-created categories.
pub const DEFAULT_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub user_id: i64,
    pub name: String,
    pub color: String,
}

/// Returns true if `name` is one of the seeded default categories.
pub fn is_default_category(name: &str) -> bool {
    DEFAULT_CATEGORIES.iter().any(|(n, _)| *n == name)
}
