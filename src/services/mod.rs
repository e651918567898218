pub mod categories;
pub mod contacts;
pub mod cookies;
pub mod export;
pub mod sessions;
pub mod users;
