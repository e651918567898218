pub mod categories;
pub mod contacts;
pub mod sessions;
pub mod users;
