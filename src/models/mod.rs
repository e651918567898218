pub mod categories;
pub mod contacts;
pub mod flash;
pub mod requests;
pub mod users;
