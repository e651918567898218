//! Input validation for user-submitted fields.
//!
//! All checks run before a write is attempted; a failure aborts the write and
//! surfaces a user-facing message at the handler boundary.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\s\-\+\(\)]{7,20}$").expect("valid phone regex"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
            .expect("valid email regex")
    })
}

/// Validates a contact name: at least 2 characters after trimming.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().chars().count() < 2 {
        return Err(Error::Validation(
            "Name is required and must be at least 2 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a phone number. Empty is valid; otherwise the value must consist
/// of digits, spaces, `-`, `+` and parentheses, 7 to 20 characters long.
pub fn validate_phone(phone: &str) -> Result<()> {
    if phone.is_empty() {
        return Ok(());
    }

    if !phone_regex().is_match(phone) {
        return Err(Error::Validation("Invalid phone number format".to_string()));
    }

    Ok(())
}

/// Validates an email address. Empty is valid; otherwise the value must have
/// a `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Ok(());
    }

    if !email_regex().is_match(email) {
        return Err(Error::Validation("Invalid email format".to_string()));
    }

    Ok(())
}

/// Validates a username at registration: at least 3 characters after trimming.
pub fn validate_username(username: &str) -> Result<()> {
    if username.trim().chars().count() < 3 {
        return Err(Error::Validation(
            "Username must be at least 3 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a password at registration: at least 6 characters.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < 6 {
        return Err(Error::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    Ok(())
}
