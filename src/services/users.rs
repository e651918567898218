use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::{
        requests::{LoginForm, RegisterForm},
        users::{NewUser, User},
    },
    queries::{categories, users},
    validation,
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::Acquire;

/// Hashes a password using Argon2 with a random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a password hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Registers a new user and seeds their default categories.
///
/// The user row and the category seed are committed in one transaction, so a
/// registered user always has the four default categories.
pub async fn register_user(conn: &mut DbConn, form: RegisterForm) -> Result<User> {
    let username = form.username.trim().to_string();
    let password = form.password.trim();

    validation::validate_username(&username)?;
    validation::validate_password(password)?;

    let password_hash = hash_password(password)?;

    let mut tx = conn.begin().await.map_err(Error::Sqlx)?;

    let user = users::create_user(
        &mut tx,
        NewUser {
            username,
            password_hash,
        },
    )
    .await?;

    categories::seed_default_categories(&mut tx, user.id).await?;

    tx.commit().await.map_err(Error::Sqlx)?;

    Ok(user)
}

/// Authenticates a user by username and password.
///
/// Unknown usernames and wrong passwords fail identically so the error never
/// reveals which of the two was wrong.
pub async fn login_user(conn: &mut DbConn, form: LoginForm) -> Result<User> {
    let username = form.username.trim();
    let password = form.password.trim();

    let user = users::get_user_by_username(conn, username)
        .await?
        .ok_or_else(|| Error::Authentication("Invalid credentials".to_string()))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(Error::Authentication("Invalid credentials".to_string()));
    }

    Ok(user)
}
