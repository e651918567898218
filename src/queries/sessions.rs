use crate::{
    error::{Error, Result},
    models::users::{NewSession, Session},
};
use sha2::{Digest, Sha256};

use crate::DbConn;

/// Hash a session token using SHA-256 for secure storage
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Creates a new session in the database.
pub async fn create_session(conn: &mut DbConn, new_session: NewSession) -> Result<Session> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (user_id, token_hash, expires_at)
        VALUES (?, ?, ?)
        RETURNING id, user_id, token_hash, expires_at, created_at
        "#,
    )
    .bind(new_session.user_id)
    .bind(new_session.token_hash)
    .bind(new_session.expires_at)
    .fetch_one(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(session)
}

/// Gets a single session by its token hash. The session may not exist.
pub async fn get_session_by_token_hash(
    conn: &mut DbConn,
    token_hash: &str,
) -> Result<Option<Session>> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, user_id, token_hash, expires_at, created_at
        FROM sessions
        WHERE token_hash = ?
        "#,
    )
    .bind(token_hash)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(session)
}

/// Deletes a session by its token hash.
pub async fn delete_session_by_token_hash(conn: &mut DbConn, token_hash: &str) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE token_hash = ?
        "#,
    )
    .bind(token_hash)
    .execute(conn)
    .await
    .map_err(Error::Sqlx)?
    .rows_affected();

    Ok(rows_affected)
}

/// Deletes all expired sessions.
pub async fn delete_expired_sessions(conn: &mut DbConn) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE expires_at <= ?
        "#,
    )
    .bind(chrono::Utc::now())
    .execute(conn)
    .await
    .map_err(Error::Sqlx)?
    .rows_affected();

    Ok(rows_affected)
}
