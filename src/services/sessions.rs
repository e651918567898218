use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::users::{NewSession, User},
    queries::{sessions, users},
};
use chrono::{Duration, Utc};
use rand::RngCore;

/// Generates a new opaque session token: 32 random bytes, hex-encoded.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Issues a session for the user and returns the raw token for the cookie.
/// Only the token's hash is stored.
///
/// Expired rows are swept opportunistically here, so the table never grows
/// without bound under normal login traffic.
pub async fn start_session(conn: &mut DbConn, user_id: i64, ttl_hours: i64) -> Result<String> {
    let swept = sessions::delete_expired_sessions(conn).await?;
    if swept > 0 {
        tracing::debug!(swept, "expired sessions removed");
    }

    let token = generate_session_token();
    let token_hash = sessions::hash_session_token(&token);

    sessions::create_session(
        conn,
        NewSession {
            user_id,
            token_hash,
            expires_at: Utc::now() + Duration::hours(ttl_hours),
        },
    )
    .await?;

    Ok(token)
}

/// Resolves a session token to its user.
///
/// Fails for unknown and expired tokens alike; expired rows are removed on
/// the way out.
pub async fn authenticate_session(conn: &mut DbConn, token: &str) -> Result<User> {
    if token.is_empty() {
        return Err(Error::Authentication("No session token".to_string()));
    }

    let token_hash = sessions::hash_session_token(token);
    let session = sessions::get_session_by_token_hash(conn, &token_hash)
        .await?
        .ok_or_else(|| Error::Authentication("Unknown session token".to_string()))?;

    if session.expires_at <= Utc::now() {
        sessions::delete_session_by_token_hash(conn, &token_hash).await?;
        return Err(Error::Authentication("Session expired".to_string()));
    }

    let user = users::get_user_by_id(conn, session.user_id)
        .await?
        .ok_or_else(|| Error::Authentication("User no longer exists".to_string()))?;

    Ok(user)
}

/// Revokes the session behind the token. Revoking an unknown token is not an
/// error; logout clears the session unconditionally.
pub async fn revoke_session(conn: &mut DbConn, token: &str) -> Result<()> {
    let token_hash = sessions::hash_session_token(token);
    sessions::delete_session_by_token_hash(conn, &token_hash).await?;
    Ok(())
}
