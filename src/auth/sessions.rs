// src/auth/sessions.rs
use crate::auth::token::{generate_session_token, hash_token};
use crate::errors::ServerError;
use astra::Request;
use rusqlite::{params, Connection, OptionalExtension};

pub const SESSION_COOKIE: &str = "session";

/// Issue a session for `user_id`; returns the raw token (only its hash is stored).
pub fn create_session(
    conn: &Connection,
    user_id: &str,
    now: i64,
    ttl_secs: i64,
) -> Result<String, ServerError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(ServerError::BadRequest("missing user id".into()));
    }

    let raw_token = generate_session_token();
    let hash = hash_token(&raw_token);

    conn.execute(
        r#"
        insert into sessions (user_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![user_id, hash.as_slice(), now, now + ttl_secs],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

/// The user behind a live (unexpired, unrevoked) session token.
pub fn load_user_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<String>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select user_id
        from sessions
        where token_hash = ?
          and expires_at > ?
          and revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<bool, ServerError> {
    let hash = hash_token(raw_token);
    let n = conn
        .execute(
            "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
            params![now, hash.as_slice()],
        )
        .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(n > 0)
}

/// The `session` cookie value, if the request carries one.
pub fn session_cookie(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
