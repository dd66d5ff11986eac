// src/db/migrations.rs
use rusqlite::Connection;

use crate::errors::ServerError;

/// Schema migrations, applied in order. `PRAGMA user_version` records the last one run.
const MIGRATIONS: &[(i64, &str)] = &[
    (1, include_str!("../../sql/001_properties.sql")),
    (2, include_str!("../../sql/002_sessions_favorites.sql")),
    (3, include_str!("../../sql/003_blog.sql")),
];

pub fn current_version(conn: &Connection) -> Result<i64, ServerError> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Runs every migration newer than the recorded version, each in its own transaction.
pub fn apply(conn: &mut Connection) -> Result<usize, ServerError> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| ServerError::DbError(format!("migration {version} failed: {e}")))?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;

        tracing::info!(version, "applied migration");
        applied += 1;
    }

    Ok(applied)
}
