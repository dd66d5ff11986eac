use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::cell::RefCell;
use std::time::Duration;

use crate::db::migrations;
use crate::errors::ServerError;

// Thread-local connection slot, tagged with the file it was opened on.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = const { RefCell::new(None) };
}

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQL function folding text with Rust's Unicode upper-casing.
/// The built-in `UPPER` only folds ASCII.
pub const UNICODE_UPPER: &str = "unicode_upper";

#[derive(Debug, Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Open or fetch the per-thread SQLite connection and run `f(conn)`.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();

                let stale = !matches!(slot.as_ref(), Some((path, _)) if *path == self.path);
                if stale {
                    *slot = Some((self.path.clone(), open(&self.path)?));
                }

                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(ServerError::Internal("connection slot empty".into())),
                }
            })
            .map_err(|_| ServerError::Internal("thread-local connection unavailable".into()))?
    }
}

fn open(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.pragma_update(None, "foreign_keys", true)?;
    register_functions(&conn)?;
    tracing::debug!(path, "opened sqlite connection");
    Ok(conn)
}

pub fn register_functions(conn: &Connection) -> Result<(), ServerError> {
    conn.create_scalar_function(
        UNICODE_UPPER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        unicode_upper,
    )?;
    Ok(())
}

fn unicode_upper(ctx: &Context<'_>) -> rusqlite::Result<Option<String>> {
    Ok(match ctx.get_raw(0) {
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).to_uppercase()),
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    })
}

/// Bring the database schema up to date. Returns the number of migrations applied.
pub fn init_db(db: &Database) -> Result<usize, ServerError> {
    let applied = db.with_conn(migrations::apply)?;
    tracing::info!(path = db.path(), applied, "database schema is current");
    Ok(applied)
}
