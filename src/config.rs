//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file (default: listings.sqlite3).
    pub database_path: String,

    /// Address the HTTP server binds to (default: 127.0.0.1:4000).
    pub bind_addr: SocketAddr,

    /// Worker threads serving requests (default: 8).
    pub max_workers: usize,

    /// Largest `limit` a listing request may ask for (default: 100).
    pub max_page_size: u32,

    /// Lifetime of tokens issued by `issue-session`, in seconds (default: 7 days).
    pub session_ttl_secs: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_path =
            env::var("LISTINGS_DATABASE_PATH").unwrap_or_else(|_| "listings.sqlite3".to_string());

        let bind_addr = env::var("LISTINGS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:4000".to_string())
            .parse()
            .context("LISTINGS_BIND_ADDR must be a socket address like 127.0.0.1:4000")?;

        let max_workers = env::var("LISTINGS_MAX_WORKERS")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .context("LISTINGS_MAX_WORKERS must be a valid usize")?;

        let max_page_size = env::var("LISTINGS_MAX_PAGE_SIZE")
            .map(|v| v.parse())
            .unwrap_or(Ok(DEFAULT_MAX_PAGE_SIZE))
            .context("LISTINGS_MAX_PAGE_SIZE must be a valid u32")?;

        let session_ttl_secs = env::var("LISTINGS_SESSION_TTL_SECS")
            .map(|v| v.parse())
            .unwrap_or(Ok(DEFAULT_SESSION_TTL_SECS))
            .context("LISTINGS_SESSION_TTL_SECS must be a valid i64")?;

        Ok(Self {
            database_path,
            bind_addr,
            max_workers,
            max_page_size,
            session_ttl_secs,
        })
    }
}
