use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::domain::blog::BlogPost;
use crate::domain::property::Property;
use crate::router::serve_request;
use crate::state::AppState;
use anyhow::{Context, Result};
use astra::Server;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod filter;
mod responses;
mod router;
mod service;
mod state;


#[derive(Parser)]
#[command(name = "flispi-listings", about = "Land bank property listings API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply migrations and serve the HTTP API (default).
    Serve,
    /// Apply pending schema migrations and exit.
    Migrate,
    /// Upsert properties from a JSON array file.
    Import { file: PathBuf },
    /// Insert blog posts from a JSON array file.
    ImportPosts { file: PathBuf },
    /// Issue a session token for a user and print it.
    IssueSession { user_id: String },
    /// Revoke a session token.
    RevokeSession { token: String },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let db = Database::new(&config.database_path);
    init_db(&db).context("database initialization failed")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config),
        Command::Migrate => Ok(()),
        Command::Import { file } => {
            let properties: Vec<Property> = read_json(&file)?;
            let n = db::properties::import_properties(&db, &properties)
                .context("property import failed")?;
            info!(count = n, file = %file.display(), "imported properties");
            Ok(())
        }
        Command::ImportPosts { file } => {
            let posts: Vec<BlogPost> = read_json(&file)?;
            let n = service::blog::BlogService::new(db)
                .import_posts(&posts)
                .context("blog import failed")?;
            info!(count = n, file = %file.display(), "imported blog posts");
            Ok(())
        }
        Command::IssueSession { user_id } => {
            let now = chrono::Utc::now().timestamp();
            let token = db
                .with_conn(|conn| {
                    auth::sessions::create_session(conn, &user_id, now, config.session_ttl_secs)
                })
                .context("could not issue session")?;
            println!("{token}");
            Ok(())
        }
        Command::RevokeSession { token } => {
            let now = chrono::Utc::now().timestamp();
            let revoked = db
                .with_conn(|conn| auth::sessions::revoke_session(conn, &token, now))
                .context("could not revoke session")?;
            info!(revoked, "session revocation");
            Ok(())
        }
    }
}

fn serve(config: &Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(config));

    info!(addr = %config.bind_addr, workers = config.max_workers, "starting server");

    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    server
        .serve(move |req, _info| serve_request(req, &state))
        .context("server ended with error")?;

    info!("server shut down cleanly");
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
