use crate::config::Config;
use crate::db::connection::Database;
use crate::db::properties::SqliteStore;
use crate::service::blog::BlogService;
use crate::service::favorites::FavoritesService;
use crate::service::listings::ListingService;

/// Everything a request handler needs; shared read-only across workers.
pub struct AppState {
    pub db: Database,
    pub listings: ListingService<SqliteStore>,
    pub favorites: FavoritesService,
    pub blog: BlogService,
}

impl AppState {
    pub fn new(db: Database, max_page_size: u32) -> Self {
        Self {
            listings: ListingService::new(SqliteStore::new(db.clone()), max_page_size),
            favorites: FavoritesService::new(db.clone()),
            blog: BlogService::new(db.clone()),
            db,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Database::new(&config.database_path), config.max_page_size)
    }
}
