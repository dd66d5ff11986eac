use serde::Serialize;

use crate::db::connection::Database;
use crate::db::favorites;
use crate::db::properties::property_exists;
use crate::domain::favorite::Favorite;
use crate::domain::property::Property;
use crate::errors::ServerError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedMetadata {
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedProperties {
    pub properties: Vec<Property>,
    pub metadata: SavedMetadata,
}

/// Saved properties per user.
pub struct FavoritesService {
    db: Database,
}

impl FavoritesService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn save(&self, user_id: &str, property_id: &str) -> Result<(), ServerError> {
        let fav = favorite(user_id, property_id)?;
        self.db.with_conn(|conn| {
            if !property_exists(conn, &fav.property_id)? {
                return Err(ServerError::NotFound("Property not found.".into()));
            }
            let added = favorites::add_favorite(conn, &fav)?;
            tracing::debug!(user_id = %fav.user_id, property_id = %fav.property_id, added, "saved property");
            Ok(())
        })
    }

    pub fn remove(&self, user_id: &str, property_id: &str) -> Result<(), ServerError> {
        let fav = favorite(user_id, property_id)?;
        self.db.with_conn(|conn| {
            let removed = favorites::remove_favorite(conn, &fav)?;
            tracing::debug!(user_id = %fav.user_id, property_id = %fav.property_id, removed, "removed saved property");
            Ok(())
        })
    }

    pub fn is_saved(&self, user_id: &str, property_id: &str) -> Result<bool, ServerError> {
        let fav = favorite(user_id, property_id)?;
        self.db
            .with_conn(|conn| favorites::favorite_exists(conn, &fav))
    }

    pub fn list(&self, user_id: &str) -> Result<SavedProperties, ServerError> {
        let user_id = required("userId", user_id)?;
        let properties = self
            .db
            .with_conn(|conn| favorites::favorite_properties(conn, user_id))?;
        Ok(SavedProperties {
            metadata: SavedMetadata {
                total: properties.len(),
            },
            properties,
        })
    }
}

fn required<'a>(name: &str, value: &'a str) -> Result<&'a str, ServerError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServerError::BadRequest(format!("missing {name}")));
    }
    Ok(value)
}

fn favorite(user_id: &str, property_id: &str) -> Result<Favorite, ServerError> {
    Ok(Favorite::new(
        required("userId", user_id)?,
        required("propertyId", property_id)?,
    ))
}
