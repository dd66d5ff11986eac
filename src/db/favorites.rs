// src/db/favorites.rs
use crate::db::properties::row_to_property;
use crate::domain::favorite::Favorite;
use crate::domain::property::Property;
use crate::errors::ServerError;
use crate::filter::translate::PROPERTY_COLUMNS;
use rusqlite::{params, Connection, OptionalExtension};

/// Save a property for a user. Saving twice is a no-op; returns whether a row was added.
pub fn add_favorite(conn: &Connection, fav: &Favorite) -> Result<bool, ServerError> {
    let n = conn.execute(
        r#"
        insert into favorites (user_id, property_id)
        values (?1, ?2)
        on conflict (user_id, property_id) do nothing
        "#,
        params![&fav.user_id, &fav.property_id],
    )?;
    Ok(n > 0)
}

pub fn remove_favorite(conn: &Connection, fav: &Favorite) -> Result<bool, ServerError> {
    let n = conn.execute(
        "delete from favorites where user_id = ?1 and property_id = ?2",
        params![&fav.user_id, &fav.property_id],
    )?;
    Ok(n > 0)
}

pub fn favorite_exists(conn: &Connection, fav: &Favorite) -> Result<bool, ServerError> {
    Ok(conn
        .query_row(
            "select 1 from favorites where user_id = ?1 and property_id = ?2",
            params![&fav.user_id, &fav.property_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

/// Properties the user has saved, ordered by property id.
pub fn favorite_properties(conn: &Connection, user_id: &str) -> Result<Vec<Property>, ServerError> {
    let sql = format!(
        "SELECT {PROPERTY_COLUMNS} FROM properties \
         WHERE id IN (SELECT property_id FROM favorites WHERE user_id = ?1) \
         ORDER BY id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_property)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
