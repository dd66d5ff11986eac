use crate::db::connection::Database;
use crate::domain::property::Property;
use crate::errors::ServerError;
use crate::filter::translate::{PredicateTranslator, SqlQuery, PROPERTY_COLUMNS};
use crate::filter::QuerySpec;
use crate::service::listings::PropertyStore;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

/// Maps a row selected with [`PROPERTY_COLUMNS`].
pub fn row_to_property(row: &Row<'_>) -> rusqlite::Result<Property> {
    Ok(Property {
        id: row.get(0)?,
        parcel_id: row.get(1)?,
        address: row.get(2)?,
        city: row.get(3)?,
        zip: row.get(4)?,
        property_class: row.get(5)?,
        price: row.get(6)?,
        square_feet: row.get(7)?,
        bedrooms: row.get(8)?,
        bathrooms: row.get(9)?,
        lot_size: row.get(10)?,
        featured: row.get::<_, Option<bool>>(11)?.unwrap_or(false),
        year_built: row.get(12)?,
        garage: row.get(13)?,
        stories: row.get(14)?,
        coords: row.get(15)?,
        images: row.get(16)?,
        interior_repairs: row.get(17)?,
        exterior_repairs: row.get(18)?,
        next_showtime: row.get(19)?,
        repair_cost_min: row.get(20)?,
        repair_cost_max: row.get(21)?,
    })
}

pub fn query_properties(conn: &Connection, query: &SqlQuery) -> Result<Vec<Property>, ServerError> {
    let mut stmt = conn.prepare(&query.sql)?;
    let rows = stmt.query_map(params_from_iter(query.params.iter()), row_to_property)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_properties(conn: &Connection, query: &SqlQuery) -> Result<u64, ServerError> {
    let n: i64 = conn.query_row(&query.sql, params_from_iter(query.params.iter()), |row| {
        row.get(0)
    })?;
    Ok(n.max(0) as u64)
}

pub fn find_property(conn: &Connection, id: &str) -> Result<Option<Property>, ServerError> {
    let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?1");
    Ok(conn
        .query_row(&sql, params![id], row_to_property)
        .optional()?)
}

pub fn property_exists(conn: &Connection, id: &str) -> Result<bool, ServerError> {
    Ok(conn
        .query_row(
            "select 1 from properties where id = ?1",
            params![id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

/// Distinct zip codes of every property a listing could return.
pub fn distinct_zips(conn: &Connection) -> Result<Vec<String>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        select distinct zip
        from properties
        where zip is not null
          and address is not null
          and parcel_id is not null
        order by zip
        "#,
    )?;

    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut zips = Vec::new();
    for zip in rows {
        zips.push(zip?);
    }
    Ok(zips)
}

/// Insert a property, or replace every column of the row with the same id.
pub fn upsert_property(conn: &Connection, prop: &Property) -> Result<(), ServerError> {
    conn.execute(
        r#"
        INSERT INTO properties (
            id, parcel_id, address, city, zip, property_class, price, square_feet,
            bedrooms, bathrooms, lot_size, featured, year_built, garage, stories,
            coords, images, interior_repairs, exterior_repairs, next_showtime,
            repair_cost_min, repair_cost_max
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                  ?16, ?17, ?18, ?19, ?20, ?21, ?22)
        ON CONFLICT(id) DO UPDATE SET
            parcel_id = excluded.parcel_id,
            address = excluded.address,
            city = excluded.city,
            zip = excluded.zip,
            property_class = excluded.property_class,
            price = excluded.price,
            square_feet = excluded.square_feet,
            bedrooms = excluded.bedrooms,
            bathrooms = excluded.bathrooms,
            lot_size = excluded.lot_size,
            featured = excluded.featured,
            year_built = excluded.year_built,
            garage = excluded.garage,
            stories = excluded.stories,
            coords = excluded.coords,
            images = excluded.images,
            interior_repairs = excluded.interior_repairs,
            exterior_repairs = excluded.exterior_repairs,
            next_showtime = excluded.next_showtime,
            repair_cost_min = excluded.repair_cost_min,
            repair_cost_max = excluded.repair_cost_max
        "#,
        params![
            &prop.id,
            &prop.parcel_id,
            &prop.address,
            &prop.city,
            &prop.zip,
            &prop.property_class,
            &prop.price,
            &prop.square_feet,
            &prop.bedrooms,
            &prop.bathrooms,
            &prop.lot_size,
            &prop.featured,
            &prop.year_built,
            &prop.garage,
            &prop.stories,
            &prop.coords,
            &prop.images,
            &prop.interior_repairs,
            &prop.exterior_repairs,
            &prop.next_showtime,
            &prop.repair_cost_min,
            &prop.repair_cost_max,
        ],
    )?;
    Ok(())
}

/// Upserts a batch in one transaction. Returns the number of rows written.
pub fn import_properties(db: &Database, properties: &[Property]) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        for prop in properties {
            upsert_property(&tx, prop)?;
        }
        tx.commit()?;
        Ok(properties.len())
    })
}

/// [`PropertyStore`] backed by the SQLite `properties` table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl PropertyStore for SqliteStore {
    fn fetch(&self, spec: &QuerySpec) -> Result<Vec<Property>, ServerError> {
        let query = PredicateTranslator::new(spec).select();
        tracing::debug!(sql = %query.sql, params = query.params.len(), "listing query");
        self.db.with_conn(|conn| query_properties(conn, &query))
    }

    fn count(&self, spec: &QuerySpec) -> Result<u64, ServerError> {
        let query = PredicateTranslator::new(spec).count();
        self.db.with_conn(|conn| count_properties(conn, &query))
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Property>, ServerError> {
        self.db.with_conn(|conn| find_property(conn, id))
    }

    fn zip_codes(&self) -> Result<Vec<String>, ServerError> {
        self.db.with_conn(|conn| distinct_zips(conn))
    }
}
