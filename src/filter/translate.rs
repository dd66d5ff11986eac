//! [`QuerySpec`] into parameterized SQLite statements.
//!
//! Column names only ever come from [`Column::as_sql`]; every client value is
//! a bound parameter.

use rusqlite::types::Value as SqlValue;

use super::spec::{Column, Condition, Predicate, QuerySpec};
use crate::db::connection::UNICODE_UPPER;

/// Columns selected for a [`crate::domain::property::Property`], in row order.
pub const PROPERTY_COLUMNS: &str = "id, parcel_id, address, city, zip, property_class, price, \
     square_feet, bedrooms, bathrooms, lot_size, featured, year_built, garage, stories, coords, \
     images, interior_repairs, exterior_repairs, next_showtime, repair_cost_min, repair_cost_max";

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

pub struct PredicateTranslator<'a> {
    spec: &'a QuerySpec,
}

impl<'a> PredicateTranslator<'a> {
    pub fn new(spec: &'a QuerySpec) -> Self {
        Self { spec }
    }

    /// The page query: filtered, ordered, limited.
    pub fn select(&self) -> SqlQuery {
        let mut params = Vec::new();
        let where_clause = self.where_clause(&mut params);
        let order_clause = self.order_clause();

        params.push(SqlValue::Integer(i64::from(self.spec.limit)));
        params.push(SqlValue::Integer(i64::from(self.spec.offset)));

        SqlQuery {
            sql: format!(
                "SELECT {PROPERTY_COLUMNS} FROM properties{where_clause} {order_clause} LIMIT ? OFFSET ?"
            ),
            params,
        }
    }

    /// The total-count query over the same predicates, without ordering or paging.
    pub fn count(&self) -> SqlQuery {
        let mut params = Vec::new();
        let where_clause = self.where_clause(&mut params);
        SqlQuery {
            sql: format!("SELECT COUNT(*) FROM properties{where_clause}"),
            params,
        }
    }

    fn where_clause(&self, params: &mut Vec<SqlValue>) -> String {
        let parts: Vec<String> = self
            .spec
            .predicates
            .iter()
            .map(|predicate| predicate_sql(predicate, params))
            .collect();

        if parts.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", parts.join(" AND "))
        }
    }

    fn order_clause(&self) -> String {
        match self.spec.sort {
            // `id` breaks ties so pages never overlap.
            Some(sort) => format!(
                "ORDER BY {} {}, {} ASC",
                sort.field.column().as_sql(),
                sort.direction.as_sql(),
                Column::Id.as_sql()
            ),
            None => format!("ORDER BY {} ASC", Column::Id.as_sql()),
        }
    }
}

fn predicate_sql(predicate: &Predicate, params: &mut Vec<SqlValue>) -> String {
    match predicate {
        Predicate::Condition(condition) => condition_sql(condition, params),
        Predicate::AnyOf(conditions) if conditions.is_empty() => "0".to_string(),
        Predicate::AnyOf(conditions) => {
            let parts: Vec<String> = conditions
                .iter()
                .map(|c| condition_sql(c, params))
                .collect();
            format!("({})", parts.join(" OR "))
        }
    }
}

fn condition_sql(condition: &Condition, params: &mut Vec<SqlValue>) -> String {
    match condition {
        Condition::NotNull(column) => format!("{} IS NOT NULL", column.as_sql()),
        Condition::FlagIs(column, flag) => {
            params.push(SqlValue::Integer(i64::from(*flag)));
            format!("{} = ?", column.as_sql())
        }
        Condition::AtMost(column, n) => {
            params.push(SqlValue::Real(*n));
            format!("{} <= ?", column.as_sql())
        }
        Condition::AtLeast(column, n) => {
            params.push(SqlValue::Real(*n));
            format!("{} >= ?", column.as_sql())
        }
        // Both sides go through the same Unicode fold.
        Condition::Contains(column, term) => {
            let pattern = format!("%{}%", escape_like_wildcards(&term.to_uppercase()));
            params.push(SqlValue::Text(pattern));
            format!("{UNICODE_UPPER}({}) LIKE ? ESCAPE '\\'", column.as_sql())
        }
        Condition::In(column, values) => membership(
            column.as_sql(),
            values.iter().cloned().map(SqlValue::Text).collect(),
            params,
        ),
        Condition::InIgnoreCase(column, values) => membership(
            &format!("{UNICODE_UPPER}({})", column.as_sql()),
            values
                .iter()
                .map(|v| SqlValue::Text(v.to_uppercase()))
                .collect(),
            params,
        ),
    }
}

/// `lhs IN (?, ..)`, or a never-true `0` for an empty set.
fn membership(lhs: &str, values: Vec<SqlValue>, params: &mut Vec<SqlValue>) -> String {
    if values.is_empty() {
        return "0".to_string();
    }
    let placeholders = vec!["?"; values.len()].join(", ");
    params.extend(values);
    format!("{lhs} IN ({placeholders})")
}

/// Escape `\`, `%` and `_` so a search term matches literally.
fn escape_like_wildcards(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
