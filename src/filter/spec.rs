//! The validated, storage-neutral form of a listing request.

use std::str::FromStr;

use super::validate::ValidatedFilter;

pub const DEFAULT_LIMIT: u32 = 30;
pub const DEFAULT_OFFSET: u32 = 0;

/// Columns of the `properties` table a predicate or ordering may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    ParcelId,
    Address,
    City,
    Zip,
    PropertyClass,
    Price,
    SquareFeet,
    Bedrooms,
    Bathrooms,
    LotSize,
    Featured,
    YearBuilt,
    Stories,
    NextShowtime,
}

impl Column {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::ParcelId => "parcel_id",
            Column::Address => "address",
            Column::City => "city",
            Column::Zip => "zip",
            Column::PropertyClass => "property_class",
            Column::Price => "price",
            Column::SquareFeet => "square_feet",
            Column::Bedrooms => "bedrooms",
            Column::Bathrooms => "bathrooms",
            Column::LotSize => "lot_size",
            Column::Featured => "featured",
            Column::YearBuilt => "year_built",
            Column::Stories => "stories",
            Column::NextShowtime => "next_showtime",
        }
    }
}

/// Whitelist of columns a client may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    SquareFeet,
    LotSize,
    Bedrooms,
    Bathrooms,
    YearBuilt,
    Stories,
    City,
    Zip,
    Address,
    NextShowtime,
}

impl SortField {
    pub fn column(&self) -> Column {
        match self {
            SortField::Price => Column::Price,
            SortField::SquareFeet => Column::SquareFeet,
            SortField::LotSize => Column::LotSize,
            SortField::Bedrooms => Column::Bedrooms,
            SortField::Bathrooms => Column::Bathrooms,
            SortField::YearBuilt => Column::YearBuilt,
            SortField::Stories => Column::Stories,
            SortField::City => Column::City,
            SortField::Zip => Column::Zip,
            SortField::Address => Column::Address,
            SortField::NextShowtime => Column::NextShowtime,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortField::Price),
            "square_feet" | "sqft" => Ok(SortField::SquareFeet),
            "lot_size" | "lotSize" => Ok(SortField::LotSize),
            "bedrooms" => Ok(SortField::Bedrooms),
            "bathrooms" => Ok(SortField::Bathrooms),
            "year_built" => Ok(SortField::YearBuilt),
            "stories" => Ok(SortField::Stories),
            "city" => Ok(SortField::City),
            "zip" => Ok(SortField::Zip),
            "address" => Ok(SortField::Address),
            "next_showtime" => Ok(SortField::NextShowtime),
            other => Err(format!("{other} is not a sortable field")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err("sort direction must be asc or desc".to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// One test against a single column. Each variant carries exactly the
/// value its comparison needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    NotNull(Column),
    /// Boolean column equals the flag.
    FlagIs(Column, bool),
    /// Exact membership.
    In(Column, Vec<String>),
    /// Membership compared after Unicode upper-casing both sides.
    InIgnoreCase(Column, Vec<String>),
    AtMost(Column, f64),
    AtLeast(Column, f64),
    /// Case-insensitive substring match. Wildcards in the term are literal.
    Contains(Column, String),
}

/// A unit of the conjunctive predicate list.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Condition(Condition),
    /// Satisfied when any inner condition holds.
    AnyOf(Vec<Condition>),
}

impl From<Condition> for Predicate {
    fn from(condition: Condition) -> Self {
        Predicate::Condition(condition)
    }
}

/// Validated query: every predicate must hold (AND), then sort and page.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub predicates: Vec<Predicate>,
    pub sort: Option<Sort>,
    pub limit: u32,
    pub offset: u32,
}

impl QuerySpec {
    /// The predicates every listing carries regardless of client input.
    pub fn baseline() -> Vec<Predicate> {
        vec![
            Condition::NotNull(Column::Address).into(),
            Condition::NotNull(Column::ParcelId).into(),
        ]
    }

    pub fn build(filter: ValidatedFilter) -> Self {
        let mut predicates = Self::baseline();

        if let Some(term) = filter.search_term {
            predicates.push(Predicate::AnyOf(vec![
                Condition::Contains(Column::Address, term.clone()),
                Condition::Contains(Column::ParcelId, term),
            ]));
        }

        if !filter.cities.is_empty() {
            predicates.push(Condition::InIgnoreCase(Column::City, filter.cities).into());
        }
        if !filter.zips.is_empty() {
            predicates.push(Condition::In(Column::Zip, filter.zips).into());
        }
        if !filter.property_classes.is_empty() {
            let classes = filter
                .property_classes
                .iter()
                .map(|c| c.as_str().to_string())
                .collect();
            predicates.push(Condition::In(Column::PropertyClass, classes).into());
        }

        if let Some(max_price) = filter.max_price {
            predicates.push(Condition::AtMost(Column::Price, max_price).into());
        }
        if let Some(min_sqft) = filter.min_sqft {
            predicates.push(Condition::AtLeast(Column::SquareFeet, min_sqft).into());
        }
        if let Some(min_lot) = filter.min_lot_size {
            predicates.push(Condition::AtLeast(Column::LotSize, min_lot).into());
        }
        if let Some(beds) = filter.min_bedrooms {
            predicates.push(Condition::AtLeast(Column::Bedrooms, beds).into());
        }
        if let Some(baths) = filter.min_bathrooms {
            predicates.push(Condition::AtLeast(Column::Bathrooms, baths).into());
        }
        if let Some(featured) = filter.featured {
            predicates.push(Condition::FlagIs(Column::Featured, featured).into());
        }

        Self {
            predicates,
            sort: filter.sort,
            limit: filter.limit,
            offset: filter.offset,
        }
    }
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            predicates: Self::baseline(),
            sort: None,
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}
