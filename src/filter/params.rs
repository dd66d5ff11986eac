//! Raw query parameters into typed candidates.
//!
//! Nothing here rejects input. Values that cannot be coerced are kept as
//! [`Candidate::Malformed`] so the validator can report every problem at once.

use std::collections::BTreeMap;

/// Parameter name → raw value, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams(BTreeMap<String, String>);

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` string (a URL query).
    ///
    /// A repeated key is joined with `,`, so `city=A&city=B` reads like `city=A,B`.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.append(&key, &value);
        }
        params
    }

    pub fn append(&mut self, key: &str, value: &str) {
        self.0
            .entry(key.to_string())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.append(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The value for `key`, trimmed, treating blank as absent.
    fn non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// A single typed parameter before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate<T> {
    Absent,
    Present(T),
    /// The raw text could not be coerced into `T`.
    Malformed(String),
}

/// Every filter key the listing endpoint recognizes, with its semantic type.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingParams {
    pub search_term: Option<String>,
    pub city: Vec<String>,
    pub zip: Vec<String>,
    pub property_class: Vec<String>,
    pub price: Candidate<f64>,
    pub sqft: Candidate<f64>,
    pub lot_size: Candidate<f64>,
    pub bedrooms: Candidate<f64>,
    pub bathrooms: Candidate<f64>,
    pub featured: Candidate<bool>,
    pub sort: Candidate<(String, String)>,
    pub limit: Candidate<i64>,
    pub offset: Candidate<i64>,
}

impl ListingParams {
    pub fn from_raw(raw: &RawParams) -> Self {
        Self {
            search_term: raw.non_blank("searchTerm").map(str::to_uppercase),
            city: split_list(raw.get("city"))
                .into_iter()
                .map(|c| c.to_uppercase())
                .collect(),
            zip: split_list(raw.get("zip")),
            property_class: split_list(raw.get("propertyClass")),
            price: number(raw.non_blank("price")),
            sqft: number(raw.non_blank("sqft")),
            lot_size: number(raw.non_blank("lotSize")),
            bedrooms: number(raw.non_blank("bedrooms")),
            bathrooms: number(raw.non_blank("bathrooms")),
            featured: flag(raw.non_blank("featured")),
            sort: sort_pair(raw.non_blank("sort")),
            limit: integer(raw.non_blank("limit")),
            offset: integer(raw.non_blank("offset")),
        }
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn number(value: Option<&str>) -> Candidate<f64> {
    match value {
        None => Candidate::Absent,
        Some(v) => v
            .parse()
            .map(Candidate::Present)
            .unwrap_or_else(|_| Candidate::Malformed(v.to_string())),
    }
}

fn integer(value: Option<&str>) -> Candidate<i64> {
    match value {
        None => Candidate::Absent,
        Some(v) => v
            .parse()
            .map(Candidate::Present)
            .unwrap_or_else(|_| Candidate::Malformed(v.to_string())),
    }
}

fn flag(value: Option<&str>) -> Candidate<bool> {
    match value {
        None => Candidate::Absent,
        Some("true") => Candidate::Present(true),
        Some("false") => Candidate::Present(false),
        Some(other) => Candidate::Malformed(other.to_string()),
    }
}

fn sort_pair(value: Option<&str>) -> Candidate<(String, String)> {
    let Some(v) = value else {
        return Candidate::Absent;
    };
    let parts: Vec<&str> = v.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [field, direction] => Candidate::Present((field.to_string(), direction.to_string())),
        _ => Candidate::Malformed(v.to_string()),
    }
}
