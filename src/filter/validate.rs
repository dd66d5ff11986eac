//! Field-level validation of normalized listing parameters.

use crate::domain::property::PropertyClass;
use crate::errors::FieldError;

use super::params::{Candidate, ListingParams};
use super::spec::{Sort, SortDirection, SortField, DEFAULT_LIMIT, DEFAULT_OFFSET};

/// Listing parameters that passed every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFilter {
    pub search_term: Option<String>,
    pub cities: Vec<String>,
    pub zips: Vec<String>,
    pub property_classes: Vec<PropertyClass>,
    pub max_price: Option<f64>,
    pub min_sqft: Option<f64>,
    pub min_lot_size: Option<f64>,
    pub min_bedrooms: Option<f64>,
    pub min_bathrooms: Option<f64>,
    pub featured: Option<bool>,
    pub sort: Option<Sort>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ValidatedFilter {
    fn default() -> Self {
        Self {
            search_term: None,
            cities: Vec::new(),
            zips: Vec::new(),
            property_classes: Vec::new(),
            max_price: None,
            min_sqft: None,
            min_lot_size: None,
            min_bedrooms: None,
            min_bathrooms: None,
            featured: None,
            sort: None,
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FilterValidator {
    max_page_size: u32,
}

impl FilterValidator {
    /// `max_page_size` bounds an explicit `limit`; the default page always passes.
    pub fn new(max_page_size: u32) -> Self {
        Self { max_page_size }
    }

    /// Runs every rule and returns all violations together.
    pub fn validate(&self, params: ListingParams) -> Result<ValidatedFilter, Vec<FieldError>> {
        let mut errors = Vec::new();

        let property_classes = property_classes(&params.property_class, &mut errors);
        let max_price = non_negative("price", &params.price, &mut errors);
        let min_sqft = non_negative("sqft", &params.sqft, &mut errors);
        let min_lot_size = non_negative("lotSize", &params.lot_size, &mut errors);
        let min_bedrooms = non_negative("bedrooms", &params.bedrooms, &mut errors);
        let min_bathrooms = non_negative("bathrooms", &params.bathrooms, &mut errors);

        let featured = match params.featured {
            Candidate::Absent => None,
            Candidate::Present(flag) => Some(flag),
            Candidate::Malformed(_) => {
                errors.push(FieldError::new("featured", "featured must be true or false"));
                None
            }
        };

        let sort = sort(&params.sort, &mut errors);

        let limit = match page_number("limit", &params.limit, &mut errors) {
            Some(n) if n > self.max_page_size => {
                errors.push(FieldError::new(
                    "limit",
                    format!("limit must not exceed {}", self.max_page_size),
                ));
                DEFAULT_LIMIT
            }
            Some(n) => n,
            None => DEFAULT_LIMIT,
        };
        let offset = page_number("offset", &params.offset, &mut errors).unwrap_or(DEFAULT_OFFSET);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedFilter {
            search_term: params.search_term,
            cities: params.city,
            zips: params.zip,
            property_classes,
            max_price,
            min_sqft,
            min_lot_size,
            min_bedrooms,
            min_bathrooms,
            featured,
            sort,
            limit,
            offset,
        })
    }
}

fn property_classes(raw: &[String], errors: &mut Vec<FieldError>) -> Vec<PropertyClass> {
    let mut classes = Vec::with_capacity(raw.len());
    for value in raw {
        match value.parse::<PropertyClass>() {
            Ok(class) => classes.push(class),
            Err(message) => {
                errors.push(FieldError::new("propertyClass", message));
                return Vec::new();
            }
        }
    }
    classes
}

fn non_negative(field: &str, value: &Candidate<f64>, errors: &mut Vec<FieldError>) -> Option<f64> {
    match value {
        Candidate::Absent => None,
        Candidate::Present(n) if n.is_finite() && *n >= 0.0 => Some(*n),
        Candidate::Present(_) | Candidate::Malformed(_) => {
            errors.push(FieldError::new(field, format!("{field} must be numeric")));
            None
        }
    }
}

/// A non-negative page number that fits `u32`; `None` when absent or rejected.
fn page_number(field: &str, value: &Candidate<i64>, errors: &mut Vec<FieldError>) -> Option<u32> {
    match value {
        Candidate::Absent => None,
        Candidate::Present(n) => match u32::try_from(*n) {
            Ok(n) => Some(n),
            Err(_) => {
                errors.push(FieldError::new(field, format!("{field} must be numeric")));
                None
            }
        },
        Candidate::Malformed(_) => {
            errors.push(FieldError::new(field, format!("{field} must be numeric")));
            None
        }
    }
}

fn sort(value: &Candidate<(String, String)>, errors: &mut Vec<FieldError>) -> Option<Sort> {
    match value {
        Candidate::Absent => None,
        Candidate::Malformed(_) => {
            errors.push(FieldError::new(
                "sort",
                "sort must be of the form field,direction",
            ));
            None
        }
        Candidate::Present((field, direction)) => {
            let field = field
                .parse::<SortField>()
                .map_err(|message| errors.push(FieldError::new("sort", message)));
            let direction = direction
                .parse::<SortDirection>()
                .map_err(|message| errors.push(FieldError::new("sort", message)));
            match (field, direction) {
                (Ok(field), Ok(direction)) => Some(Sort { field, direction }),
                _ => None,
            }
        }
    }
}
