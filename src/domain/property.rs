// src/domain/property.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// A property row as stored in the `properties` table and returned by the API.
///
/// Rows are written by the ingestion side (`import` command); the listing
/// endpoints only read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub parcel_id: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub property_class: Option<String>,
    pub price: Option<i64>,
    pub square_feet: Option<i64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub lot_size: Option<f64>,
    #[serde(default)]
    pub featured: bool,
    pub year_built: Option<String>,
    pub garage: Option<String>,
    pub stories: Option<i64>,
    pub coords: Option<Value>,
    pub images: Option<Value>,
    pub interior_repairs: Option<Value>,
    pub exterior_repairs: Option<Value>,
    pub next_showtime: Option<DateTime<Utc>>,
    pub repair_cost_min: Option<f64>,
    pub repair_cost_max: Option<f64>,
}

impl Property {
    /// A bare record with only an id; handy for ingestion defaults and tests.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parcel_id: None,
            address: None,
            city: None,
            zip: None,
            property_class: None,
            price: None,
            square_feet: None,
            bedrooms: None,
            bathrooms: None,
            lot_size: None,
            featured: false,
            year_built: None,
            garage: None,
            stories: None,
            coords: None,
            images: None,
            interior_repairs: None,
            exterior_repairs: None,
            next_showtime: None,
            repair_cost_min: None,
            repair_cost_max: None,
        }
    }
}

/// The closed set of land-bank property classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyClass {
    ResidentialImproved,
    ResidentialVacantLot,
    CommercialImproved,
    CommercialVacantLot,
    IndustrialImproved,
    IndustrialVacantLot,
}

impl PropertyClass {
    pub const ALL: [PropertyClass; 6] = [
        PropertyClass::ResidentialImproved,
        PropertyClass::ResidentialVacantLot,
        PropertyClass::CommercialImproved,
        PropertyClass::CommercialVacantLot,
        PropertyClass::IndustrialImproved,
        PropertyClass::IndustrialVacantLot,
    ];

    /// The value stored in `properties.property_class`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyClass::ResidentialImproved => "Res Imp",
            PropertyClass::ResidentialVacantLot => "Res Vac Lot",
            PropertyClass::CommercialImproved => "Com Imp",
            PropertyClass::CommercialVacantLot => "Com Vac Lot",
            PropertyClass::IndustrialImproved => "Ind Imp",
            PropertyClass::IndustrialVacantLot => "Ind Vac Lot",
        }
    }
}

impl FromStr for PropertyClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| format!("unknown property class: {s}"))
    }
}
