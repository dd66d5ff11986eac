//! Listing filter compiler.
//!
//! Request parameters flow through four stages:
//! [`params`] (normalize) → [`validate`] → [`spec`] (build) → [`translate`] (SQL).

pub mod params;
pub mod spec;
pub mod translate;
pub mod validate;

pub use params::{ListingParams, RawParams};
pub use spec::QuerySpec;
pub use translate::PredicateTranslator;
pub use validate::FilterValidator;
