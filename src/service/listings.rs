//! Listing orchestration: parameters in, a page of properties out.

use serde::Serialize;

use crate::domain::property::Property;
use crate::errors::ServerError;
use crate::filter::{FilterValidator, ListingParams, QuerySpec, RawParams};

/// What the listing pipeline needs from storage.
pub trait PropertyStore {
    /// Rows matching every predicate, in `spec.sort` order, one page of them.
    fn fetch(&self, spec: &QuerySpec) -> Result<Vec<Property>, ServerError>;

    /// Number of rows matching `spec.predicates`, ignoring paging.
    fn count(&self, spec: &QuerySpec) -> Result<u64, ServerError>;

    fn find_by_id(&self, id: &str) -> Result<Option<Property>, ServerError>;

    fn zip_codes(&self) -> Result<Vec<String>, ServerError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPage {
    pub properties: Vec<Property>,
    pub metadata: PageMetadata,
}

pub struct ListingService<S> {
    store: S,
    validator: FilterValidator,
}

impl<S: PropertyStore> ListingService<S> {
    pub fn new(store: S, max_page_size: u32) -> Self {
        Self {
            store,
            validator: FilterValidator::new(max_page_size),
        }
    }

    /// Compile `raw` into a query spec without touching storage.
    pub fn compile(&self, raw: &RawParams) -> Result<QuerySpec, ServerError> {
        let params = ListingParams::from_raw(raw);
        let filter = self.validator.validate(params).map_err(|errors| {
            tracing::debug!(errors = errors.len(), "rejected listing parameters");
            ServerError::Validation(errors)
        })?;
        Ok(QuerySpec::build(filter))
    }

    pub fn list(&self, raw: &RawParams) -> Result<ListingPage, ServerError> {
        let spec = self.compile(raw)?;

        let properties = self.store.fetch(&spec)?;
        let total = self.store.count(&spec)?;

        tracing::debug!(
            returned = properties.len(),
            total,
            limit = spec.limit,
            offset = spec.offset,
            "listed properties"
        );

        Ok(ListingPage {
            properties,
            metadata: PageMetadata {
                total,
                limit: spec.limit,
                offset: spec.offset,
            },
        })
    }

    pub fn get(&self, id: &str) -> Result<Property, ServerError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ServerError::BadRequest("Invalid ID supplied".into()));
        }
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ServerError::NotFound("Property not found.".into()))
    }

    pub fn zip_codes(&self) -> Result<Vec<String>, ServerError> {
        self.store.zip_codes()
    }
}
