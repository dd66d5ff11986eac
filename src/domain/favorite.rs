use serde::Serialize;

/// A user's saved property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favorite {
    pub user_id: String,
    pub property_id: String,
}

impl Favorite {
    pub fn new(user_id: impl Into<String>, property_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            property_id: property_id.into(),
        }
    }
}
