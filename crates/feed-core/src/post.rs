//! The post item served by the listing endpoint.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single post as returned by the listing endpoint.
///
/// Posts are never mutated after they are fetched. Extra fields in the payload
/// (for example `userId`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Post {
    /// Server-assigned identifier, unique across the listing.
    pub id: u64,
    pub title: String,
    pub body: String,
}

impl Post {
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
        }
    }
}
