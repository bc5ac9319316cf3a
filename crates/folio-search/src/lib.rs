//! Search index for Folio.
//!
//! Every public page section becomes a [`SearchRecord`]; [`TextIndex`]
//! indexes their title, body, page title and summary. The serialized
//! [`SearchIndexDocument`] is what the site's client-side search loads.

mod index;
mod record;

use serde::Serialize;

pub use index::{INDEXED_FIELDS, STORED_FIELDS, SearchHit, TextIndex, tokenize};
pub use record::{SearchRecord, build_records};

/// Version of the serialized search index layout.
pub const SEARCH_SCHEMA_VERSION: u32 = 1;

/// Root of `docs-search-index.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexDocument {
    pub schema_version: u32,
    pub index: TextIndex,
}

impl SearchIndexDocument {
    /// Index `records` under the current schema version.
    #[must_use]
    pub fn build(records: &[SearchRecord]) -> Self {
        Self {
            schema_version: SEARCH_SCHEMA_VERSION,
            index: TextIndex::build(records),
        }
    }
}
