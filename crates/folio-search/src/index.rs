//! Inverted text index over search records.

use std::collections::BTreeMap;

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::record::SearchRecord;

/// Indexed fields with their ranking boost.
pub const INDEXED_FIELDS: [(&str, f64); 4] = [
    ("title", 3.0),
    ("body", 1.0),
    ("pageTitle", 2.0),
    ("summary", 1.5),
];

/// Fields kept in the document store.
pub const STORED_FIELDS: [&str; 7] = [
    "title",
    "body",
    "pageTitle",
    "summary",
    "url",
    "kind",
    "pageId",
];

/// Split text into lowercased Unicode words.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

/// Term-frequency index of records, with their stored fields.
///
/// Every map is ordered so the serialized form is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextIndex {
    fields: Vec<String>,
    document_count: usize,
    /// term -> field -> record id -> term frequency
    index: BTreeMap<String, BTreeMap<String, BTreeMap<String, u32>>>,
    /// record id -> field -> value
    document_store: BTreeMap<String, BTreeMap<String, String>>,
}

/// A ranked search result.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit<'a> {
    pub id: &'a str,
    pub score: f64,
}

impl TextIndex {
    /// Index `records`.
    #[must_use]
    pub fn build(records: &[SearchRecord]) -> Self {
        let mut index: BTreeMap<String, BTreeMap<String, BTreeMap<String, u32>>> =
            BTreeMap::new();
        let mut document_store = BTreeMap::new();

        for record in records {
            for (field, _) in INDEXED_FIELDS {
                let Some(value) = record.field(field) else {
                    continue;
                };
                for term in tokenize(value) {
                    *index
                        .entry(term)
                        .or_default()
                        .entry(field.to_owned())
                        .or_default()
                        .entry(record.id.clone())
                        .or_default() += 1;
                }
            }

            let stored: BTreeMap<String, String> = STORED_FIELDS
                .iter()
                .filter_map(|&field| Some((field.to_owned(), record.field(field)?.to_owned())))
                .collect();
            document_store.insert(record.id.clone(), stored);
        }

        tracing::debug!(
            documents = document_store.len(),
            terms = index.len(),
            "Built search index"
        );
        Self {
            fields: INDEXED_FIELDS
                .iter()
                .map(|(field, _)| (*field).to_owned())
                .collect(),
            document_count: document_store.len(),
            index,
            document_store,
        }
    }

    #[must_use]
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Stored value of a record field.
    #[must_use]
    pub fn stored(&self, id: &str, field: &str) -> Option<&str> {
        self.document_store.get(id)?.get(field).map(String::as_str)
    }

    /// Rank records matching any query term by boosted term frequency.
    ///
    /// Ties are broken by record id.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let mut scores: BTreeMap<&str, f64> = BTreeMap::new();
        for term in tokenize(query) {
            let Some(fields) = self.index.get(&term) else {
                continue;
            };
            for (field, boost) in INDEXED_FIELDS {
                let Some(postings) = fields.get(field) else {
                    continue;
                };
                for (id, frequency) in postings {
                    *scores.entry(id.as_str()).or_default() += f64::from(*frequency) * boost;
                }
            }
        }

        let mut hits: Vec<SearchHit<'_>> = scores
            .into_iter()
            .map(|(id, score)| SearchHit { id, score })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(b.id)));
        hits
    }
}
