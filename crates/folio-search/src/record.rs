//! Search records: one per page section.

use folio_renderer::plain_text;
use folio_site::{PageDocument, PageKind};
use serde::Serialize;

/// A searchable page section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    /// `<kind>/<pageId>#<sectionId>`, unique across the site.
    pub id: String,
    pub kind: PageKind,
    pub page_id: String,
    pub section_id: String,
    pub page_title: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub url: String,
}

impl SearchRecord {
    /// Value of a field by its serialized name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        let value: &str = match name {
            "id" => &self.id,
            "kind" => self.kind.as_str(),
            "pageId" => &self.page_id,
            "sectionId" => &self.section_id,
            "pageTitle" => &self.page_title,
            "title" => &self.title,
            "summary" => &self.summary,
            "body" => &self.body,
            "url" => &self.url,
            _ => return None,
        };
        Some(value)
    }
}

/// Build records for the sections of `pages`, which all belong to `kind`.
///
/// Internal pages are skipped.
#[must_use]
pub fn build_records(pages: &[PageDocument], kind: PageKind) -> Vec<SearchRecord> {
    let mut records = Vec::new();
    for page in pages {
        if !page.is_public() {
            tracing::debug!(page = %page.meta.id, "Skipping internal page in search index");
            continue;
        }
        let page_title = plain_text(&page.meta.title);
        let summary = plain_text(&page.meta.summary);
        for section in &page.sections {
            records.push(SearchRecord {
                id: format!("{}/{}#{}", kind.as_str(), page.meta.id, section.id),
                kind,
                page_id: page.meta.id.clone(),
                section_id: section.id.clone(),
                page_title: page_title.clone(),
                title: plain_text(&section.title),
                summary: summary.clone(),
                body: plain_text(&section.body),
                url: format!("/{}/{}#{}", kind.as_str(), page.meta.id, section.id),
            });
        }
    }
    records
}
