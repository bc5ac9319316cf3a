//! Assembled page documents.

use folio_renderer::TocEntry;
use serde::Serialize;

use crate::manifest::{PageKind, PageType, Visibility};

/// A rendered section of a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    /// Rendered HTML.
    pub body: String,
}

/// Page metadata and table of contents, without section bodies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub nav_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub kind: PageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub visibility: Visibility,
    pub nav_hidden: bool,
    pub toc: Vec<TocEntry>,
}

/// A fully assembled page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageDocument {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub sections: Vec<Section>,
}

impl PageDocument {
    /// Whether the page may appear in search results.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.meta.visibility != Visibility::Internal
    }

    /// Output path of the page content, relative to the output directory.
    #[must_use]
    pub fn content_path(&self) -> String {
        format!("pages/{}/{}.json", self.meta.kind.as_str(), self.meta.id)
    }
}

/// Serialized form of a page content file.
#[derive(Serialize)]
pub struct PageContent<'a> {
    pub sections: &'a [Section],
}
