//! Page manifest: the ordered list of pages to build.

use serde::{Deserialize, Serialize};

/// Root of the page manifest JSON.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageManifest {
    pub pages: Vec<PageEntry>,
}

/// One manifest entry.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Markdown source, relative to the docs source directory.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, rename = "type")]
    pub page_type: Option<PageType>,
    /// Markdown shown above the gallery of a components page.
    #[serde(default)]
    pub readme: Option<String>,
    #[serde(default)]
    pub nav_label: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub kind: PageKind,
    /// Restricts a components page to one package.
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub nav_hidden: bool,
}

impl PageEntry {
    /// Entry type; entries without one are markdown pages.
    #[must_use]
    pub fn resolved_type(&self) -> PageType {
        self.page_type.unwrap_or_default()
    }
}

/// Site area a page belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Docs,
    Lab,
    Components,
}

impl PageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::Lab => "lab",
            Self::Components => "components",
        }
    }
}

/// How a page's content is produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    #[default]
    Markdown,
    Components,
    ComponentsIndex,
    Component,
}

impl PageType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Components => "components",
            Self::ComponentsIndex => "components-index",
            Self::Component => "component",
        }
    }
}

/// Whether a page may be surfaced publicly (search, navigation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
}
