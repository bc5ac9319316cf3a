//! Page assembly for Folio.
//!
//! [`PageAssembler`] turns page manifest entries into [`PageDocument`]s:
//!
//! - `markdown` entries: a markdown source split into rendered sections
//! - `components` entries: optional readme sections, a gallery and one API
//!   card per component
//! - `components-index` entries: the gallery alone
//!
//! It also synthesizes a detail page for every component of the
//! [`ComponentCatalog`] and the components index page.

mod assembler;
mod components;
mod error;
mod loader;
mod manifest;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod page;
mod previews;
mod taxonomy;

pub use assembler::{COMPONENTS_INDEX_ID, PageAssembler};
pub use components::{
    CatalogEntry, CatalogPackage, ComponentCatalog, component_url, render_card, render_gallery,
    usage_markdown,
};
pub use error::SiteError;
pub use folio_renderer::TocEntry;
pub use loader::{FsSourceLoader, SourceLoader};
pub use manifest::{PageEntry, PageKind, PageManifest, PageType, Visibility};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSourceLoader;
pub use page::{PageContent, PageDocument, PageMeta, Section};
pub use previews::PreviewRegistry;
pub use taxonomy::{ComponentGroup, GROUPS, OTHER_GROUP, Taxonomy, group_by_id};
