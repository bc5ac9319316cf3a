//! Page assembly.
//!
//! Turns manifest entries and catalog components into [`PageDocument`]s.
//! Every page gets its own [`MarkdownRenderer`], which owns the slug
//! allocator for anchors inside section bodies. The table of contents is
//! numbered by a second allocator over the same heading sequence, so the two
//! can differ for pages that repeat a section title inside a body.

use std::path::Path;
use std::sync::Arc;

use folio_renderer::{
    Highlighter, HtmlBackend, MarkdownRenderer, SlugAllocator, TocEntry, collapse_whitespace,
    escape_html, extract_headings, strip_inline_markdown,
};
use folio_sections::{DEFAULT_INTRO_TITLE, LeadMode, SplitDocument, split_document_with};

use crate::components::{
    CatalogEntry, ComponentCatalog, component_url, render_card, render_gallery, usage_markdown,
};
use crate::error::SiteError;
use crate::loader::SourceLoader;
use crate::manifest::{PageEntry, PageKind, PageType, Visibility};
use crate::page::{PageDocument, PageMeta, Section};
use crate::previews::PreviewRegistry;
use crate::taxonomy::Taxonomy;

/// Id of the generated components index page.
pub const COMPONENTS_INDEX_ID: &str = "index";

const GALLERY_TITLE: &str = "Gallery";

enum SectionSource {
    Markdown(String),
    Html(String),
}

/// A section before rendering.
struct PendingSection {
    title: String,
    source: SectionSource,
}

impl PendingSection {
    fn markdown(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: SectionSource::Markdown(body.into()),
        }
    }

    fn html(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: SectionSource::Html(body.into()),
        }
    }
}

/// Assembles page documents.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use folio_renderer::Highlighter;
/// use folio_site::{FsSourceLoader, PageAssembler};
///
/// let assembler = PageAssembler::new(
///     Arc::new(FsSourceLoader::new("docs")),
///     Arc::new(Highlighter::new()),
/// );
/// let page = assembler.assemble(&entry)?;
/// ```
pub struct PageAssembler {
    loader: Arc<dyn SourceLoader>,
    highlighter: Arc<Highlighter>,
    catalog: ComponentCatalog,
    previews: PreviewRegistry,
    taxonomy: Taxonomy,
}

impl PageAssembler {
    /// Create an assembler with an empty component catalog.
    #[must_use]
    pub fn new(loader: Arc<dyn SourceLoader>, highlighter: Arc<Highlighter>) -> Self {
        Self {
            loader,
            highlighter,
            catalog: ComponentCatalog::default(),
            previews: PreviewRegistry::default(),
            taxonomy: Taxonomy::default(),
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: ComponentCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_previews(mut self, previews: PreviewRegistry) -> Self {
        self.previews = previews;
        self
    }

    #[must_use]
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    /// Assemble a manifest entry.
    pub fn assemble(&self, entry: &PageEntry) -> Result<PageDocument, SiteError> {
        match entry.resolved_type() {
            PageType::Markdown => self.assemble_markdown(entry),
            PageType::Components => self.assemble_components(entry, true),
            PageType::ComponentsIndex => self.assemble_components(entry, false),
            page_type @ PageType::Component => Err(SiteError::UnsupportedType {
                page: entry.id.clone(),
                page_type: page_type.as_str(),
            }),
        }
    }

    /// Assemble the detail page of one component.
    pub fn assemble_component_page(
        &self,
        entry: CatalogEntry<'_>,
    ) -> Result<PageDocument, SiteError> {
        let component = entry.component;
        let tag = &component.tag_name;
        let overview = if component.summary.is_empty() {
            format!("No summary available for `{tag}`.")
        } else {
            component.summary.clone()
        };
        let pending = vec![
            PendingSection::markdown("Overview", overview),
            PendingSection::markdown("Usage", usage_markdown(&self.previews.snippet(component))),
            PendingSection::html("API", render_card(component)),
        ];

        let meta = PageMeta {
            id: tag.clone(),
            title: tag.clone(),
            summary: component.summary.clone(),
            nav_label: tag.clone(),
            group: Some(self.taxonomy.group_for(tag).id.to_owned()),
            kind: PageKind::Components,
            package: Some(entry.package.to_owned()),
            page_type: PageType::Component,
            visibility: Visibility::Public,
            nav_hidden: false,
            toc: Vec::new(),
        };
        self.build(meta, pending)
    }

    /// Assemble the detail pages of every catalog component, ordered by tag.
    pub fn assemble_component_pages(&self) -> Result<Vec<PageDocument>, SiteError> {
        self.catalog
            .entries(None)
            .into_iter()
            .map(|entry| self.assemble_component_page(entry))
            .collect()
    }

    /// Assemble the generated components index page.
    pub fn assemble_components_index(&self) -> Result<PageDocument, SiteError> {
        let entries = self.catalog.entries(None);
        let gallery = render_gallery(&entries, &self.previews, &self.taxonomy);
        let meta = PageMeta {
            id: COMPONENTS_INDEX_ID.to_owned(),
            title: "Components".to_owned(),
            summary: "Every component, grouped by purpose.".to_owned(),
            nav_label: "Overview".to_owned(),
            group: None,
            kind: PageKind::Components,
            package: None,
            page_type: PageType::ComponentsIndex,
            visibility: Visibility::Public,
            nav_hidden: false,
            toc: Vec::new(),
        };
        self.build(meta, vec![PendingSection::html(GALLERY_TITLE, gallery)])
    }

    fn assemble_markdown(&self, entry: &PageEntry) -> Result<PageDocument, SiteError> {
        let source = entry
            .source
            .as_deref()
            .ok_or_else(|| SiteError::MissingSource {
                page: entry.id.clone(),
            })?;
        let document = split_entry(entry, &self.load(&entry.id, source)?);
        let meta = entry_meta(entry, &document);
        let pending = document
            .sections
            .into_iter()
            .map(|section| PendingSection::markdown(section.title, section.body))
            .collect();
        self.build(meta, pending)
    }

    /// Components page: readme sections, gallery and, with `with_cards`, one
    /// card section per component.
    fn assemble_components(
        &self,
        entry: &PageEntry,
        with_cards: bool,
    ) -> Result<PageDocument, SiteError> {
        if let Some(package) = &entry.package
            && !self.catalog.has_package(package)
        {
            return Err(SiteError::UnknownPackage {
                page: entry.id.clone(),
                package: package.clone(),
            });
        }

        let document = match (&entry.readme, with_cards) {
            (Some(readme), true) => split_entry(entry, &self.load(&entry.id, readme)?),
            _ => SplitDocument::default(),
        };
        let meta = entry_meta(entry, &document);

        let entries = self.catalog.entries(entry.package.as_deref());
        let mut pending: Vec<PendingSection> = document
            .sections
            .into_iter()
            .map(|section| PendingSection::markdown(section.title, section.body))
            .collect();
        pending.push(PendingSection::html(
            GALLERY_TITLE,
            render_gallery(&entries, &self.previews, &self.taxonomy),
        ));
        if with_cards {
            for catalog_entry in &entries {
                let tag = &catalog_entry.component.tag_name;
                let body = format!(
                    "{}\n<p class=\"docs-text\"><a href=\"{}\">View the {} page</a></p>",
                    render_card(catalog_entry.component),
                    escape_html(&component_url(tag)),
                    escape_html(tag)
                );
                pending.push(PendingSection::html(tag.clone(), body));
            }
        }
        self.build(meta, pending)
    }

    fn load(&self, page: &str, source: &str) -> Result<String, SiteError> {
        let path = Path::new(source);
        self.loader.read(path).map_err(|error| SiteError::Source {
            page: page.to_owned(),
            path: self.loader.display_path(path),
            source: error,
        })
    }

    /// Render pending sections and build the table of contents.
    fn build(
        &self,
        mut meta: PageMeta,
        pending: Vec<PendingSection>,
    ) -> Result<PageDocument, SiteError> {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new(Arc::clone(&self.highlighter));
        let mut toc_slugs = SlugAllocator::new();
        let mut toc = Vec::new();
        let mut sections = Vec::with_capacity(pending.len());

        for section in pending {
            let id = toc_slugs.allocate(&section.title);
            let title = strip_inline_markdown(&section.title);
            toc.push(TocEntry {
                id: id.clone(),
                title: title.clone(),
                level: 2,
            });

            let body = match section.source {
                SectionSource::Markdown(markdown) => {
                    for heading in extract_headings(&markdown) {
                        if heading.level < 2 {
                            continue;
                        }
                        toc.push(TocEntry {
                            id: toc_slugs.allocate(&heading.title),
                            title: heading.title,
                            level: heading.level,
                        });
                    }
                    let result = renderer
                        .render_markdown(&markdown)
                        .map_err(|source| SiteError::Render {
                            page: meta.id.clone(),
                            source,
                        })?;
                    for warning in &result.warnings {
                        tracing::warn!(page = %meta.id, warning = %warning, "Render warning");
                    }
                    result.html
                }
                SectionSource::Html(html) => html,
            };
            sections.push(Section { id, title, body });
        }

        meta.toc = toc;
        tracing::debug!(page = %meta.id, sections = sections.len(), "Assembled page");
        Ok(PageDocument { meta, sections })
    }
}

/// Metadata of a manifest entry, with title and summary fallbacks from the
/// source document.
fn entry_meta(entry: &PageEntry, document: &SplitDocument) -> PageMeta {
    let title = non_blank(entry.title.as_deref())
        .map(str::to_owned)
        .or_else(|| document.title.as_deref().map(strip_inline_markdown))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| entry.id.clone());
    let summary = non_blank(entry.summary.as_deref())
        .map(str::to_owned)
        .or_else(|| {
            document
                .lead
                .as_deref()
                .map(|lead| collapse_whitespace(&strip_inline_markdown(lead)))
        })
        .unwrap_or_default();
    let nav_label = non_blank(entry.nav_label.as_deref()).map_or_else(|| title.clone(), str::to_owned);

    PageMeta {
        id: entry.id.clone(),
        title,
        summary,
        nav_label,
        group: entry.group.clone(),
        kind: entry.kind,
        package: entry.package.clone(),
        page_type: entry.resolved_type(),
        visibility: entry.visibility,
        nav_hidden: entry.nav_hidden,
        toc: Vec::new(),
    }
}

/// Split an entry's markdown. The lead is only detached when it stands in
/// for a missing summary.
fn split_entry(entry: &PageEntry, markdown: &str) -> SplitDocument {
    let mode = if non_blank(entry.summary.as_deref()).is_some() {
        LeadMode::Keep
    } else {
        LeadMode::Detach
    };
    split_document_with(markdown, DEFAULT_INTRO_TITLE, mode)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::CatalogPackage;
    use crate::mock::MockSourceLoader;
    use folio_api::ComponentApiEntity;
    use pretty_assertions::assert_eq;

    fn assembler(loader: MockSourceLoader) -> PageAssembler {
        PageAssembler::new(Arc::new(loader), Arc::new(Highlighter::new()))
    }

    fn entry(id: &str, source: &str) -> PageEntry {
        PageEntry {
            id: id.to_string(),
            source: Some(source.to_string()),
            ..PageEntry::default()
        }
    }

    fn toc(page: &PageDocument) -> Vec<(String, u8)> {
        page.meta
            .toc
            .iter()
            .map(|entry| (entry.id.clone(), entry.level))
            .collect()
    }

    fn component(tag: &str, summary: &str) -> ComponentApiEntity {
        ComponentApiEntity {
            tag_name: tag.to_string(),
            summary: summary.to_string(),
            ..ComponentApiEntity::default()
        }
    }

    fn catalog() -> ComponentCatalog {
        ComponentCatalog::new(vec![
            CatalogPackage {
                id: "core".to_string(),
                name: "@acme/core".to_string(),
                components: vec![component("x-button", "Triggers an action.")],
            },
            CatalogPackage {
                id: "forms".to_string(),
                name: "@acme/forms".to_string(),
                components: vec![component("x-input", "Collects text.")],
            },
        ])
    }

    #[test]
    fn test_intro_page() {
        let loader =
            MockSourceLoader::new().with_file("intro.md", "# Intro\n\nLead text.\n\n## Usage\n\nDo X");
        let page = assembler(loader).assemble(&entry("intro", "intro.md")).unwrap();

        assert_eq!(page.meta.title, "Intro");
        assert_eq!(page.meta.nav_label, "Intro");
        assert_eq!(page.meta.summary, "Lead text.");
        assert_eq!(page.meta.page_type, PageType::Markdown);
        assert_eq!(
            page.sections,
            vec![Section {
                id: "usage".to_string(),
                title: "Usage".to_string(),
                body: r#"<p class="docs-text">Do X</p>"#.to_string(),
            }]
        );
        assert_eq!(toc(&page), vec![("usage".to_string(), 2)]);
    }

    #[test]
    fn test_lead_only_page_has_overview_section() {
        let loader = MockSourceLoader::new().with_file("a.md", "# Title\n\nThe only paragraph of this page.");
        let page = assembler(loader).assemble(&entry("a", "a.md")).unwrap();

        assert_eq!(page.meta.summary, "The only paragraph of this page.");
        assert_eq!(
            page.sections,
            vec![Section {
                id: "overview".to_string(),
                title: "Overview".to_string(),
                body: r#"<p class="docs-text">The only paragraph of this page.</p>"#.to_string(),
            }]
        );
        assert_eq!(toc(&page), vec![("overview".to_string(), 2)]);
    }

    #[test]
    fn test_explicit_summary_keeps_lead_in_sections() {
        let loader = MockSourceLoader::new().with_file("a.md", "# Title\n\nLead text.\n\n## Usage\n\nDo X");
        let explicit = PageEntry {
            summary: Some("Given.".to_string()),
            ..entry("a", "a.md")
        };
        let page = assembler(loader).assemble(&explicit).unwrap();

        assert_eq!(page.meta.summary, "Given.");
        let titles: Vec<_> = page.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Overview", "Usage"]);
        assert_eq!(page.sections[0].body, r#"<p class="docs-text">Lead text.</p>"#);
    }

    #[test]
    fn test_title_and_summary_fallbacks() {
        let loader = MockSourceLoader::new()
            .with_file("a.md", "# From *Heading*\n\nLead.\n\n## One\n\nText")
            .with_file("b.md", "## One\n\nText");
        let assembler = assembler(loader);

        let explicit = PageEntry {
            title: Some("Explicit".to_string()),
            summary: Some("Given.".to_string()),
            nav_label: Some("Short".to_string()),
            ..entry("a", "a.md")
        };
        let page = assembler.assemble(&explicit).unwrap();
        assert_eq!(page.meta.title, "Explicit");
        assert_eq!(page.meta.summary, "Given.");
        assert_eq!(page.meta.nav_label, "Short");

        let page = assembler.assemble(&entry("a", "a.md")).unwrap();
        assert_eq!(page.meta.title, "From Heading");
        assert_eq!(page.meta.summary, "Lead.");

        let page = assembler.assemble(&entry("b", "b.md")).unwrap();
        assert_eq!(page.meta.title, "b");
        assert_eq!(page.meta.summary, "");
    }

    #[test]
    fn test_toc_includes_nested_headings_in_order() {
        let markdown = "Intro text\n\n## Setup\n\n### Install\n\n#### Linux\n\n## Setup\n\n### Install";
        let loader = MockSourceLoader::new().with_file("guide.md", markdown);
        let page = assembler(loader).assemble(&entry("guide", "guide.md")).unwrap();

        assert_eq!(
            toc(&page),
            vec![
                ("overview".to_string(), 2),
                ("setup".to_string(), 2),
                ("install".to_string(), 3),
                ("linux".to_string(), 4),
                ("setup-1".to_string(), 2),
                ("install-1".to_string(), 3),
            ]
        );
        let ids: Vec<_> = page.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "setup", "setup-1"]);
        assert!(page.sections[2].body.contains(r#"<h3 id="install-1""#));
    }

    #[test]
    fn test_body_and_toc_slugs_are_numbered_independently() {
        let loader = MockSourceLoader::new().with_file("notes.md", "## Notes\n\n### Notes");
        let page = assembler(loader).assemble(&entry("notes", "notes.md")).unwrap();

        assert_eq!(
            toc(&page),
            vec![("notes".to_string(), 2), ("notes-1".to_string(), 3)]
        );
        assert!(page.sections[0].body.contains(r#"<h3 id="notes""#));
    }

    #[test]
    fn test_missing_and_unreadable_sources() {
        let assembler = assembler(MockSourceLoader::new());
        let no_source = PageEntry {
            id: "orphan".to_string(),
            ..PageEntry::default()
        };
        assert!(matches!(
            assembler.assemble(&no_source),
            Err(SiteError::MissingSource { page }) if page == "orphan"
        ));
        assert!(matches!(
            assembler.assemble(&entry("gone", "gone.md")),
            Err(SiteError::Source { .. })
        ));
    }

    #[test]
    fn test_script_in_example_fails_page() {
        let markdown = "## Demo\n\n```example-html\n<script>alert(1)</script>\n```";
        let loader = MockSourceLoader::new().with_file("demo.md", markdown);
        let err = assembler(loader)
            .assemble(&entry("demo", "demo.md"))
            .unwrap_err();
        assert!(matches!(err, SiteError::Render { ref page, .. } if page == "demo"));
        assert!(err.to_string().contains("<script>"));
    }

    #[test]
    fn test_components_page_with_readme() {
        let loader = MockSourceLoader::new()
            .with_file("components.md", "# Library\n\nAll parts.\n\n## Install\n\nnpm i");
        let assembler = assembler(loader).with_catalog(catalog());
        let entry = PageEntry {
            id: "library".to_string(),
            page_type: Some(PageType::Components),
            readme: Some("components.md".to_string()),
            ..PageEntry::default()
        };
        let page = assembler.assemble(&entry).unwrap();

        assert_eq!(page.meta.title, "Library");
        assert_eq!(page.meta.summary, "All parts.");
        let ids: Vec<_> = page.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["install", "gallery", "x-button", "x-input"]);
        assert!(page.sections[2].body.contains("docs-component-card"));
        assert!(page.sections[2].body.contains(r#"href="/components/x-button""#));
    }

    #[test]
    fn test_components_page_package_filter() {
        let assembler = assembler(MockSourceLoader::new()).with_catalog(catalog());
        let filtered = PageEntry {
            id: "forms".to_string(),
            page_type: Some(PageType::Components),
            package: Some("forms".to_string()),
            ..PageEntry::default()
        };
        let page = assembler.assemble(&filtered).unwrap();
        let ids: Vec<_> = page.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["gallery", "x-input"]);
        assert_eq!(page.meta.title, "forms");

        let unknown = PageEntry {
            package: Some("missing".to_string()),
            ..filtered
        };
        assert!(matches!(
            assembler.assemble(&unknown),
            Err(SiteError::UnknownPackage { package, .. }) if package == "missing"
        ));
    }

    #[test]
    fn test_components_index_entry_is_gallery_only() {
        let assembler = assembler(MockSourceLoader::new()).with_catalog(catalog());
        let entry = PageEntry {
            id: "gallery".to_string(),
            page_type: Some(PageType::ComponentsIndex),
            readme: Some("ignored.md".to_string()),
            ..PageEntry::default()
        };
        let page = assembler.assemble(&entry).unwrap();
        assert_eq!(page.sections.len(), 1);
        assert_eq!(page.sections[0].title, "Gallery");
        assert!(page.sections[0].body.contains("data-group=\"actions\""));
        assert!(page.sections[0].body.contains("data-group=\"forms\""));
    }

    #[test]
    fn test_component_page() {
        let assembler = assembler(MockSourceLoader::new())
            .with_catalog(catalog())
            .with_previews(
                PreviewRegistry::default()
                    .with_template("x-button", "<x-button variant=\"primary\">Save</x-button>"),
            );
        let entry = assembler.catalog().get("x-button").unwrap();
        let page = assembler.assemble_component_page(entry).unwrap();

        assert_eq!(page.meta.id, "x-button");
        assert_eq!(page.meta.kind, PageKind::Components);
        assert_eq!(page.meta.page_type, PageType::Component);
        assert_eq!(page.meta.package.as_deref(), Some("core"));
        assert_eq!(page.meta.group.as_deref(), Some("actions"));
        assert_eq!(page.content_path(), "pages/components/x-button.json");

        let ids: Vec<_> = page.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "usage", "api"]);
        let usage = &page.sections[1].body;
        assert!(usage.contains(
            r#"<div class="docs-example-preview"><x-button variant="primary">Save</x-button></div>"#
        ));
        assert!(usage.contains("docs-example-source"));
    }

    #[test]
    fn test_component_pages_and_index() {
        let assembler = assembler(MockSourceLoader::new()).with_catalog(catalog());
        let pages = assembler.assemble_component_pages().unwrap();
        let ids: Vec<_> = pages.iter().map(|p| p.meta.id.as_str()).collect();
        assert_eq!(ids, vec!["x-button", "x-input"]);
        assert!(pages[1].sections[1].body.contains("<x-input>Collects text.</x-input>"));

        let index = assembler.assemble_components_index().unwrap();
        assert_eq!(index.meta.id, COMPONENTS_INDEX_ID);
        assert_eq!(index.meta.page_type, PageType::ComponentsIndex);
        assert_eq!(toc(&index), vec![("gallery".to_string(), 2)]);
    }

    #[test]
    fn test_component_type_is_not_a_manifest_type() {
        let assembler = assembler(MockSourceLoader::new());
        let entry = PageEntry {
            id: "x-button".to_string(),
            page_type: Some(PageType::Component),
            ..PageEntry::default()
        };
        assert!(matches!(
            assembler.assemble(&entry),
            Err(SiteError::UnsupportedType { page_type: "component", .. })
        ));
    }
}
