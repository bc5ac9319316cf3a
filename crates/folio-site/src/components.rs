//! Component catalog and the HTML blocks of component pages.

use std::collections::BTreeMap;
use std::fmt::Write;

use folio_api::{ApiField, ComponentApiEntity};
use folio_renderer::{EXAMPLE_LANGUAGE, escape_html};

use crate::previews::PreviewRegistry;
use crate::taxonomy::{GROUPS, Taxonomy};

/// Merged components of one configured package.
#[derive(Clone, Debug, Default)]
pub struct CatalogPackage {
    pub id: String,
    pub name: String,
    pub components: Vec<ComponentApiEntity>,
}

/// A component together with the package that declares it.
#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry<'a> {
    pub package: &'a str,
    pub component: &'a ComponentApiEntity,
}

/// All packages and their components.
///
/// Tags are unique across the catalog: when two packages declare the same
/// tag the first package keeps it.
#[derive(Clone, Debug, Default)]
pub struct ComponentCatalog {
    packages: Vec<CatalogPackage>,
    by_tag: BTreeMap<String, (usize, usize)>,
}

impl ComponentCatalog {
    #[must_use]
    pub fn new(packages: Vec<CatalogPackage>) -> Self {
        let mut by_tag = BTreeMap::new();
        for (package_index, package) in packages.iter().enumerate() {
            for (component_index, component) in package.components.iter().enumerate() {
                if let Some(&(first, _)) = by_tag.get(&component.tag_name) {
                    let first: &CatalogPackage = &packages[first];
                    tracing::warn!(
                        tag = %component.tag_name,
                        package = %package.id,
                        kept = %first.id,
                        "Component declared by several packages, keeping the first"
                    );
                    continue;
                }
                by_tag.insert(
                    component.tag_name.clone(),
                    (package_index, component_index),
                );
            }
        }
        Self { packages, by_tag }
    }

    #[must_use]
    pub fn packages(&self) -> &[CatalogPackage] {
        &self.packages
    }

    #[must_use]
    pub fn has_package(&self, id: &str) -> bool {
        self.packages.iter().any(|package| package.id == id)
    }

    /// Components sorted by tag, optionally restricted to one package.
    #[must_use]
    pub fn entries(&self, package: Option<&str>) -> Vec<CatalogEntry<'_>> {
        self.by_tag
            .values()
            .map(|&(package_index, component_index)| {
                let owner = &self.packages[package_index];
                CatalogEntry {
                    package: &owner.id,
                    component: &owner.components[component_index],
                }
            })
            .filter(|entry| package.is_none_or(|id| entry.package == id))
            .collect()
    }

    /// Look up a component by tag.
    #[must_use]
    pub fn get(&self, tag_name: &str) -> Option<CatalogEntry<'_>> {
        let &(package_index, component_index) = self.by_tag.get(tag_name)?;
        let owner = &self.packages[package_index];
        Some(CatalogEntry {
            package: &owner.id,
            component: &owner.components[component_index],
        })
    }
}

/// URL of a component detail page.
#[must_use]
pub fn component_url(tag_name: &str) -> String {
    format!("/components/{tag_name}")
}

/// Gallery of preview cards grouped by taxonomy. Empty groups are omitted.
#[must_use]
pub fn render_gallery(
    entries: &[CatalogEntry<'_>],
    previews: &PreviewRegistry,
    taxonomy: &Taxonomy,
) -> String {
    if entries.is_empty() {
        return "<p class=\"docs-text\">No components.</p>".to_owned();
    }

    let mut html = String::from("<div class=\"docs-gallery\">\n");
    for group in &GROUPS {
        let members: Vec<&CatalogEntry<'_>> = entries
            .iter()
            .filter(|entry| taxonomy.group_for(&entry.component.tag_name).id == group.id)
            .collect();
        if members.is_empty() {
            continue;
        }

        write!(
            html,
            "<section class=\"docs-gallery-group\" data-group=\"{}\">\
             <p class=\"docs-gallery-group-title\">{}</p>\
             <p class=\"docs-gallery-group-description\">{}</p>\
             <div class=\"docs-gallery-grid\">\n",
            group.id,
            escape_html(group.label),
            escape_html(group.description)
        )
        .unwrap();
        for entry in members {
            let component = entry.component;
            write!(
                html,
                "<a class=\"docs-gallery-card\" href=\"{}\">\
                 <div class=\"docs-gallery-preview\">{}</div>\
                 <p class=\"docs-gallery-name\"><code>{}</code></p>",
                escape_html(&component_url(&component.tag_name)),
                previews.snippet(component),
                escape_html(&component.tag_name)
            )
            .unwrap();
            if !component.summary.is_empty() {
                write!(
                    html,
                    "<p class=\"docs-gallery-summary\">{}</p>",
                    escape_html(&component.summary)
                )
                .unwrap();
            }
            html.push_str("</a>\n");
        }
        html.push_str("</div></section>\n");
    }
    html.push_str("</div>");
    html
}

/// Descriptive API card of a component.
#[must_use]
pub fn render_card(component: &ComponentApiEntity) -> String {
    let mut html = String::from("<div class=\"docs-component-card\">\n");
    if !component.summary.is_empty() {
        writeln!(
            html,
            "<p class=\"docs-text\">{}</p>",
            escape_html(&component.summary)
        )
        .unwrap();
    }

    let fields: [(&str, &[ApiField]); 5] = [
        ("Attributes", component.attributes.as_slice()),
        ("Properties", component.properties.as_slice()),
        ("Slots", component.slots.as_slice()),
        ("Parts", component.css_parts.as_slice()),
        ("Events", component.events.as_slice()),
    ];
    for (label, items) in fields {
        push_field_group(&mut html, label, items);
    }
    push_text_group(&mut html, "Accessibility", &component.a11y);
    push_field_group(&mut html, "Tokens", &component.css_custom_properties);
    push_text_group(&mut html, "Notes", &component.notes);

    html.push_str("</div>");
    html
}

fn push_group_start(html: &mut String, label: &str) {
    write!(
        html,
        "<div class=\"docs-api-group\"><p class=\"docs-api-group-title\">{}</p>",
        escape_html(label)
    )
    .unwrap();
}

fn push_field_group(html: &mut String, label: &str, items: &[ApiField]) {
    push_group_start(html, label);
    if items.is_empty() {
        html.push_str("<p class=\"docs-api-empty\">None.</p></div>\n");
        return;
    }

    html.push_str("<dl class=\"docs-api-list\">");
    for field in items {
        let name = if field.name.is_empty() {
            "(default)"
        } else {
            field.name.as_str()
        };
        write!(html, "<dt><code>{}</code>", escape_html(name)).unwrap();
        if !field.type_name.is_empty() {
            write!(
                html,
                " <span class=\"docs-api-type\">{}</span>",
                escape_html(&field.type_name)
            )
            .unwrap();
        }
        html.push_str("</dt>");

        if field.description.is_empty() && field.default.is_empty() {
            continue;
        }
        html.push_str("<dd>");
        html.push_str(&escape_html(&field.description));
        if !field.default.is_empty() {
            write!(
                html,
                " <span class=\"docs-api-default\">Default: <code>{}</code></span>",
                escape_html(&field.default)
            )
            .unwrap();
        }
        html.push_str("</dd>");
    }
    html.push_str("</dl></div>\n");
}

fn push_text_group(html: &mut String, label: &str, items: &[String]) {
    push_group_start(html, label);
    if items.is_empty() {
        html.push_str("<p class=\"docs-api-empty\">None.</p></div>\n");
        return;
    }

    html.push_str("<ul class=\"docs-api-notes\">");
    for item in items {
        write!(html, "<li>{}</li>", escape_html(item)).unwrap();
    }
    html.push_str("</ul></div>\n");
}

/// Markdown for the usage section: an example fence long enough to hold the snippet.
#[must_use]
pub fn usage_markdown(snippet: &str) -> String {
    let longest_run = snippet
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);
    format!("{fence}{EXAMPLE_LANGUAGE}\n{snippet}\n{fence}\n")
}
