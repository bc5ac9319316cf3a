//! Preview markup for component examples.

use std::collections::BTreeMap;

use folio_api::ComponentApiEntity;
use folio_renderer::escape_html;

/// Per-tag preview templates.
#[derive(Clone, Debug, Default)]
pub struct PreviewRegistry {
    templates: BTreeMap<String, String>,
}

impl PreviewRegistry {
    /// Create a registry from `tag -> markup` templates.
    #[must_use]
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    /// Add a template.
    #[must_use]
    pub fn with_template(mut self, tag: impl Into<String>, markup: impl Into<String>) -> Self {
        self.templates.insert(tag.into(), markup.into());
        self
    }

    /// Preview markup for a component, falling back to `<tag>summary</tag>`.
    #[must_use]
    pub fn snippet(&self, component: &ComponentApiEntity) -> String {
        if let Some(template) = self.templates.get(&component.tag_name) {
            return template.trim_end_matches('\n').to_owned();
        }
        tracing::debug!(tag = %component.tag_name, "No preview template, using fallback");
        format!(
            "<{tag}>{text}</{tag}>",
            tag = component.tag_name,
            text = escape_html(&component.summary)
        )
    }
}
