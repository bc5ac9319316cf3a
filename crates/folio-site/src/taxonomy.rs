//! Component taxonomy used to group the gallery.

use std::collections::BTreeMap;

/// A gallery group.
#[derive(Debug, PartialEq, Eq)]
pub struct ComponentGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Tag-name segments that place a component in this group.
    patterns: &'static [&'static str],
}

/// Groups in gallery order. The last one catches everything else.
pub static GROUPS: [ComponentGroup; 8] = [
    ComponentGroup {
        id: "actions",
        label: "Actions",
        description: "Buttons and controls that trigger an action.",
        patterns: &["button", "fab", "toggle", "action", "actions"],
    },
    ComponentGroup {
        id: "forms",
        label: "Forms",
        description: "Inputs and controls that collect values.",
        patterns: &[
            "input", "textarea", "select", "checkbox", "radio", "switch", "slider", "range",
            "field", "form", "combobox", "autocomplete", "datepicker", "date", "upload", "file",
            "label", "option", "rating",
        ],
    },
    ComponentGroup {
        id: "navigation",
        label: "Navigation",
        description: "Components that move people between views.",
        patterns: &[
            "nav", "navbar", "tab", "tabs", "breadcrumb", "breadcrumbs", "pagination", "menu",
            "sidebar", "stepper", "steps", "link", "toc",
        ],
    },
    ComponentGroup {
        id: "feedback",
        label: "Feedback",
        description: "Status, progress and system messages.",
        patterns: &[
            "alert", "toast", "spinner", "progress", "skeleton", "banner", "callout",
            "notification", "status", "loader", "meter",
        ],
    },
    ComponentGroup {
        id: "overlays",
        label: "Overlays",
        description: "Content layered above the page.",
        patterns: &[
            "dialog", "modal", "drawer", "popover", "tooltip", "dropdown", "sheet", "overlay",
            "popup",
        ],
    },
    ComponentGroup {
        id: "layout",
        label: "Layout",
        description: "Structure and spacing primitives.",
        patterns: &[
            "stack", "grid", "container", "divider", "card", "box", "layout", "cluster", "split",
            "panel", "spacer", "header", "footer", "section", "columns",
        ],
    },
    ComponentGroup {
        id: "data-display",
        label: "Data display",
        description: "Components that present content and data.",
        patterns: &[
            "table", "list", "avatar", "badge", "tag", "chip", "image", "icon", "code", "kbd",
            "stat", "timeline", "tree", "accordion", "details", "text", "heading", "chart",
        ],
    },
    ComponentGroup {
        id: "other",
        label: "Other",
        description: "Components without a more specific group.",
        patterns: &[],
    },
];

/// Id of the catch-all group.
pub const OTHER_GROUP: &str = "other";

/// Resolves tags to gallery groups.
///
/// Explicit lookups come first, then tag-name patterns, then [`OTHER_GROUP`].
#[derive(Clone, Debug, Default)]
pub struct Taxonomy {
    overrides: BTreeMap<String, &'static ComponentGroup>,
}

impl Taxonomy {
    /// Create a taxonomy from explicit `tag -> group id` lookups.
    ///
    /// Lookups naming an unknown group are ignored with a warning.
    #[must_use]
    pub fn new(lookups: &BTreeMap<String, String>) -> Self {
        let mut overrides = BTreeMap::new();
        for (tag, group_id) in lookups {
            match group_by_id(group_id) {
                Some(group) => {
                    overrides.insert(tag.clone(), group);
                }
                None => {
                    tracing::warn!(tag = %tag, group = %group_id, "Unknown taxonomy group, ignoring");
                }
            }
        }
        Self { overrides }
    }

    /// Group of a component.
    #[must_use]
    pub fn group_for(&self, tag_name: &str) -> &'static ComponentGroup {
        if let Some(group) = self.overrides.get(tag_name) {
            return group;
        }
        pattern_group(tag_name).unwrap_or(&GROUPS[GROUPS.len() - 1])
    }
}

/// Look up a group by id.
#[must_use]
pub fn group_by_id(id: &str) -> Option<&'static ComponentGroup> {
    GROUPS.iter().find(|group| group.id == id)
}

/// Match the segments after the tag prefix (`x-icon-button` -> `icon`, `button`)
/// against each group in order; the last segment is tried first since it
/// usually names what the element is.
fn pattern_group(tag_name: &str) -> Option<&'static ComponentGroup> {
    let segments: Vec<&str> = tag_name.split('-').skip(1).collect();
    segments
        .iter()
        .rev()
        .find_map(|segment| GROUPS.iter().find(|group| group.patterns.contains(segment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_resolution() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.group_for("x-button").id, "actions");
        assert_eq!(taxonomy.group_for("x-icon-button").id, "actions");
        assert_eq!(taxonomy.group_for("x-text-field").id, "forms");
        assert_eq!(taxonomy.group_for("x-tab-panel").id, "layout");
        assert_eq!(taxonomy.group_for("x-tabs").id, "navigation");
        assert_eq!(taxonomy.group_for("x-dialog").id, "overlays");
        assert_eq!(taxonomy.group_for("x-avatar").id, "data-display");
        assert_eq!(taxonomy.group_for("x-progress-bar").id, "feedback");
    }

    #[test]
    fn test_unmatched_falls_back_to_other() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.group_for("x-widget").id, OTHER_GROUP);
        assert_eq!(taxonomy.group_for("plain").id, OTHER_GROUP);
    }

    #[test]
    fn test_explicit_lookup_wins() {
        let lookups = BTreeMap::from([
            ("x-spinner-button".to_string(), "feedback".to_string()),
            ("x-chip".to_string(), "no-such-group".to_string()),
        ]);
        let taxonomy = Taxonomy::new(&lookups);
        assert_eq!(taxonomy.group_for("x-spinner-button").id, "feedback");
        assert_eq!(taxonomy.group_for("x-chip").id, "data-display");
    }

    #[test]
    fn test_groups_are_ordered_with_other_last() {
        let ids: Vec<_> = GROUPS.iter().map(|group| group.id).collect();
        assert_eq!(
            ids,
            vec![
                "actions",
                "forms",
                "navigation",
                "feedback",
                "overlays",
                "layout",
                "data-display",
                "other"
            ]
        );
    }
}
