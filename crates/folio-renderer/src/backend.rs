//! Render backend trait for markup-specific rendering.
//!
//! The generic [`MarkdownRenderer`](crate::MarkdownRenderer) walks the
//! markdown event stream and hands every block-level construct to a backend,
//! one hook per block type.

/// Admonition (callout) kinds recognised in `> [!KIND]` blockquotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmonitionKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AdmonitionKind {
    /// Parse the marker keyword (case-insensitive), e.g. `NOTE`.
    #[must_use]
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.to_ascii_uppercase().as_str() {
            "NOTE" => Some(Self::Note),
            "TIP" => Some(Self::Tip),
            "IMPORTANT" => Some(Self::Important),
            "WARNING" => Some(Self::Warning),
            "CAUTION" => Some(Self::Caution),
            _ => None,
        }
    }

    /// Visual variant of the callout.
    #[must_use]
    pub fn variant(self) -> &'static str {
        match self {
            Self::Note => "info",
            Self::Tip => "success",
            Self::Important => "neutral",
            Self::Warning => "warning",
            Self::Caution => "danger",
        }
    }

    /// Fixed label shown above the callout body.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }
}

/// Backend trait for markup-specific rendering operations.
pub trait RenderBackend {
    /// Render a paragraph start tag. Paragraphs inside list items are
    /// already styled by the item wrapper.
    fn paragraph_start(in_list_item: bool, out: &mut String);

    /// Render a paragraph end tag.
    fn paragraph_end(out: &mut String) {
        out.push_str("</p>");
    }

    /// Render an anchored heading.
    ///
    /// * `level` - Heading level, already clamped to 1..=6
    /// * `id` - Unique anchor id
    /// * `html` - Inline HTML of the heading text
    fn heading(level: u8, id: &str, html: &str, out: &mut String);

    /// Render a plain quote block start tag.
    fn blockquote_start(out: &mut String);

    /// Render a plain quote block end tag.
    fn blockquote_end(out: &mut String);

    /// Render a complete admonition around its already rendered body.
    fn admonition(kind: AdmonitionKind, title: Option<&str>, body_html: &str, out: &mut String);

    /// Render a code block.
    ///
    /// * `language` - Canonical language id, `None` when unsupported
    /// * `code_html` - Escaped (and possibly highlighted) code
    fn code_block(language: Option<&str>, code_html: &str, out: &mut String);

    /// Render a live example: the preview markup next to its highlighted source.
    fn example(preview: &str, source_html: &str, out: &mut String);

    /// Render a table start tag (with any wrapper).
    fn table_start(out: &mut String);

    /// Render a table end tag (closing any wrapper).
    fn table_end(out: &mut String);

    /// Render a list item start tag.
    fn list_item_start(out: &mut String);

    /// Render a list item end tag.
    fn list_item_end(out: &mut String);

    /// Render inline code.
    fn inline_code(code: &str, out: &mut String);

    /// Render an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
