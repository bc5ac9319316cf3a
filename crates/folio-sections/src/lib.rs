//! Section splitting for Folio documents.
//!
//! A document is cut into sections on its `## ` headings. The leading `# `
//! heading is the document title and never becomes a section; the paragraph
//! right below it is the document lead. Anything between the lead and the
//! first H2 is collected into an intro section. A lead with no H2 after it
//! stays in the intro section, so a page never loses its only content.
//!
//! # Example
//!
//! ```
//! use folio_sections::{DEFAULT_INTRO_TITLE, split_document};
//!
//! let doc = split_document("# Intro\nHello\n\n## Usage\nDo X", DEFAULT_INTRO_TITLE);
//! assert_eq!(doc.title.as_deref(), Some("Intro"));
//! assert_eq!(doc.lead.as_deref(), Some("Hello"));
//! assert_eq!(doc.sections.len(), 1);
//! assert_eq!(doc.sections[0].title, "Usage");
//! ```

/// Title of the section holding content that precedes the first H2.
pub const DEFAULT_INTRO_TITLE: &str = "Overview";

/// A section of a source document, before rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSection {
    /// Heading text of the H2, or the intro title.
    pub title: String,
    /// Markdown body up to the next H2, blank edge lines removed.
    pub body: String,
}

/// A document split into its parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitDocument {
    /// Text of the leading H1, if the document starts with one.
    pub title: Option<String>,
    /// Paragraph directly below the leading H1.
    pub lead: Option<String>,
    /// Sections in document order.
    pub sections: Vec<SourceSection>,
}

/// What happens to the lead paragraph besides being reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeadMode {
    /// Leave the lead out of the sections when an H2 follows it.
    #[default]
    Detach,
    /// Keep the lead at the top of the intro section.
    Keep,
}

/// Split markdown into sections, discarding the title and lead.
#[must_use]
pub fn split_sections(markdown: &str, intro_title: &str) -> Vec<SourceSection> {
    split_document(markdown, intro_title).sections
}

/// Split markdown into its title, lead and sections, detaching the lead.
///
/// `## ` lines inside fenced code blocks do not start sections. The intro
/// section is omitted when it has no content.
#[must_use]
pub fn split_document(markdown: &str, intro_title: &str) -> SplitDocument {
    split_document_with(markdown, intro_title, LeadMode::Detach)
}

/// Split markdown into its title, lead and sections.
#[must_use]
pub fn split_document_with(markdown: &str, intro_title: &str, mode: LeadMode) -> SplitDocument {
    let lines: Vec<&str> = markdown.lines().collect();
    let first = skip_blank(&lines, 0);
    let title = lines.get(first).and_then(|line| atx_heading(line, 1));
    let mut pos = if title.is_some() { first + 1 } else { 0 };

    let mut lead = None;
    if title.is_some() {
        let start = skip_blank(&lines, pos);
        if start < lines.len() && is_paragraph_start(lines[start]) {
            let end = lines[start..]
                .iter()
                .position(|line| line.trim().is_empty() || atx_heading(line, 2).is_some())
                .map_or(lines.len(), |offset| start + offset);
            lead = Some(lines[start..end].join("\n").trim().to_owned());
            if mode == LeadMode::Detach && has_section_heading(&lines[end..]) {
                pos = end;
            }
        }
    }

    let mut sections = Vec::new();
    let mut current: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();
    let mut fence = FenceTracker::default();

    for line in &lines[pos..] {
        if !fence.update(line)
            && let Some(heading) = atx_heading(line, 2)
        {
            flush_section(&mut sections, current.take(), &body, intro_title);
            current = Some(heading);
            body.clear();
            continue;
        }
        body.push(line);
    }
    flush_section(&mut sections, current, &body, intro_title);

    SplitDocument {
        title,
        lead,
        sections,
    }
}

/// Close the section being collected. A section without a heading is the
/// intro and is dropped when blank.
fn flush_section(
    sections: &mut Vec<SourceSection>,
    title: Option<String>,
    body: &[&str],
    intro_title: &str,
) {
    let body = trim_blank_lines(body);
    match title {
        Some(title) => sections.push(SourceSection { title, body }),
        None if !body.is_empty() => sections.push(SourceSection {
            title: intro_title.to_owned(),
            body,
        }),
        None => {}
    }
}

/// Text of an ATX heading of exactly `level`, closing `#`s removed.
fn atx_heading(line: &str, level: usize) -> Option<String> {
    let rest = line.strip_prefix(&"#".repeat(level))?;
    if !(rest.is_empty() || rest.starts_with([' ', '\t'])) {
        return None;
    }
    let text = rest.trim();
    let text = match text.trim_end_matches('#') {
        stripped if stripped.is_empty() || stripped.ends_with([' ', '\t']) => stripped.trim_end(),
        _ => text,
    };
    Some(text.to_owned())
}

/// Whether any line outside fenced code is an H2.
fn has_section_heading(lines: &[&str]) -> bool {
    let mut fence = FenceTracker::default();
    lines
        .iter()
        .any(|line| !fence.update(line) && atx_heading(line, 2).is_some())
}

fn skip_blank(lines: &[&str], from: usize) -> usize {
    lines[from..]
        .iter()
        .position(|line| !line.trim().is_empty())
        .map_or(lines.len(), |offset| from + offset)
}

/// Whether a line opens a plain paragraph rather than another block.
fn is_paragraph_start(line: &str) -> bool {
    if line.starts_with("    ") || line.starts_with('\t') {
        return false;
    }
    let trimmed = line.trim_start();
    let block_markers = ["#", "```", "~~~", ">", "- ", "* ", "+ ", "|", "<", "---", "***"];
    if block_markers.iter().any(|marker| trimmed.starts_with(marker)) {
        return false;
    }
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    !(digits > 0 && trimmed[digits..].starts_with([')', '.']))
}

/// Join lines, dropping leading and trailing blank ones.
fn trim_blank_lines(lines: &[&str]) -> String {
    let Some(start) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |last| last + 1);
    lines[start..end].join("\n")
}

/// Tracks whether the current line is inside a fenced code block.
#[derive(Default)]
struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    /// Feed one line; returns `true` if the line belongs to a fence
    /// (including its opening and closing lines).
    fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~');
        let run = marker.map_or(0, |c| trimmed.chars().take_while(|x| *x == c).count());

        match (self.open, marker) {
            (Some((open_char, open_len)), Some(c))
                if c == open_char && run >= open_len && trimmed[run..].trim().is_empty() =>
            {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, Some(c)) if run >= 3 => {
                self.open = Some((c, run));
                true
            }
            (None, _) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(title: &str, body: &str) -> SourceSection {
        SourceSection {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_title_lead_and_sections() {
        let doc = split_document("# Intro\nHello\n\n## Usage\nDo X", DEFAULT_INTRO_TITLE);
        assert_eq!(
            doc,
            SplitDocument {
                title: Some("Intro".to_string()),
                lead: Some("Hello".to_string()),
                sections: vec![section("Usage", "Do X")],
            }
        );
    }

    #[test]
    fn test_empty_intro_is_omitted() {
        let sections = split_sections("# T\n\n## A\nx\n\n## B\ny", DEFAULT_INTRO_TITLE);
        assert_eq!(sections, vec![section("A", "x"), section("B", "y")]);
    }

    #[test]
    fn test_intro_after_lead() {
        let markdown = "# Title\n\nLead line one\nline two\n\nMore intro.\n\n## Next\nbody";
        let doc = split_document(markdown, DEFAULT_INTRO_TITLE);
        assert_eq!(doc.lead.as_deref(), Some("Lead line one\nline two"));
        assert_eq!(
            doc.sections,
            vec![section("Overview", "More intro."), section("Next", "body")]
        );
    }

    #[test]
    fn test_lead_without_h2_stays_in_intro() {
        let doc = split_document("# Title\n\nThe only paragraph of this page.", DEFAULT_INTRO_TITLE);
        assert_eq!(doc.lead.as_deref(), Some("The only paragraph of this page."));
        assert_eq!(
            doc.sections,
            vec![section("Overview", "The only paragraph of this page.")]
        );
    }

    #[test]
    fn test_h2_in_fence_does_not_detach_lead() {
        let doc = split_document("# T\nLead\n\n```md\n## code\n```", DEFAULT_INTRO_TITLE);
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].body.starts_with("Lead\n\n```md"));
    }

    #[test]
    fn test_keep_mode_leaves_lead_in_intro() {
        let markdown = "# Title\n\nLead.\n\nMore.\n\n## Next\nbody";
        let doc = split_document_with(markdown, DEFAULT_INTRO_TITLE, LeadMode::Keep);
        assert_eq!(doc.lead.as_deref(), Some("Lead."));
        assert_eq!(
            doc.sections,
            vec![section("Overview", "Lead.\n\nMore."), section("Next", "body")]
        );
    }

    #[test]
    fn test_no_h1_means_no_lead() {
        let doc = split_document("Intro text\n\n## A\nx", DEFAULT_INTRO_TITLE);
        assert_eq!(doc.title, None);
        assert_eq!(doc.lead, None);
        assert_eq!(
            doc.sections,
            vec![section("Overview", "Intro text"), section("A", "x")]
        );
    }

    #[test]
    fn test_no_h2_yields_single_intro_section() {
        let sections = split_sections("Just some text.\n\nAnd more.", "Intro");
        assert_eq!(sections, vec![section("Intro", "Just some text.\n\nAnd more.")]);
    }

    #[test]
    fn test_empty_document() {
        assert!(split_sections("", DEFAULT_INTRO_TITLE).is_empty());
        assert!(split_sections("  \n\n", DEFAULT_INTRO_TITLE).is_empty());
        assert!(split_sections("# Only a title", DEFAULT_INTRO_TITLE).is_empty());
    }

    #[test]
    fn test_h2_inside_fence_is_body() {
        let markdown = "## Code\n```md\n## Not a section\n```\n\n## Real\ntext";
        let sections = split_sections(markdown, DEFAULT_INTRO_TITLE);
        assert_eq!(
            sections,
            vec![
                section("Code", "```md\n## Not a section\n```"),
                section("Real", "text"),
            ]
        );
    }

    #[test]
    fn test_tilde_fence_and_longer_closers() {
        let markdown = "## A\n~~~~\n## inside\n~~~\nstill inside\n~~~~~\n## B";
        let sections = split_sections(markdown, DEFAULT_INTRO_TITLE);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1], section("B", ""));
    }

    #[test]
    fn test_nested_headings_stay_in_body() {
        let sections = split_sections("## A\n### Sub\ntext\n#### Deeper", DEFAULT_INTRO_TITLE);
        assert_eq!(sections, vec![section("A", "### Sub\ntext\n#### Deeper")]);
    }

    #[test]
    fn test_closing_hashes_removed() {
        let sections = split_sections("## Title ##\nx", DEFAULT_INTRO_TITLE);
        assert_eq!(sections[0].title, "Title");
        let sections = split_sections("## C#\nx", DEFAULT_INTRO_TITLE);
        assert_eq!(sections[0].title, "C#");
    }

    #[test]
    fn test_lead_not_taken_from_other_blocks() {
        let doc = split_document("# T\n\n- item\n\n## A\nx", DEFAULT_INTRO_TITLE);
        assert_eq!(doc.lead, None);
        assert_eq!(doc.sections[0], section("Overview", "- item"));
    }

    #[test]
    fn test_lead_stops_at_h2() {
        let doc = split_document("# T\nLead\n## A\nx", DEFAULT_INTRO_TITLE);
        assert_eq!(doc.lead.as_deref(), Some("Lead"));
        assert_eq!(doc.sections, vec![section("A", "x")]);
    }

    #[test]
    fn test_hash_without_space_is_not_heading() {
        let sections = split_sections("##NotHeading\n\n## A\nx", DEFAULT_INTRO_TITLE);
        assert_eq!(sections[0], section("Overview", "##NotHeading"));
    }

    #[test]
    fn test_indented_code_preserved() {
        let sections = split_sections("## A\n\n    code line\n\n", DEFAULT_INTRO_TITLE);
        assert_eq!(sections[0].body, "    code line");
    }
}
