//! Heading extraction for tables of contents.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::util::heading_level_to_num;

/// Heading found in a markdown fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Plain heading text, inline markup removed.
    pub title: String,
}

/// Collect every heading of a markdown fragment in document order.
///
/// Headings inside code fences are not headings and are skipped.
#[must_use]
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;

    let mut headings = Vec::new();
    let mut current: Option<(u8, String)> = None;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((heading_level_to_num(level), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    headings.push(Heading {
                        level,
                        title: text.trim().to_owned(),
                    });
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buffer)) = current.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buffer)) = current.as_mut() {
                    buffer.push(' ');
                }
            }
            _ => {}
        }
    }

    headings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading(level: u8, title: &str) -> Heading {
        Heading {
            level,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_extract_headings() {
        let markdown = "## Install `npm`\n\ntext\n\n### **Bold** step\n\n#### Deep";
        assert_eq!(
            extract_headings(markdown),
            vec![
                heading(2, "Install npm"),
                heading(3, "Bold step"),
                heading(4, "Deep"),
            ]
        );
    }

    #[test]
    fn test_headings_in_code_fences_are_ignored() {
        let markdown = "```md\n## Not a heading\n```\n\n## Real";
        assert_eq!(extract_headings(markdown), vec![heading(2, "Real")]);
    }

    #[test]
    fn test_setext_headings() {
        let markdown = "Title\n=====\n\nSub\n---";
        assert_eq!(
            extract_headings(markdown),
            vec![heading(1, "Title"), heading(2, "Sub")]
        );
    }

    #[test]
    fn test_no_headings() {
        assert!(extract_headings("just text").is_empty());
    }
}
