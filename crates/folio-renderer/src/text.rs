//! Plain-text helpers shared by the renderer and the search index.

use std::sync::LazyLock;

use regex::Regex;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Remove every HTML tag, keeping the text between tags.
///
/// Tags are replaced by a space so that `<p>a</p><p>b</p>` does not glue
/// words together; run [`collapse_whitespace`] afterwards.
#[must_use]
pub fn strip_html(html: &str) -> String {
    TAG_PATTERN.replace_all(html, " ").into_owned()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the entities produced by [`escape_html`] (plus `&#39;` and `&nbsp;`).
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Convert an HTML fragment to searchable plain text.
///
/// # Examples
///
/// ```
/// use folio_renderer::plain_text;
///
/// assert_eq!(plain_text("<p>Hello <b>big</b>\n world &amp; co</p>"), "Hello big world & co");
/// ```
#[must_use]
pub fn plain_text(html: &str) -> String {
    collapse_whitespace(&decode_entities(&strip_html(html)))
}
