//! Heading slug generation.
//!
//! [`slugify`] turns a raw heading title into an anchor-safe base slug and
//! [`SlugAllocator`] makes bases unique within one allocator instance.
//!
//! A page uses two allocators that never share counters: the table of
//! contents pass owns one, and the page's [`MarkdownRenderer`] owns the
//! other for in-body heading anchors. Both walk the same headings, but the
//! renderer never sees section (H2) titles, so pages with repeated titles can
//! number their TOC ids and body anchors differently.
//!
//! [`MarkdownRenderer`]: crate::MarkdownRenderer

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::text::strip_html;

/// Slug used when a title contains no alphanumeric characters.
pub const FALLBACK_SLUG: &str = "section";

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());

/// Strip inline markdown (links, images, emphasis and code markers) and HTML
/// tags from a heading title, leaving its visible text.
///
/// # Examples
///
/// ```
/// use folio_renderer::strip_inline_markdown;
///
/// assert_eq!(strip_inline_markdown("Use [`x-button`](./button.md) **now**"), "Use x-button now");
/// ```
#[must_use]
pub fn strip_inline_markdown(raw: &str) -> String {
    let text = IMAGE_PATTERN.replace_all(raw, "$1");
    let text = LINK_PATTERN.replace_all(&text, "$1");
    let text: String = text
        .chars()
        .filter(|c| !matches!(c, '*' | '`' | '~'))
        .collect();
    strip_html(&text).trim().to_owned()
}

/// Convert a raw heading title to a base slug.
///
/// Lowercases, replaces every run of non-alphanumeric characters with a
/// single hyphen and trims hyphens from both ends. Letters and digits of any
/// script are kept. Empty results become
/// [`FALLBACK_SLUG`].
///
/// # Examples
///
/// ```
/// use folio_renderer::slugify;
///
/// assert_eq!(slugify("What's *New*?"), "what-s-new");
/// assert_eq!(slugify("!!!"), "section");
/// ```
#[must_use]
pub fn slugify(raw: &str) -> String {
    let text = strip_inline_markdown(raw).to_lowercase();
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        slug
    }
}

/// Allocates unique slugs, numbering repeated bases.
///
/// The first occurrence of a base slug is returned unchanged; the Nth
/// occurrence (N > 1) becomes `"<base>-<N-1>"`.
#[derive(Debug, Default, Clone)]
pub struct SlugAllocator {
    counts: HashMap<String, usize>,
}

impl SlugAllocator {
    /// Create an allocator with no slugs handed out yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the slug for a raw heading title.
    pub fn allocate(&mut self, raw_title: &str) -> String {
        let base = slugify(raw_title);
        let count = self.counts.entry(base.clone()).or_default();
        let slug = match *count {
            0 => base,
            n => format!("{base}-{n}"),
        };
        *count += 1;
        slug
    }
}
