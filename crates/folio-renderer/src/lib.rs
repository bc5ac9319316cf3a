//! Markdown rendering for Folio documentation pages.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces HTML
//! fragments through the [`RenderBackend`] trait, plus the text utilities the
//! rest of the pipeline shares with it:
//!
//! - [`SlugAllocator`]: stable, unique heading anchors
//! - [`Highlighter`]: class-based syntax highlighting for fenced code
//! - [`plain_text`]: HTML fragment to searchable text
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use folio_renderer::{Highlighter, HtmlBackend, MarkdownRenderer};
//!
//! let mut renderer = MarkdownRenderer::<HtmlBackend>::new(Arc::new(Highlighter::new()));
//! let result = renderer.render_markdown("## Usage\n\n> [!TIP]\n> Keep it short.").unwrap();
//! assert_eq!(result.headings[0].id, "usage");
//! assert!(result.html.contains(r#"data-variant="success""#));
//! ```

mod backend;
mod code_block;
mod error;
mod headings;
mod highlight;
mod html;
mod language;
mod renderer;
mod slug;
mod state;
mod text;
mod util;

pub use backend::{AdmonitionKind, RenderBackend};
pub use code_block::{CodeBlockProcessor, EXAMPLE_LANGUAGE, ExampleHtmlProcessor, ProcessResult};
pub use error::RenderError;
pub use headings::{Heading, extract_headings};
pub use highlight::{FontFlags, Highlighter, TokenCategory, token_class};
pub use html::HtmlBackend;
pub use language::normalize_language;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use slug::{FALLBACK_SLUG, SlugAllocator, slugify, strip_inline_markdown};
pub use state::TocEntry;
pub use text::{collapse_whitespace, decode_entities, escape_html, plain_text, strip_html};
