//! Code block processor trait for extensible code block handling.
//!
//! Processors are registered with the renderer and checked in order when a
//! fenced code block is encountered. The first processor returning a
//! non-`PassThrough` result wins. Blocks nobody claims are rendered as
//! highlighted code.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use folio_renderer::{CodeBlockProcessor, ProcessResult, RenderError};
//!
//! struct ShoutProcessor;
//!
//! impl CodeBlockProcessor for ShoutProcessor {
//!     fn process(
//!         &mut self,
//!         language: &str,
//!         _attrs: &HashMap<String, String>,
//!         source: &str,
//!         _index: usize,
//!     ) -> Result<ProcessResult, RenderError> {
//!         if language == "shout" {
//!             Ok(ProcessResult::Inline(format!("<strong>{}</strong>", source.to_uppercase())))
//!         } else {
//!             Ok(ProcessResult::PassThrough)
//!         }
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::RenderError;
use crate::highlight::Highlighter;

/// Fence language that turns a code block into a live example.
pub const EXAMPLE_LANGUAGE: &str = "example-html";

static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<script\b").unwrap());

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the code block with inline HTML.
    Inline(String),

    /// Render the code block as a live example widget.
    Example {
        /// Markup injected verbatim as the preview.
        preview: String,
        /// Highlighted HTML of the example source.
        source_html: String,
    },

    /// Pass through as regular code block with syntax highlighting.
    PassThrough,
}

/// Trait for processing special code blocks.
pub trait CodeBlockProcessor {
    /// Process a code block and return the result.
    ///
    /// # Arguments
    ///
    /// * `language` - Language identifier from fence info string
    /// * `attrs` - Attributes parsed from fence (key=value pairs)
    /// * `source` - Raw content of the code block
    /// * `index` - Zero-based index of the block in the rendered markdown
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the block content must not be rendered.
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
        index: usize,
    ) -> Result<ProcessResult, RenderError>;

    /// Get warnings generated during processing.
    ///
    /// Default implementation returns empty slice.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Turns `example-html` blocks into a live preview plus highlighted source.
///
/// Blocks containing a `<script>` tag are rejected.
pub struct ExampleHtmlProcessor {
    highlighter: Arc<Highlighter>,
}

impl ExampleHtmlProcessor {
    #[must_use]
    pub fn new(highlighter: Arc<Highlighter>) -> Self {
        Self { highlighter }
    }
}

impl CodeBlockProcessor for ExampleHtmlProcessor {
    fn process(
        &mut self,
        language: &str,
        _attrs: &HashMap<String, String>,
        source: &str,
        index: usize,
    ) -> Result<ProcessResult, RenderError> {
        if !language.eq_ignore_ascii_case(EXAMPLE_LANGUAGE) {
            return Ok(ProcessResult::PassThrough);
        }
        if SCRIPT_TAG.is_match(source) {
            return Err(RenderError::ScriptInExample { index });
        }

        let snippet = source.strip_suffix('\n').unwrap_or(source);
        Ok(ProcessResult::Example {
            preview: snippet.to_owned(),
            source_html: self.highlighter.highlight(snippet, "html"),
        })
    }
}

/// Parse fence info string into language and attributes.
///
/// Format: `language [key=value ...]`
#[must_use]
pub(crate) fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let mut attrs = HashMap::new();
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            let value = value.trim_matches('"').trim_matches('\'');
            attrs.insert(key.to_owned(), value.to_owned());
        }
    }

    (language, attrs)
}
