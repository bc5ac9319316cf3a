//! Renderer error types.

/// Error returned when markdown cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An `example-html` block contains a `<script>` tag.
    ///
    /// Live examples are injected verbatim into documentation pages, so
    /// scripts are refused instead of escaped.
    #[error("example-html block #{index} contains a <script> tag")]
    ScriptInExample {
        /// Zero-based index of the code block in the rendered markdown.
        index: usize,
    },
}
