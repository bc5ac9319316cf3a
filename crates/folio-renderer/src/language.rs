//! Fence language normalisation.

/// Canonical language ids understood by the highlighter, paired with the
/// syntax token used to look up the bundled grammar.
const CANONICAL: &[(&str, &str)] = &[
    ("bash", "bash"),
    ("css", "css"),
    ("diff", "diff"),
    ("html", "html"),
    ("javascript", "js"),
    ("json", "json"),
    ("markdown", "md"),
    ("python", "py"),
    ("rust", "rs"),
    ("sql", "sql"),
    ("xml", "xml"),
    ("yaml", "yaml"),
];

/// Aliases accepted in fence info strings.
///
/// The bundled grammars have no TypeScript or JSX syntax, so those fences
/// are highlighted as JavaScript.
const ALIASES: &[(&str, &str)] = &[
    ("cjs", "javascript"),
    ("cts", "javascript"),
    ("htm", "html"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("md", "markdown"),
    ("mjs", "javascript"),
    ("mts", "javascript"),
    ("py", "python"),
    ("rs", "rust"),
    ("sh", "bash"),
    ("shell", "bash"),
    ("svg", "xml"),
    ("ts", "javascript"),
    ("tsx", "javascript"),
    ("typescript", "javascript"),
    ("xhtml", "html"),
    ("yml", "yaml"),
    ("zsh", "bash"),
];

/// Resolve a fence info string to a canonical language id.
///
/// Only the first whitespace-delimited token is considered. Returns `None`
/// for empty info strings and for languages without highlighting support.
///
/// # Examples
///
/// ```
/// use folio_renderer::normalize_language;
///
/// assert_eq!(normalize_language("js title=demo"), Some("javascript"));
/// assert_eq!(normalize_language("Shell"), Some("bash"));
/// assert_eq!(normalize_language("cobol"), None);
/// ```
#[must_use]
pub fn normalize_language(info: &str) -> Option<&'static str> {
    let token = info.split_whitespace().next()?.to_ascii_lowercase();
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map_or(token.as_str(), |(_, canonical)| canonical);
    CANONICAL
        .iter()
        .find(|(id, _)| *id == canonical)
        .map(|(id, _)| *id)
}

/// Grammar lookup token for a canonical language id.
pub(crate) fn syntax_token(language: &str) -> Option<&'static str> {
    CANONICAL
        .iter()
        .find(|(id, _)| *id == language)
        .map(|(_, token)| *token)
}
