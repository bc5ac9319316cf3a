//! Syntax highlighting into semantic CSS classes.
//!
//! Code is tokenized line by line with the bundled `syntect` grammars. Each
//! token's scope stack is reduced to one [`TokenCategory`] (first match in
//! precedence order wins), and the theme's font style adds `tok-italic`,
//! `tok-bold` and `tok-underline` classes. Output never carries colors; the
//! consuming stylesheet maps classes to colors.

use std::fmt::Write;

use syntect::highlighting::{FontStyle, Highlighter as ThemeHighlighter, Theme, ThemeSet};
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::language::{normalize_language, syntax_token};
use crate::text::escape_html;

/// Theme consulted for font styles only.
const STYLE_THEME: &str = "InspiredGitHub";

/// Semantic token categories, in resolution precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenCategory {
    Comment,
    Regex,
    String,
    Keyword,
    Number,
    Boolean,
    Function,
    Type,
    Tag,
    AttributeName,
    AttributeValue,
    Property,
    Operator,
    Punctuation,
    Namespace,
    Variable,
    Constant,
}

impl TokenCategory {
    /// All categories, highest precedence first.
    pub const PRECEDENCE: [Self; 17] = [
        Self::Comment,
        Self::Regex,
        Self::String,
        Self::Keyword,
        Self::Number,
        Self::Boolean,
        Self::Function,
        Self::Type,
        Self::Tag,
        Self::AttributeName,
        Self::AttributeValue,
        Self::Property,
        Self::Operator,
        Self::Punctuation,
        Self::Namespace,
        Self::Variable,
        Self::Constant,
    ];

    /// CSS class emitted for the category.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Comment => "tok-comment",
            Self::Regex => "tok-regex",
            Self::String => "tok-string",
            Self::Keyword => "tok-keyword",
            Self::Number => "tok-number",
            Self::Boolean => "tok-boolean",
            Self::Function => "tok-function",
            Self::Type => "tok-type",
            Self::Tag => "tok-tag",
            Self::AttributeName => "tok-attr-name",
            Self::AttributeValue => "tok-attr-value",
            Self::Property => "tok-property",
            Self::Operator => "tok-operator",
            Self::Punctuation => "tok-punctuation",
            Self::Namespace => "tok-namespace",
            Self::Variable => "tok-variable",
            Self::Constant => "tok-constant",
        }
    }

    /// Whether a single dotted scope name belongs to this category.
    #[must_use]
    pub fn matches_scope(self, scope: &str) -> bool {
        let has = |prefix: &str| scope.starts_with(prefix);
        match self {
            Self::Comment => has("comment"),
            Self::Regex => has("string.regexp"),
            Self::String => has("string"),
            Self::Keyword => {
                (has("keyword") && !has("keyword.operator")) || has("storage")
            }
            Self::Number => has("constant.numeric"),
            Self::Boolean => has("constant.language.boolean"),
            Self::Function => {
                has("entity.name.function") || has("support.function") || has("variable.function")
            }
            Self::Type => {
                has("entity.name.type")
                    || has("entity.name.class")
                    || has("support.type")
                    || has("support.class")
                    || has("entity.other.inherited-class")
            }
            Self::Tag => has("entity.name.tag"),
            Self::AttributeName => has("entity.other.attribute-name"),
            Self::AttributeValue => scope.contains("attribute-value"),
            Self::Property => {
                has("variable.other.property")
                    || has("variable.other.member")
                    || has("meta.property-name")
                    || has("support.type.property-name")
            }
            Self::Operator => has("keyword.operator"),
            Self::Punctuation => has("punctuation"),
            Self::Namespace => has("entity.name.namespace") || has("entity.name.module"),
            Self::Variable => has("variable"),
            Self::Constant => has("constant") || has("support.constant"),
        }
    }

    /// Resolve the category of a token from its scope names.
    ///
    /// Categories are tried in [`PRECEDENCE`](Self::PRECEDENCE) order; the
    /// first one matching any scope on the stack wins.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(scopes: &[S]) -> Option<Self> {
        Self::PRECEDENCE.into_iter().find(|category| {
            scopes
                .iter()
                .any(|scope| category.matches_scope(scope.as_ref()))
        })
    }
}

/// Font-style bit flags (1 = italic, 2 = bold, 4 = underline).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FontFlags(u8);

impl FontFlags {
    pub const ITALIC: u8 = 1;
    pub const BOLD: u8 = 2;
    pub const UNDERLINE: u8 = 4;

    /// Build flags from raw bits.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & (Self::ITALIC | Self::BOLD | Self::UNDERLINE))
    }

    /// Class names for the set flags, in italic/bold/underline order.
    #[must_use]
    pub fn class_names(self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.0 & Self::ITALIC != 0 {
            classes.push("tok-italic");
        }
        if self.0 & Self::BOLD != 0 {
            classes.push("tok-bold");
        }
        if self.0 & Self::UNDERLINE != 0 {
            classes.push("tok-underline");
        }
        classes
    }
}

impl From<FontStyle> for FontFlags {
    fn from(style: FontStyle) -> Self {
        let mut bits = 0;
        if style.contains(FontStyle::ITALIC) {
            bits |= Self::ITALIC;
        }
        if style.contains(FontStyle::BOLD) {
            bits |= Self::BOLD;
        }
        if style.contains(FontStyle::UNDERLINE) {
            bits |= Self::UNDERLINE;
        }
        Self(bits)
    }
}

/// Build the class string for a token (empty when nothing applies).
#[must_use]
pub fn token_class(category: Option<TokenCategory>, flags: FontFlags) -> String {
    let mut classes: Vec<&str> = category.map(TokenCategory::class_name).into_iter().collect();
    classes.extend(flags.class_names());
    classes.join(" ")
}

/// Tokenizer failure; never escapes [`Highlighter::highlight`].
#[derive(Debug, thiserror::Error)]
enum HighlightError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("scope error: {0}")]
    Scope(String),
}

/// Syntax highlighter over the bundled grammar set.
///
/// Loading grammars is the expensive part; build one highlighter per run and
/// share it (the renderer takes an `Arc<Highlighter>`).
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Load the bundled grammars and the font-style theme.
    #[must_use]
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes.remove(STYLE_THEME).unwrap_or_default();
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Highlight `code` as HTML.
    ///
    /// Empty or unsupported languages, and tokenizer failures, fall back to
    /// the escaped code without any spans.
    #[must_use]
    pub fn highlight(&self, code: &str, language: &str) -> String {
        let Some(syntax) = self.find_syntax(language) else {
            return escape_html(code);
        };
        match self.try_highlight(code, syntax) {
            Ok(html) => html,
            Err(err) => {
                tracing::debug!(language, error = %err, "Highlighting failed, using plain code");
                escape_html(code)
            }
        }
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        let canonical = normalize_language(language)?;
        self.syntaxes.find_syntax_by_token(syntax_token(canonical)?)
    }

    fn try_highlight(&self, code: &str, syntax: &SyntaxReference) -> Result<String, HighlightError> {
        let styles = ThemeHighlighter::new(&self.theme);
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut html = String::with_capacity(code.len() * 2);

        for line in LinesWithEndings::from(code) {
            let ops = state
                .parse_line(line, &self.syntaxes)
                .map_err(|e| HighlightError::Parse(format!("{e:?}")))?;

            let mut spans = LineSpans::default();
            let mut pos = 0;
            for (offset, op) in ops {
                let offset = offset.min(line.len());
                if offset > pos {
                    spans.push(&line[pos..offset], &classify(&styles, stack.as_slice()));
                    pos = offset;
                }
                stack
                    .apply(&op)
                    .map_err(|e| HighlightError::Scope(format!("{e:?}")))?;
            }
            if pos < line.len() {
                spans.push(&line[pos..], &classify(&styles, stack.as_slice()));
            }
            spans.write_html(&mut html);
        }

        Ok(html)
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(styles: &ThemeHighlighter<'_>, scopes: &[Scope]) -> String {
    let names: Vec<String> = scopes.iter().map(|scope| scope.build_string()).collect();
    let category = TokenCategory::resolve(&names);
    let flags = FontFlags::from(styles.style_for_stack(scopes).font_style);
    token_class(category, flags)
}

/// Tokens of one line, with equal-class neighbours merged.
#[derive(Default)]
struct LineSpans {
    spans: Vec<(String, String)>,
}

impl LineSpans {
    fn push(&mut self, text: &str, class: &str) {
        match self.spans.last_mut() {
            Some((last_class, last_text)) if last_class == class => last_text.push_str(text),
            _ => self.spans.push((class.to_owned(), text.to_owned())),
        }
    }

    fn write_html(self, out: &mut String) {
        let mut newline = false;
        for (class, text) in self.spans {
            let text = match text.strip_suffix('\n') {
                Some(stripped) => {
                    newline = true;
                    stripped.to_owned()
                }
                None => text,
            };
            if text.is_empty() {
                continue;
            }
            if class.is_empty() {
                out.push_str(&escape_html(&text));
            } else {
                write!(out, r#"<span class="{class}">{}</span>"#, escape_html(&text)).unwrap();
            }
        }
        if newline {
            out.push('\n');
        }
    }
}
