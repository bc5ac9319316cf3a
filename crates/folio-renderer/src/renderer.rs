//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;
use std::sync::{Arc, LazyLock};

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::backend::{AdmonitionKind, RenderBackend};
use crate::code_block::{CodeBlockProcessor, ExampleHtmlProcessor, ProcessResult, parse_fence_info};
use crate::error::RenderError;
use crate::highlight::Highlighter;
use crate::language::normalize_language;
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, TocEntry};
use crate::text::escape_html;
use crate::util::heading_level_to_num;

static ADMONITION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[!(NOTE|TIP|IMPORTANT|WARNING|CAUTION)\][ \t]*(.*)$").unwrap()
});

/// Result of rendering a markdown fragment.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Headings rendered in this fragment, with their anchor ids.
    pub headings: Vec<TocEntry>,
    /// Warnings reported by code block processors.
    pub warnings: Vec<String>,
}

/// Admonition parsed from the source of a blockquote.
struct Admonition {
    kind: AdmonitionKind,
    title: Option<String>,
    body: String,
}

/// Generic markdown renderer with pluggable backend.
///
/// One renderer is meant to serve a single page: heading ids are allocated
/// from a per-renderer slug allocator, so rendering several fragments of the
/// same page through one renderer keeps every anchor unique.
///
/// # Code Block Processors
///
/// `example-html` blocks are always handled by [`ExampleHtmlProcessor`].
/// More processors can be added via [`with_processor`](Self::with_processor);
/// they are checked in order and the first non-`PassThrough` result wins.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    item_depth: usize,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    pending_image: Option<(String, String)>,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    highlighter: Arc<Highlighter>,
    code_block_index: usize,
    gfm: bool,
    /// Nesting depth of an admonition blockquote whose events are skipped.
    skip_depth: usize,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new(highlighter: Arc<Highlighter>) -> Self {
        let examples = ExampleHtmlProcessor::new(Arc::clone(&highlighter));
        Self::bare(highlighter).with_processor(examples)
    }

    fn bare(highlighter: Arc<Highlighter>) -> Self {
        Self {
            output: String::with_capacity(4096),
            item_depth: 0,
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            pending_image: None,
            processors: Vec::new(),
            highlighter,
            code_block_index: 0,
            gfm: true,
            skip_depth: 0,
            _backend: PhantomData,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Add a code block processor after the built-in ones.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render a markdown fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ScriptInExample`] if an `example-html` block
    /// contains a `<script>` tag.
    pub fn render_markdown(&mut self, markdown: &str) -> Result<RenderResult, RenderError> {
        let html = self.render_fragment(markdown)?;
        Ok(RenderResult {
            html,
            headings: self.heading.take_rendered(),
            warnings: self.processor_warnings().collect(),
        })
    }

    /// Get all warnings from all processors.
    pub fn processor_warnings(&self) -> impl Iterator<Item = String> + '_ {
        self.processors.iter().flat_map(|p| p.warnings()).cloned()
    }

    fn render_fragment(&mut self, markdown: &str) -> Result<String, RenderError> {
        self.output.clear();
        self.skip_depth = 0;

        // Blockquotes rendered so far that enclose the current event.
        let mut quote_depth = 0;
        let parser = Parser::new_ext(markdown, self.parser_options()).into_offset_iter();
        for (event, range) in parser {
            if self.skip_depth > 0 {
                match event {
                    Event::Start(Tag::BlockQuote(_)) => self.skip_depth += 1,
                    Event::End(TagEnd::BlockQuote(_)) => self.skip_depth -= 1,
                    _ => {}
                }
                continue;
            }
            match &event {
                Event::Start(Tag::BlockQuote(_)) => {
                    if let Some(admonition) = parse_admonition(&markdown[range], quote_depth) {
                        self.render_admonition(&admonition)?;
                        self.skip_depth = 1;
                        continue;
                    }
                    quote_depth += 1;
                }
                Event::End(TagEnd::BlockQuote(_)) => quote_depth -= 1,
                _ => {}
            }
            self.process_event(event)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    /// Render the admonition body with a child renderer that borrows this
    /// renderer's processors and slug allocator.
    fn render_admonition(&mut self, admonition: &Admonition) -> Result<(), RenderError> {
        let mut child = Self {
            processors: std::mem::take(&mut self.processors),
            heading: std::mem::take(&mut self.heading),
            code_block_index: self.code_block_index,
            gfm: self.gfm,
            ..Self::bare(Arc::clone(&self.highlighter))
        };
        let body = child.render_fragment(&admonition.body);

        self.processors = child.processors;
        self.heading = child.heading;
        self.code_block_index = child.code_block_index;

        B::admonition(
            admonition.kind,
            admonition.title.as_deref(),
            &body?,
            &mut self.output,
        );
        Ok(())
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag)?,
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => B::hard_break(&mut self.output),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => B::paragraph_start(self.item_depth > 0, &mut self.output),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the id is known.
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(_) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code.start(info);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => {
                self.item_depth += 1;
                B::list_item_start(&mut self.output);
            }
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                B::table_start(&mut self.output);
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link { dest_url, .. } => {
                let link_tag = format!(r#"<a href="{}">"#, escape_html(&dest_url));
                self.push_inline(&link_tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the image ends.
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) -> Result<(), RenderError> {
        match tag {
            TagEnd::Paragraph => B::paragraph_end(&mut self.output),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    B::heading(level, &id, html.trim(), &mut self.output);
                }
            }
            TagEnd::BlockQuote(_) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => self.finish_code_block()?,
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => {
                self.item_depth = self.item_depth.saturating_sub(1);
                B::list_item_end(&mut self.output);
            }
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    let mut img = String::new();
                    B::image(&src, &alt, &title, &mut img);
                    self.push_inline(&img);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => B::table_end(&mut self.output),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
        }
        Ok(())
    }

    fn finish_code_block(&mut self) -> Result<(), RenderError> {
        let (info, content) = self.code.end();
        let (language, attrs) = parse_fence_info(&info);
        let index = self.code_block_index;
        self.code_block_index += 1;

        if !language.is_empty() {
            for processor in &mut self.processors {
                match processor.process(&language, &attrs, &content, index)? {
                    ProcessResult::Inline(html) => {
                        self.output.push_str(&html);
                        return Ok(());
                    }
                    ProcessResult::Example {
                        preview,
                        source_html,
                    } => {
                        B::example(&preview, &source_html, &mut self.output);
                        return Ok(());
                    }
                    ProcessResult::PassThrough => {}
                }
            }
        }

        let canonical = normalize_language(&language);
        let code_html = match canonical {
            Some(lang) => self.highlighter.highlight(&content, lang),
            None => escape_html(&content),
        };
        B::code_block(canonical, &code_html, &mut self.output);
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
        } else if self.heading.is_active() {
            self.heading.push_text(code);
            B::inline_code(code, self.heading.html_buffer());
        } else {
            B::inline_code(code, &mut self.output);
        }
    }

    fn raw_html(&mut self, html: &str) {
        // Inline HTML in a heading is kept in the markup but not in its text.
        self.push_inline(html);
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_str("\n");
        } else if self.heading.is_active() {
            self.heading.push_text(" ");
            self.heading.push_html(" ");
        } else {
            self.output.push('\n');
        }
    }
}

/// Recognise `> [!KIND] optional title` in the raw source of a blockquote
/// nested in `depth` enclosing blockquotes.
///
/// The source starts at the blockquote's own marker, but its later lines
/// still carry the markers of the enclosing quotes. The body is those lines
/// with `depth + 1` levels of `>` removed.
fn parse_admonition(source: &str, depth: usize) -> Option<Admonition> {
    let mut lines = source.lines();
    let first = strip_quote_marker(lines.next()?);
    let captures = ADMONITION_MARKER.captures(first.trim_end())?;
    let kind = AdmonitionKind::from_marker(&captures[1])?;
    let title = captures
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_owned);
    let body = lines
        .map(|line| strip_quote_markers(line, depth + 1))
        .collect::<Vec<_>>()
        .join("\n");

    Some(Admonition { kind, title, body })
}

fn strip_quote_markers(mut line: &str, levels: usize) -> &str {
    for _ in 0..levels {
        line = strip_quote_marker(line);
    }
    line
}

fn strip_quote_marker(line: &str) -> &str {
    match line.trim_start().strip_prefix('>') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::HtmlBackend;
    use pretty_assertions::assert_eq;

    fn renderer() -> MarkdownRenderer<HtmlBackend> {
        MarkdownRenderer::new(Arc::new(Highlighter::new()))
    }

    fn render(markdown: &str) -> RenderResult {
        renderer().render_markdown(markdown).unwrap()
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(render("Hello, world!").html, r#"<p class="docs-text">Hello, world!</p>"#);
    }

    #[test]
    fn test_heading_with_anchor() {
        let result = render("## Section Title");
        assert_eq!(
            result.html,
            r##"<h2 id="section-title" class="docs-heading">Section Title<a class="docs-permalink" href="#section-title" aria-label="Link to this section"></a></h2>"##
        );
        assert_eq!(
            result.headings,
            vec![TocEntry {
                id: "section-title".to_string(),
                title: "Section Title".to_string(),
                level: 2,
            }]
        );
    }

    #[test]
    fn test_heading_ids_unique_across_fragments() {
        let mut renderer = renderer();
        let first = renderer.render_markdown("## Usage").unwrap();
        let second = renderer.render_markdown("## Usage\n\n## Usage").unwrap();

        assert_eq!(first.headings[0].id, "usage");
        let ids: Vec<_> = second.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["usage-1", "usage-2"]);
    }

    #[test]
    fn test_heading_inline_code_and_html() {
        let result = render("## Install `npm` <small>beta</small>");
        assert!(result.html.contains(r#"Install <code class="docs-code-inline">npm</code> <small>beta</small>"#));
        assert_eq!(result.headings[0].title, "Install npm beta");
        assert_eq!(result.headings[0].id, "install-npm-beta");
    }

    #[test]
    fn test_list_items_wrap_text() {
        assert_eq!(
            render("- one\n- two").html,
            r#"<ul><li><div class="docs-text">one</div></li><li><div class="docs-text">two</div></li></ul>"#
        );
    }

    #[test]
    fn test_loose_list_paragraphs_are_plain() {
        let html = render("1. one\n\n2. two").html;
        assert!(html.starts_with(r#"<ol><li><div class="docs-text"><p>one</p>"#));
        assert!(!html.contains("<p class"));
    }

    #[test]
    fn test_ordered_list_start() {
        assert!(render("3. three").html.starts_with(r#"<ol start="3">"#));
    }

    #[test]
    fn test_table_is_wrapped() {
        let html = render("| A | B |\n|:--|--:|\n| 1 | 2 |").html;
        assert_eq!(
            html,
            r#"<div class="docs-table-scroll"><table class="docs-table"><thead><tr><th style="text-align:left">A</th><th style="text-align:right">B</th></tr></thead><tbody><tr><td style="text-align:left">1</td><td style="text-align:right">2</td></tr></tbody></table></div>"#
        );
    }

    #[test]
    fn test_plain_blockquote() {
        assert_eq!(
            render("> quoted").html,
            r#"<blockquote class="docs-quote"><p class="docs-text">quoted</p></blockquote>"#
        );
    }

    #[test]
    fn test_admonition_with_title() {
        let html = render("> [!WARNING] Careful now\n> Body **text**").html;
        assert_eq!(
            html,
            r#"<aside class="docs-admonition docs-admonition-warning" data-variant="warning"><p class="docs-admonition-label">Warning</p><p class="docs-admonition-title">Careful now</p><div class="docs-admonition-body"><p class="docs-text">Body <strong>text</strong></p></div></aside>"#
        );
    }

    #[test]
    fn test_admonition_without_title() {
        let html = render("> [!NOTE]\n> Remember this.\n\nAfter.").html;
        assert!(html.starts_with(r#"<aside class="docs-admonition docs-admonition-info" data-variant="info"><p class="docs-admonition-label">Note</p><div class="docs-admonition-body">"#));
        assert!(html.contains("Remember this."));
        assert!(html.ends_with(r#"</aside><p class="docs-text">After.</p>"#));
    }

    #[test]
    fn test_admonition_marker_is_case_insensitive() {
        let html = render("> [!tip]\n> Try it.").html;
        assert!(html.contains(r#"data-variant="success""#));
    }

    #[test]
    fn test_unknown_marker_is_plain_quote() {
        let html = render("> [!DANGER]\n> Nope.").html;
        assert!(html.starts_with(r#"<blockquote class="docs-quote">"#));
        assert!(!html.contains("docs-admonition"));
    }

    #[test]
    fn test_nested_quote_inside_admonition() {
        let html = render("> [!IMPORTANT]\n> Outer\n>\n> > inner").html;
        assert_eq!(html.matches("<aside").count(), 1);
        assert!(html.contains(r#"<blockquote class="docs-quote"><p class="docs-text">inner</p></blockquote>"#));
        assert!(html.ends_with("</div></aside>"));
    }

    #[test]
    fn test_admonition_nested_in_quote() {
        let html = render("> outer\n>\n> > [!NOTE]\n> > inner body").html;
        assert_eq!(
            html,
            r#"<blockquote class="docs-quote"><p class="docs-text">outer</p><aside class="docs-admonition docs-admonition-info" data-variant="info"><p class="docs-admonition-label">Note</p><div class="docs-admonition-body"><p class="docs-text">inner body</p></div></aside></blockquote>"#
        );
    }

    #[test]
    fn test_admonition_headings_share_allocator() {
        let result = render("## Setup\n\n> [!NOTE]\n> ## Setup\n\n## Setup");
        let ids: Vec<_> = result.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["setup", "setup-1", "setup-2"]);
    }

    #[test]
    fn test_code_block_highlighted() {
        let html = render("```js\nconst x = 1;\n```").html;
        assert!(html.starts_with(r#"<pre class="docs-code" data-language="javascript"><code class="language-javascript">"#));
        assert!(html.contains("<span class=\"tok-"));
    }

    #[test]
    fn test_code_block_unknown_language() {
        assert_eq!(
            render("```cobol\nMOVE A TO B.\n```").html,
            "<pre class=\"docs-code\"><code>MOVE A TO B.\n</code></pre>"
        );
    }

    #[test]
    fn test_quote_in_code_fence_is_not_admonition() {
        let html = render("```\n> [!NOTE]\n```").html;
        assert_eq!(html, "<pre class=\"docs-code\"><code>&gt; [!NOTE]\n</code></pre>");
    }

    #[test]
    fn test_example_html() {
        let html = render("```example-html\n<x-badge>New</x-badge>\n```").html;
        assert!(html.starts_with(r#"<div class="docs-example"><div class="docs-example-preview"><x-badge>New</x-badge></div>"#));
        assert!(html.contains(r#"data-language="html""#));
    }

    #[test]
    fn test_example_html_rejects_script() {
        let err = renderer()
            .render_markdown("Intro\n\n```example-html\n<script>alert(1)</script>\n```")
            .unwrap_err();
        assert!(matches!(err, RenderError::ScriptInExample { index: 0 }));
    }

    #[test]
    fn test_example_inside_admonition_is_guarded() {
        let err = renderer()
            .render_markdown("> [!CAUTION]\n> ```example-html\n> <script></script>\n> ```")
            .unwrap_err();
        assert!(matches!(err, RenderError::ScriptInExample { .. }));
    }

    #[test]
    fn test_inline_code_and_links() {
        assert_eq!(
            render("Use `<x-button>` or [docs](/a?b=1&c=2).").html,
            r#"<p class="docs-text">Use <code class="docs-code-inline">&lt;x-button&gt;</code> or <a href="/a?b=1&amp;c=2">docs</a>.</p>"#
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            render("![Alt](img.png \"Title\")").html,
            r#"<p class="docs-text"><img src="img.png" title="Title" alt="Alt"></p>"#
        );
    }

    #[test]
    fn test_task_list() {
        let html = render("- [x] done\n- [ ] todo").html;
        assert!(html.contains(r#"<input type="checkbox" checked disabled> done"#));
        assert!(html.contains(r#"<input type="checkbox" disabled> todo"#));
    }

    #[test]
    fn test_gfm_disabled() {
        let mut renderer = renderer().with_gfm(false);
        let html = renderer.render_markdown("~~strike~~").unwrap().html;
        assert!(!html.contains("<s>"));
    }

    #[test]
    fn test_custom_processor_runs_after_examples() {
        struct Shout;
        impl CodeBlockProcessor for Shout {
            fn process(
                &mut self,
                language: &str,
                _attrs: &HashMap<String, String>,
                source: &str,
                _index: usize,
            ) -> Result<ProcessResult, RenderError> {
                if language == "shout" {
                    Ok(ProcessResult::Inline(source.trim().to_uppercase()))
                } else {
                    Ok(ProcessResult::PassThrough)
                }
            }
        }

        let mut renderer = renderer().with_processor(Shout);
        let html = renderer.render_markdown("```shout\nhey\n```").unwrap().html;
        assert_eq!(html, "HEY");
    }

    #[test]
    fn test_image_alt_keeps_inline_code() {
        assert_eq!(
            render("![see `x` here](a.png)").html,
            r#"<p class="docs-text"><img src="a.png" alt="see x here"></p>"#
        );
    }

    #[test]
    fn test_parse_admonition_strips_enclosing_levels() {
        let admonition = parse_admonition("> [!TIP]\n> > first\n> > second", 1).unwrap();
        assert_eq!(admonition.kind, AdmonitionKind::Tip);
        assert_eq!(admonition.body, "first\nsecond");
    }

    #[test]
    fn test_parse_admonition_strips_one_level() {
        let admonition = parse_admonition("> [!NOTE] Title\n> line\n> > nested", 0).unwrap();
        assert_eq!(admonition.kind, AdmonitionKind::Note);
        assert_eq!(admonition.title.as_deref(), Some("Title"));
        assert_eq!(admonition.body, "line\n> nested");
    }
}
