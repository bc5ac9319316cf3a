//! HTML backend for markdown rendering.
//!
//! Produces HTML fragments styled through `docs-*` classes, which the page
//! runtime's stylesheet targets.

use std::fmt::Write;

use crate::backend::{AdmonitionKind, RenderBackend};
use crate::text::escape_html;

/// HTML render backend.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn paragraph_start(in_list_item: bool, out: &mut String) {
        if in_list_item {
            out.push_str("<p>");
        } else {
            out.push_str(r#"<p class="docs-text">"#);
        }
    }

    fn heading(level: u8, id: &str, html: &str, out: &mut String) {
        write!(
            out,
            r##"<h{level} id="{id}" class="docs-heading">{html}<a class="docs-permalink" href="#{id}" aria-label="Link to this section"></a></h{level}>"##,
        )
        .unwrap();
    }

    fn blockquote_start(out: &mut String) {
        out.push_str(r#"<blockquote class="docs-quote">"#);
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn admonition(kind: AdmonitionKind, title: Option<&str>, body_html: &str, out: &mut String) {
        let variant = kind.variant();
        write!(
            out,
            r#"<aside class="docs-admonition docs-admonition-{variant}" data-variant="{variant}"><p class="docs-admonition-label">{}</p>"#,
            kind.label()
        )
        .unwrap();
        if let Some(title) = title {
            write!(
                out,
                r#"<p class="docs-admonition-title">{}</p>"#,
                escape_html(title)
            )
            .unwrap();
        }
        write!(out, r#"<div class="docs-admonition-body">{body_html}</div></aside>"#).unwrap();
    }

    fn code_block(language: Option<&str>, code_html: &str, out: &mut String) {
        if let Some(lang) = language {
            write!(
                out,
                r#"<pre class="docs-code" data-language="{lang}"><code class="language-{lang}">{code_html}</code></pre>"#
            )
            .unwrap();
        } else {
            write!(out, r#"<pre class="docs-code"><code>{code_html}</code></pre>"#).unwrap();
        }
    }

    fn example(preview: &str, source_html: &str, out: &mut String) {
        write!(
            out,
            r#"<div class="docs-example"><div class="docs-example-preview">{preview}</div><pre class="docs-code docs-example-source" data-language="html"><code class="language-html">{source_html}</code></pre></div>"#
        )
        .unwrap();
    }

    fn table_start(out: &mut String) {
        out.push_str(r#"<div class="docs-table-scroll"><table class="docs-table">"#);
    }

    fn table_end(out: &mut String) {
        out.push_str("</tbody></table></div>");
    }

    fn list_item_start(out: &mut String) {
        out.push_str(r#"<li><div class="docs-text">"#);
    }

    fn list_item_end(out: &mut String) {
        out.push_str("</div></li>");
    }

    fn inline_code(code: &str, out: &mut String) {
        write!(out, r#"<code class="docs-code-inline">{}</code>"#, escape_html(code)).unwrap();
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }
}
