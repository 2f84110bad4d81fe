//! Inline-text formatting for rendered schema documentation.
//!
//! Converts CommonMark descriptions to inline HTML with `pulldown-cmark`,
//! wraps long text to a column budget, and minifies HTML table fragments.

mod minify;
mod wrap;

use tracing::trace;

use gqldoc_shared::{GqlDocError, Result};

pub use minify::{HtmlMinifier, Minifier, NoopMinifier};
pub use wrap::wrap;

// ---------------------------------------------------------------------------
// Markup conversion
// ---------------------------------------------------------------------------

/// Converts a description written in lightweight markup to inline text.
pub trait MarkupConverter {
    /// Convert `markup` to its inline rendition.
    ///
    /// If the whole result is a single paragraph, the enclosing paragraph
    /// wrapper is removed so that short descriptions render inline.
    fn to_inline(&self, markup: &str) -> Result<String>;
}

/// CommonMark to HTML converter with GFM tables and strikethrough.
///
/// Soft line breaks are rendered as `<br />` so that line breaks written in
/// a description survive inside table cells.
#[derive(Debug, Clone, Copy)]
pub struct CommonMarkConverter {
    options: pulldown_cmark::Options,
}

impl Default for CommonMarkConverter {
    fn default() -> Self {
        Self {
            options: pulldown_cmark::Options::ENABLE_TABLES
                | pulldown_cmark::Options::ENABLE_STRIKETHROUGH,
        }
    }
}

impl MarkupConverter for CommonMarkConverter {
    fn to_inline(&self, markup: &str) -> Result<String> {
        use pulldown_cmark::{Event, Parser, html};

        if markup.trim().is_empty() {
            return Ok(String::new());
        }

        let parser = Parser::new_ext(markup, self.options).map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });

        let mut rendered = String::with_capacity(markup.len() * 3 / 2);
        html::write_html_fmt(&mut rendered, parser)
            .map_err(|e| GqlDocError::markup(format!("failed to render description: {e}")))?;

        let inline = strip_single_paragraph(rendered.trim_end_matches('\n'));
        trace!(input_len = markup.len(), output_len = inline.len(), "description converted");
        Ok(inline.to_string())
    }
}

/// Remove `<p>…</p>` when it wraps the entire converted text.
fn strip_single_paragraph(html: &str) -> &str {
    match html
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") && !inner.contains("</p>") => inner,
        _ => html,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert a description and wrap it to `width` columns.
///
/// Wrapping is skipped when the converted text contains a preformatted
/// block, whose line structure is significant.
pub fn format_description(
    converter: &dyn MarkupConverter,
    description: &str,
    width: usize,
) -> Result<String> {
    let inline = converter.to_inline(description)?;
    if inline.contains("<pre") {
        return Ok(inline);
    }
    Ok(wrap(&inline, width))
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Indent every line after the first by `tabs` tab characters.
///
/// Used when a rendered fragment is nested inside another one.
pub fn indent(tabs: usize, input: &str) -> String {
    let prefix = "\t".repeat(tabs);
    input
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
