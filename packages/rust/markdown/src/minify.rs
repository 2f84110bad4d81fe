//! Lossless compaction of HTML table and metadata fragments.
//!
//! Each pass is a function over the fragment applied in sequence. Content
//! inside `<pre>` is never touched, and line breaks inside text survive so
//! that wrapped cells keep their shape.

use std::sync::LazyLock;

use regex::Regex;

use gqldoc_shared::{GqlDocError, Result};

/// Compacts a structured-markup fragment without changing what it renders.
pub trait Minifier {
    fn minify(&self, fragment: &str) -> Result<String>;
}

/// Default [`Minifier`] for the HTML fragments emitted by the composer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMinifier;

impl Minifier for HtmlMinifier {
    fn minify(&self, fragment: &str) -> Result<String> {
        check_tags_terminated(fragment)?;
        let lines = strip_indentation(fragment);
        Ok(join_adjacent_tags(&lines))
    }
}

/// Pass-through [`Minifier`] used when minification is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMinifier;

impl Minifier for NoopMinifier {
    fn minify(&self, fragment: &str) -> Result<String> {
        Ok(fragment.to_string())
    }
}

// ---------------------------------------------------------------------------
// Pass 1: Reject unterminated tags
// ---------------------------------------------------------------------------

fn check_tags_terminated(fragment: &str) -> Result<()> {
    static TAG_START_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[A-Za-z/!]").expect("valid regex"));

    for m in TAG_START_RE.find_iter(fragment) {
        let rest = &fragment[m.end()..];
        let close = rest.find('>');
        let reopen = rest.find('<');
        match (close, reopen) {
            (Some(c), Some(o)) if c < o => {}
            (Some(_), None) => {}
            _ => {
                return Err(GqlDocError::minify(format!(
                    "unterminated tag at byte {}",
                    m.start()
                )));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pass 2: Strip indentation and blank lines
// ---------------------------------------------------------------------------

/// A line of output and whether it sits inside a `<pre>` block.
struct Line<'a> {
    text: &'a str,
    preformatted: bool,
}

fn strip_indentation(fragment: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut in_pre = false;

    for raw in fragment.lines() {
        if in_pre {
            lines.push(Line {
                text: raw,
                preformatted: true,
            });
            if raw.contains("</pre>") {
                in_pre = false;
            }
            continue;
        }

        let text = raw.trim_start();
        if text.trim_end().is_empty() {
            continue;
        }
        if text.contains("<pre") && !text.contains("</pre>") {
            in_pre = true;
        }
        lines.push(Line {
            text,
            preformatted: false,
        });
    }

    lines
}

// ---------------------------------------------------------------------------
// Pass 3: Join lines that break at table structure
// ---------------------------------------------------------------------------

/// Whitespace next to these tags never renders, so line breaks around them
/// can go. Breaks between inline elements are real spaces and stay.
fn is_structural_boundary(prev: &str, next: &str) -> bool {
    static OPENS_WITH_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^</?(?:table|thead|tbody|tr|th|td)\b[^>]*>").expect("valid regex")
    });
    static CLOSES_WITH_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"</?(?:table|thead|tbody|tr|th|td)\b[^>]*>$").expect("valid regex")
    });

    CLOSES_WITH_RE.is_match(prev.trim_end()) || OPENS_WITH_RE.is_match(next)
}

fn join_adjacent_tags(lines: &[Line<'_>]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Line<'_>> = None;

    for line in lines {
        if let Some(prev) = prev {
            let joinable = !prev.preformatted
                && !line.preformatted
                && is_structural_boundary(prev.text, line.text);
            if joinable {
                let len = out.trim_end().len();
                out.truncate(len);
            } else {
                out.push('\n');
            }
        }
        out.push_str(line.text);
        prev = Some(line);
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
