//! Column-width-aware wrapping for table cells and prose.

/// Insert line breaks so that no line exceeds `width` columns.
///
/// Breaks are inserted only at whitespace boundaries: after a whitespace
/// run when the run still fits on the line, before it otherwise. Deleting
/// the inserted `\n`s gives back the input unchanged. A word wider than
/// `width` is emitted on its own line as-is. Existing line breaks reset the
/// column. A `width` of 0 disables wrapping.
///
/// No break is placed directly before a token that would open a Markdown
/// block (`-`, `1.`, `#`, `>`, ...); the preceding word moves down with it
/// instead, so wrapped prose stays one paragraph.
pub fn wrap(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + text.len() / width);
    let mut line = Line::default();
    // Whitespace seen since the last word, not yet placed.
    let mut pending = "";

    for token in tokens(text) {
        match token {
            Token::Space(space) => match space.rfind('\n') {
                Some(idx) => {
                    line.push(&space[..=idx], false);
                    line.flush_into(&mut out);
                    pending = &space[idx + 1..];
                }
                None => pending = space,
            },
            Token::Word(word) => {
                place_word(&mut out, &mut line, pending, word, width);
                pending = "";
            }
        }
    }

    line.push(pending, false);
    line.flush_into(&mut out);
    out
}

fn place_word<'a>(
    out: &mut String,
    line: &mut Line<'a>,
    gap: &'a str,
    word: &'a str,
    width: usize,
) {
    if line.words == 0 || line.width + columns(gap) + columns(word) <= width {
        line.push(gap, false);
        line.push(word, true);
        return;
    }

    if starts_block(word) {
        match line.pop_word() {
            Some(carried) if !starts_block(carried) => {
                line.flush_into(out);
                out.push('\n');
                line.push(carried, true);
            }
            carried => {
                // Nothing safe to carry: keep the marker on this line.
                if let Some(carried) = carried {
                    line.push(carried, true);
                }
            }
        }
        line.push(gap, false);
        line.push(word, true);
        return;
    }

    if line.width + columns(gap) <= width || line.width > width {
        line.push(gap, false);
        line.flush_into(out);
        out.push('\n');
    } else {
        line.flush_into(out);
        out.push('\n');
        line.push(gap, false);
    }
    line.push(word, true);
}

/// Whether `word` at the start of a line would open a Markdown block:
/// a list bullet, ordered-list number, heading, thematic break, setext
/// underline, block quote or code fence.
fn starts_block(word: &str) -> bool {
    let ordered = word
        .strip_suffix(['.', ')'])
        .is_some_and(|n| !n.is_empty() && n.len() <= 9 && n.bytes().all(|b| b.is_ascii_digit()));

    ordered
        || word.starts_with('>')
        || word.starts_with("```")
        || word.starts_with("~~~")
        || word.chars().all(|c| matches!(c, '-' | '*' | '+' | '=' | '_' | '#'))
}

fn columns(text: &str) -> usize {
    text.chars().count()
}

/// The line being built, kept as borrowed pieces until it is complete.
#[derive(Default)]
struct Line<'a> {
    pieces: Vec<&'a str>,
    width: usize,
    words: usize,
}

impl<'a> Line<'a> {
    fn push(&mut self, piece: &'a str, is_word: bool) {
        if piece.is_empty() {
            return;
        }
        self.width += columns(piece);
        if is_word {
            self.words += 1;
        }
        self.pieces.push(piece);
    }

    /// Remove the last word, unless it is the only one.
    fn pop_word(&mut self) -> Option<&'a str> {
        if self.words < 2 {
            return None;
        }
        let word = self.pieces.pop()?;
        self.width -= columns(word);
        self.words -= 1;
        Some(word)
    }

    fn flush_into(&mut self, out: &mut String) {
        for piece in self.pieces.drain(..) {
            out.push_str(piece);
        }
        self.width = 0;
        self.words = 0;
    }
}

enum Token<'a> {
    Word(&'a str),
    Space(&'a str),
}

/// Split `text` into alternating runs of whitespace and non-whitespace.
fn tokens(text: &str) -> impl Iterator<Item = Token<'_>> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_space = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != is_space)
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(if is_space {
            Token::Space(run)
        } else {
            Token::Word(run)
        })
    })
}
