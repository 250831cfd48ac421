use xi_rope::Rope;

use super::span::Span;

/// A single physical line of the document with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes the newline if present).
    pub span: Span,
    /// The line text with the trailing `\n` / `\r\n` removed.
    pub text: String,
}

impl LineRef {
    /// Span of the line without its line terminator.
    pub fn content_span(&self) -> Span {
        Span {
            start: self.span.start,
            end: self.span.start + self.text.len(),
        }
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` so spans stay exact; the terminator is stripped from
/// `text` only.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: Span { start, end: offset },
            text: line.trim_end_matches(['\r', '\n']).to_string(),
        }
    })
}
