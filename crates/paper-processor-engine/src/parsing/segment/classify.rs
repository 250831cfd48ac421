/// Line-local classification used by the segmenter.
///
/// Classification has no look-ahead and no context: each line is judged on
/// its own leading characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Leading non-space character is `|`.
    Table,
    /// Line starts with `#` in column zero.
    Heading,
    /// Whitespace only.
    Blank,
    /// Anything else.
    Plain,
}

/// Classifies a line (terminator already stripped).
///
/// Checks run in the order table, heading, blank, plain. An indented `|` row
/// is a table line, but an indented `#` is plain text.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.starts_with('|') {
        LineKind::Table
    } else if line.starts_with('#') {
        LineKind::Heading
    } else if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Plain
    }
}
