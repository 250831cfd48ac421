use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
///
/// This allocates; prefer working with spans where possible.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    let end = sp.end.min(rope.len());
    let start = sp.start.min(end);
    rope.slice_to_cow(start..end).into_owned()
}

/// Extracts text for a span, truncating to at most `max` bytes with "..." suffix if needed.
///
/// Truncation backs off to a char boundary, so multi-byte text never splits.
pub fn preview(rope: &Rope, sp: Span, max: usize) -> String {
    let mut s = slice_to_string(rope, sp);
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        let rope = Rope::from("hello");
        assert_eq!(preview(&rope, Span::new(0, 5), 10), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        let rope = Rope::from("hello world");
        assert_eq!(preview(&rope, Span::new(0, 11), 5), "hello...");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        // Each CJK char is three bytes.
        let rope = Rope::from("中英互译");
        assert_eq!(preview(&rope, Span::new(0, 12), 4), "中...");
    }

    #[test]
    fn slice_to_string_partial_span() {
        let rope = Rope::from("hello world");
        assert_eq!(slice_to_string(&rope, Span::new(6, 11)), "world");
    }

    #[test]
    fn slice_to_string_clamps_out_of_range() {
        let rope = Rope::from("abc");
        assert_eq!(slice_to_string(&rope, Span::new(1, 99)), "bc");
    }
}
