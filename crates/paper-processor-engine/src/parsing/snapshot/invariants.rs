use crate::document::Document;
use crate::parsing::segment::Block;

/// Validates segmenter output invariants.
///
/// Asserts that:
/// - All block spans are within document bounds
/// - Blocks are in document order and do not overlap
/// - No block is empty or contains a blank line
/// - The blocks' lines, in order, are exactly the document's non-blank
///   lines (modulo trimming at block edges)
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(document: &Document, blocks: &[Block]) {
    let n = document.len();
    let mut last_end = 0;
    for b in blocks {
        assert!(
            b.span.start <= b.span.end && b.span.end <= n,
            "block span out of bounds: {:?} (document len: {})",
            b.span,
            n
        );
        assert!(
            b.span.start >= last_end,
            "block span {:?} overlaps or precedes previous block ending at {}",
            b.span,
            last_end
        );
        last_end = b.span.end;

        assert!(!b.text.is_empty(), "empty block at {:?}", b.span);
        assert!(
            b.text.lines().all(|l| !l.trim().is_empty()),
            "blank line inside block at {:?}",
            b.span
        );
    }

    let source: Vec<String> = document
        .lines()
        .map(|l| l.text.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    let segmented: Vec<String> = blocks
        .iter()
        .flat_map(|b| b.text.lines())
        .map(|l| l.trim().to_string())
        .collect();
    assert_eq!(
        source, segmented,
        "blocks do not reproduce the document's content lines"
    );
}
