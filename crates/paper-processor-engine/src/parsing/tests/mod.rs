//! Property-style tests for segmentation and rendering.
//!
//! Fixture snapshots live in the crate's `tests/` directory; these tests
//! sweep generated inputs through the invariant checker instead.

use rstest::rstest;

use crate::document::Document;
use crate::parsing::{
    parse_document,
    render::{DisplayNode, HeadingLevel, render},
    segment::{ProseMode, Segmenter, segment},
    snapshot,
};
use crate::session::Session;

const LINE_SHAPES: [&str; 8] = [
    "",
    "   ",
    "plain text",
    "# Heading",
    "### Deep heading",
    "| A | B |",
    "|---|:-:|",
    "  | indented | row |",
];

/// Every document made of up to four lines drawn from `LINE_SHAPES`.
fn generated_documents() -> Vec<String> {
    let mut docs = vec![String::new()];
    for len in 1..=4u32 {
        let total = LINE_SHAPES.len().pow(len);
        for mut n in 0..total {
            let mut lines = Vec::with_capacity(len as usize);
            for _ in 0..len {
                lines.push(LINE_SHAPES[n % LINE_SHAPES.len()]);
                n /= LINE_SHAPES.len();
            }
            docs.push(lines.join("\n"));
        }
    }
    docs
}

#[rstest]
fn invariants_hold_for_generated_documents(
    #[values(ProseMode::Join, ProseMode::LinePerBlock)] mode: ProseMode,
) {
    for md in generated_documents() {
        let document = Document::from(md.as_str());
        let doc = parse_document(&document, mode);
        snapshot::invariants(&document, &doc.blocks);
    }
}

#[rstest]
fn session_load_gives_one_empty_slot_per_block(
    #[values(ProseMode::Join, ProseMode::LinePerBlock)] mode: ProseMode,
) {
    let segmenter = Segmenter::new(mode);
    let mut session = Session::new(segmenter);
    for md in generated_documents() {
        let document = Document::from(md.as_str());
        session.load(&document);

        let blocks = segmenter.segment(&document);
        assert_eq!(session.len(), blocks.len(), "slot count for {md:?}");
        assert!(
            session.entries().iter().all(|e| e.result.is_empty()),
            "non-empty slot after loading {md:?}"
        );
        assert_eq!(session.result_texts(), vec![String::new(); blocks.len()]);
    }
}

#[test]
fn rendering_never_panics_on_generated_blocks() {
    for md in generated_documents() {
        for block in segment(&md) {
            let first = render(&block);
            assert_eq!(first, render(&block), "render is not pure for {block:?}");
        }
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
fn any_blank_run_is_one_boundary(#[case] blanks: usize) {
    let md = format!("alpha{}beta", "\n".repeat(blanks + 1));
    assert_eq!(segment(&md), vec!["alpha", "beta"]);
}

#[test]
fn whitespace_only_lines_count_as_blank() {
    assert_eq!(segment("alpha\n \t \nbeta"), vec!["alpha", "beta"]);
}

#[test]
fn scenario_blocks_render_as_expected() {
    let md = "# Title\n\nParagraph one text.\n\n| A | B |\n|---|---|\n| 1 | 2 |";
    let blocks = segment(md);
    assert_eq!(blocks.len(), 3);

    assert_eq!(
        render(&blocks[0]),
        vec![DisplayNode::Heading {
            level: HeadingLevel::H1,
            text: "Title".to_string()
        }]
    );
    assert_eq!(
        render(&blocks[1]),
        vec![DisplayNode::Paragraph {
            text: "Paragraph one text.".to_string()
        }]
    );
    let nodes = render(&blocks[2]);
    let DisplayNode::Table(table) = &nodes[0] else {
        panic!("expected a table node");
    };
    assert_eq!(table.headers, vec!["A", "B"]);
    assert_eq!(table.rows, vec![vec!["1", "2"]]);
}
