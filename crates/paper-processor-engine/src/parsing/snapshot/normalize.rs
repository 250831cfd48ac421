use std::fmt::Write;

use crate::document::Document;
use crate::parsing::{
    render::{DisplayNode, Table},
    render_block,
    rope::slice::preview,
    segment::Block,
};

/// Formats blocks and their rendered nodes as stable, line-oriented text.
///
/// One header line per block (`index shape start..end`), the block text
/// indented by four spaces, then one line per display node.
pub fn normalize(document: &Document, blocks: &[Block]) -> String {
    let mut out = String::new();
    for (i, b) in blocks.iter().enumerate() {
        let _ = writeln!(out, "[{i}] {:?} {}..{}", b.shape, b.span.start, b.span.end);
        let _ = writeln!(out, "  source: {:?}", preview(document.rope(), b.span, 60));
        for line in b.text.lines() {
            let _ = writeln!(out, "    {line}");
        }
        for node in render_block(b) {
            let _ = writeln!(out, "  - {}", describe(&node));
        }
    }
    out
}

fn describe(node: &DisplayNode) -> String {
    match node {
        DisplayNode::Heading { level, text } => format!("H{} {text:?}", level.as_u8()),
        DisplayNode::Paragraph { text } => format!("P {text:?}"),
        DisplayNode::Table(t) => describe_table(t),
    }
}

fn describe_table(t: &Table) -> String {
    let alignments: Vec<&str> = t.alignments.iter().map(|a| a.as_css()).collect();
    format!(
        "Table headers={:?} align={:?} rows={:?}",
        t.headers, alignments, t.rows
    )
}
