pub mod render;
pub mod rope;
pub mod segment;
pub mod snapshot;

#[cfg(test)]
mod tests;

use crate::document::Document;

use render::DisplayNode;
use segment::{Block, ProseMode, Segmenter};

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<Block>,
}

pub fn parse_document(document: &Document, mode: ProseMode) -> ParsedDoc {
    ParsedDoc {
        blocks: Segmenter::new(mode).segment(document),
    }
}

/// Convenience: display nodes for a segmented block.
pub fn render_block(block: &Block) -> Vec<DisplayNode> {
    render::render(&block.text)
}
