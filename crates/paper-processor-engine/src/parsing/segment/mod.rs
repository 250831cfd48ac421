//! # Block Segmentation
//!
//! Splits a paper into prose, heading and table blocks in a single forward
//! pass with constant extra state.
//!
//! ## Phases
//!
//! 1. **Line classification** (`classify`): each line is tagged `Table`,
//!    `Heading`, `Blank` or `Plain` from its leading characters alone.
//! 2. **Block construction** (`builder`): a `BlockBuilder` drives the
//!    `SegmentState` machine and flushes the accumulator on transitions.
//!
//! ## Key Invariants
//!
//! - Blocks come out in document order
//! - Blank lines are separators only; a run of them yields one boundary
//! - Every non-blank line lands in exactly one block
//! - Block text is trimmed and `\n`-joined

pub mod builder;
pub mod classify;
pub mod types;

pub use builder::{BlockBuilder, ProseMode, SegmentState, Transition};
pub use classify::{LineKind, classify_line};
pub use types::{Block, BlockShape};

use crate::document::Document;

/// Splits documents into blocks with a fixed `ProseMode`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Segmenter {
    mode: ProseMode,
}

impl Segmenter {
    pub fn new(mode: ProseMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ProseMode {
        self.mode
    }

    pub fn segment(&self, document: &Document) -> Vec<Block> {
        let mut builder = BlockBuilder::new(self.mode);
        for line in document.lines() {
            builder.push(&line);
        }
        let blocks = builder.finish();
        log::debug!(
            "segmented {} bytes into {} blocks ({:?})",
            document.len(),
            blocks.len(),
            self.mode
        );
        blocks
    }
}

/// Splits raw text into trimmed block strings using the default segmenter.
pub fn segment(raw: &str) -> Vec<String> {
    Segmenter::default()
        .segment(&Document::from(raw))
        .into_iter()
        .map(|b| b.text)
        .collect()
}
