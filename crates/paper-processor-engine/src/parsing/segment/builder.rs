use crate::parsing::rope::{lines::LineRef, span::Span};

use super::{
    classify::{LineKind, classify_line},
    types::{Block, BlockShape},
};

/// How consecutive plain lines are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProseMode {
    /// Consecutive plain lines extend the same prose block.
    #[default]
    Join,
    /// Every plain line outside a heading or table run starts a new block.
    LinePerBlock,
}

/// Segmenter state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    /// Nothing accumulated.
    Idle,
    /// Accumulating plain lines.
    InProse,
    /// Accumulating a heading run. Plain lines do not end it; only a blank
    /// line or a table row does.
    InHeader,
    /// Accumulating table rows. `header_run` is set when the table was
    /// entered from a heading run: that run is still considered open, so a
    /// following heading or plain line joins the table block instead of
    /// splitting it.
    InTable { header_run: bool },
}

/// What to do with the accumulator for one line, and the state after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub flush: bool,
    pub append: bool,
    pub next: SegmentState,
}

impl SegmentState {
    pub fn transition(self, kind: LineKind, mode: ProseMode) -> Transition {
        use SegmentState::*;

        let step = |flush: bool, next: SegmentState| Transition {
            flush,
            append: true,
            next,
        };

        match (self, kind) {
            (_, LineKind::Blank) => Transition {
                flush: self != Idle,
                append: false,
                next: Idle,
            },

            (Idle, LineKind::Table) => step(false, InTable { header_run: false }),
            (InProse, LineKind::Table) => step(true, InTable { header_run: false }),
            (InHeader, LineKind::Table) => step(true, InTable { header_run: true }),
            (InTable { header_run }, LineKind::Table) => step(false, InTable { header_run }),

            (Idle, LineKind::Heading) => step(false, InHeader),
            (InProse, LineKind::Heading) => step(true, InHeader),
            (InHeader, LineKind::Heading) => step(false, InHeader),
            (InTable { header_run }, LineKind::Heading) => step(!header_run, InHeader),

            (Idle, LineKind::Plain) => step(false, InProse),
            (InProse, LineKind::Plain) => step(mode == ProseMode::LinePerBlock, InProse),
            (InHeader, LineKind::Plain) => step(false, InHeader),
            (InTable { header_run: false }, LineKind::Plain) => step(false, InProse),
            (InTable { header_run: true }, LineKind::Plain) => step(false, InHeader),
        }
    }
}

#[derive(Debug)]
struct PendingBlock {
    shape: BlockShape,
    span: Span,
    lines: Vec<String>,
}

/// Streaming block builder: feed lines in document order, then `finish`.
pub struct BlockBuilder {
    mode: ProseMode,
    state: SegmentState,
    pending: Option<PendingBlock>,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new(mode: ProseMode) -> Self {
        Self {
            mode,
            state: SegmentState::Idle,
            pending: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: &LineRef) {
        let kind = classify_line(&line.text);
        let t = self.state.transition(kind, self.mode);

        if t.flush {
            self.flush();
        }
        if t.append {
            self.append(kind, line);
        }
        self.state = t.next;
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush
        self.flush();
        self.out
    }

    fn append(&mut self, kind: LineKind, line: &LineRef) {
        let span = line.content_span();
        match &mut self.pending {
            Some(p) => {
                p.span = p.span.cover(span);
                p.lines.push(line.text.clone());
            }
            None => {
                let shape = match kind {
                    LineKind::Table => BlockShape::Table,
                    LineKind::Heading => BlockShape::Heading,
                    LineKind::Blank | LineKind::Plain => BlockShape::Prose,
                };
                self.pending = Some(PendingBlock {
                    shape,
                    span,
                    lines: vec![line.text.clone()],
                });
            }
        }
    }

    fn flush(&mut self) {
        let Some(p) = self.pending.take() else {
            return;
        };
        let text = p.lines.join("\n").trim().to_string();
        if text.is_empty() {
            return;
        }
        log::trace!(
            "flushed {:?} block at {}..{} ({} lines)",
            p.shape,
            p.span.start,
            p.span.end,
            p.lines.len()
        );
        self.out.push(Block {
            span: p.span,
            text,
            shape: p.shape,
        });
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new(ProseMode::default())
    }
}
