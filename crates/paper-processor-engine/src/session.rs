//! # Session State
//!
//! The single in-memory collection for the active paper: one [`Entry`] per
//! block, each owning its block and its result slot. Blocks and results
//! live in one `Vec`, so their counts can never drift apart.
//!
//! ## Generations
//!
//! Every load bumps the session [`Generation`]. Transforms are split into
//! `begin_transform` (hands out a request tagged with the generation) and
//! `complete_transform` (writes the reply). A reply carrying an older
//! generation belongs to a document that has since been replaced and is
//! dropped without touching any slot. Within one generation each request
//! also carries a sequence number, and a slot accepts only the reply to the
//! request most recently begun for it.
//!
//! ## Observers
//!
//! Registered [`SessionObserver`]s are notified after every load and every
//! slot write. Front ends use this to redraw.

use std::fmt;

use crate::document::Document;
use crate::parsing::segment::{Block, ProseMode, Segmenter};
use crate::transform::{
    Operation, TransformError, TransformRequest, TransformService, TransformTicket,
};

/// Load counter; increases by one on every document load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Output of a transform for one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultSlot {
    /// No transform has run since the document was loaded.
    #[default]
    Empty,
    /// A request is out and no reply has arrived.
    Pending { operation: Operation },
    Ready { operation: Operation, text: String },
    /// The service failed. Distinct from `Empty` so a failure is never
    /// mistaken for an unprocessed block.
    Failed { operation: Operation, message: String },
}

impl ResultSlot {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResultSlot::Empty)
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            ResultSlot::Empty => None,
            ResultSlot::Pending { operation }
            | ResultSlot::Ready { operation, .. }
            | ResultSlot::Failed { operation, .. } => Some(*operation),
        }
    }

    /// Text shown in the result column.
    pub fn display_text(&self) -> String {
        match self {
            ResultSlot::Empty => String::new(),
            ResultSlot::Pending { operation } => format!("{}: …", operation.label()),
            ResultSlot::Ready { text, .. } => text.clone(),
            ResultSlot::Failed { operation, message } => {
                format!("[{} failed] {message}", operation.label())
            }
        }
    }
}

/// A block together with its result slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub block: Block,
    pub result: ResultSlot,
    /// Sequence of the last request begun for this slot, 0 for none.
    latest_request: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The block collection was replaced.
    Loaded { generation: Generation, blocks: usize },
    /// Exactly one result slot changed.
    SlotUpdated { generation: Generation, index: usize },
}

pub trait SessionObserver {
    fn notify(&mut self, event: &SessionEvent);
}

impl<F: FnMut(&SessionEvent)> SessionObserver for F {
    fn notify(&mut self, event: &SessionEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("block index {index} out of range ({len} blocks)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("stale transform for {} (current {current})", .ticket.generation)]
    StaleGeneration {
        ticket: TransformTicket,
        current: Generation,
    },

    #[error("transform #{} for block {} superseded by #{latest}", .ticket.sequence, .ticket.index)]
    Superseded { ticket: TransformTicket, latest: u64 },
}

pub struct Session {
    segmenter: Segmenter,
    model: String,
    generation: Generation,
    last_sequence: u64,
    entries: Vec<Entry>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    pub fn new(segmenter: Segmenter) -> Self {
        Self {
            segmenter,
            model: String::new(),
            generation: Generation::default(),
            last_sequence: 0,
            entries: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Sets the model name copied into every transform request.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prose_mode(&self) -> ProseMode {
        self.segmenter.mode()
    }

    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replaces the whole block collection with the segmentation of
    /// `document`. Every result slot starts out empty.
    pub fn load(&mut self, document: &Document) {
        let blocks = self.segmenter.segment(document);
        self.replace_entries(blocks);
    }

    pub fn load_str(&mut self, raw: &str) {
        self.load(&Document::from(raw));
    }

    /// Drops every block and result.
    pub fn clear(&mut self) {
        self.replace_entries(Vec::new());
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn block_texts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.block.text.as_str()).collect()
    }

    pub fn result_texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.result.display_text()).collect()
    }

    /// Runs `operation` on block `index` through `service` and stores the
    /// reply. Service failures are recorded in the slot, not returned.
    pub fn apply_transform(
        &mut self,
        index: usize,
        operation: Operation,
        service: &dyn TransformService,
    ) -> Result<(), SessionError> {
        let request = self.begin_transform(index, operation)?;
        let outcome = service.transform(&request);
        self.complete_transform(request.ticket(), outcome)
    }

    /// Marks slot `index` pending and returns the request to send.
    pub fn begin_transform(
        &mut self,
        index: usize,
        operation: Operation,
    ) -> Result<TransformRequest, SessionError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })?;

        self.last_sequence += 1;
        entry.latest_request = self.last_sequence;
        entry.result = ResultSlot::Pending { operation };
        let request = TransformRequest {
            generation: self.generation,
            sequence: self.last_sequence,
            index,
            operation,
            model: self.model.clone(),
            text: entry.block.text.clone(),
        };

        log::debug!("{} block {index}: {} requested", self.generation, operation.slug());
        self.emit(SessionEvent::SlotUpdated {
            generation: self.generation,
            index,
        });
        Ok(request)
    }

    /// Writes a service reply into the slot named by `ticket`.
    ///
    /// Replies for a replaced document are rejected with
    /// [`SessionError::StaleGeneration`] and leave every slot untouched.
    pub fn complete_transform(
        &mut self,
        ticket: TransformTicket,
        outcome: Result<String, TransformError>,
    ) -> Result<(), SessionError> {
        if ticket.generation != self.generation {
            log::warn!(
                "dropping {} result for block {} from {} (current {})",
                ticket.operation.slug(),
                ticket.index,
                ticket.generation,
                self.generation
            );
            return Err(SessionError::StaleGeneration {
                ticket,
                current: self.generation,
            });
        }

        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(ticket.index)
            .ok_or(SessionError::IndexOutOfRange {
                index: ticket.index,
                len,
            })?;

        if entry.latest_request != ticket.sequence {
            log::warn!(
                "dropping {} result #{} for block {}: #{} is newer",
                ticket.operation.slug(),
                ticket.sequence,
                ticket.index,
                entry.latest_request
            );
            return Err(SessionError::Superseded {
                ticket,
                latest: entry.latest_request,
            });
        }

        entry.result = match outcome {
            Ok(text) => ResultSlot::Ready {
                operation: ticket.operation,
                text,
            },
            Err(err) => {
                log::warn!(
                    "{} failed for block {}: {err}",
                    ticket.operation.slug(),
                    ticket.index
                );
                ResultSlot::Failed {
                    operation: ticket.operation,
                    message: err.to_string(),
                }
            }
        };

        self.emit(SessionEvent::SlotUpdated {
            generation: self.generation,
            index: ticket.index,
        });
        Ok(())
    }

    fn replace_entries(&mut self, blocks: Vec<Block>) {
        self.generation = self.generation.next();
        self.entries = blocks
            .into_iter()
            .map(|block| Entry {
                block,
                result: ResultSlot::Empty,
                latest_request: 0,
            })
            .collect();

        log::debug!("{} loaded with {} blocks", self.generation, self.entries.len());
        self.emit(SessionEvent::Loaded {
            generation: self.generation,
            blocks: self.entries.len(),
        });
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Segmenter::default())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("segmenter", &self.segmenter)
            .field("model", &self.model)
            .field("generation", &self.generation)
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}
