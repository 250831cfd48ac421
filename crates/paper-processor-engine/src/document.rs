use std::str::FromStr;

use xi_rope::Rope;

use crate::parsing::rope::{LineRef, Span, lines_with_spans, slice_to_string};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// A loaded paper: the raw markdown text held in an xi-rope buffer.
///
/// Documents are immutable once loaded. A new upload produces a new
/// `Document`, and the session re-segments it from scratch.
#[derive(Debug, Clone)]
pub struct Document {
    buffer: Rope,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self {
            buffer: Rope::from(text),
        })
    }

    /// Get the full text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    /// Iterate the physical lines of the document with their spans.
    pub fn lines(&self) -> impl Iterator<Item = LineRef> + '_ {
        lines_with_spans(&self.buffer)
    }

    /// Source text covered by `span`, clamped to the document bounds.
    pub fn slice(&self, span: Span) -> String {
        slice_to_string(&self.buffer, span)
    }
}

impl FromStr for Document {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            buffer: Rope::from(s),
        })
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Self {
            buffer: Rope::from(s),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}
