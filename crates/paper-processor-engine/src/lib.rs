pub mod document;
pub mod html;
pub mod io;
pub mod models;
pub mod parsing;
pub mod session;
pub mod transform;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use document::{Document, DocumentError};
pub use html::{render_block_html, to_html};
pub use io::*;
pub use models::paper_file::*;
pub use parsing::render::{Alignment, DisplayNode, HeadingLevel, Table, render};
pub use parsing::segment::{Block, BlockShape, ProseMode, Segmenter, segment};
pub use session::{
    Entry, Generation, ResultSlot, Session, SessionError, SessionEvent, SessionObserver,
};
pub use transform::{EchoService, Operation, TransformError, TransformRequest, TransformService};
