//! # Snapshot Testing Support
//!
//! Utilities for testing segmentation and rendering via snapshot assertions
//! and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Formats blocks and their display nodes as stable text
//!   for `insta` snapshots
//! - **`invariants`**: Runtime checks for segmenter correctness (spans in
//!   bounds, document order, no blank lines inside blocks, every content
//!   line accounted for)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::normalize;
