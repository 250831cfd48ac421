
use crate::parsing::rope::span::Span;

/// Shape of a block's leading line.
///
/// Informational only: the renderer re-derives structure line by line and
/// never consults this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    Prose,
    Heading,
    Table,
}

/// One segmented unit of a paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Byte span of the source lines this block was built from.
    pub span: Span,
    /// The block's lines joined with `\n`, trimmed at both ends.
    pub text: String,
    /// Shape of the first line.
    pub shape: BlockShape,
}
