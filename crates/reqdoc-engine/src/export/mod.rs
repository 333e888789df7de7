//! Snapshot to document translation.
//!
//! The [`Assembler`] walks a snapshot in order, asks each block's plugin for nodes and
//! numbers blocks that carry a visual code. The resulting [`DocumentTree`] is handed to
//! a [`DocumentSerializer`] to become a file.

pub mod assembler;
pub mod format;
pub mod nodes;
pub mod serializer;
pub mod style;

pub use assembler::{Assembler, format_visual_id};
pub use format::format_nodes;
pub use nodes::{
    Alignment, CellMargins, DocNode, Paragraph, Spacing, Table, TableCell, TableLayout, TableRow,
    TextRun, VerticalAlign,
};
pub use serializer::{DocumentSerializer, DocumentTree, Section, SerializeError};
