use crate::models::{BlockId, ContentKind};

/// A rejected edit. The model is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Block type '{0}' is not registered")]
    UnknownBlockType(String),

    #[error("Block '{0}' not found")]
    BlockNotFound(BlockId),

    #[error("Index {index} is out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Block at index {index} is already at the edge of the document")]
    AtEdge { index: usize },

    #[error("Block '{id}' holds {expected} content, got {found}")]
    ContentShapeMismatch {
        id: BlockId,
        expected: ContentKind,
        found: ContentKind,
    },

    #[error("Duplicate block id '{0}'")]
    DuplicateBlockId(BlockId),
}
