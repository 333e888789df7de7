use crate::models::Block;

/// Immutable copy of the block sequence at one model version.
///
/// Owns its blocks, so edits made to the model after the snapshot was taken never
/// show up in an export that is reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub version: u64,
    pub blocks: Vec<Block>,
}

impl Snapshot {
    pub fn new(version: u64, blocks: Vec<Block>) -> Self {
        Self { version, blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
