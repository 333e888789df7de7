use crate::models::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Blocks added, edited, moved or removed by the command
    pub changed: Vec<BlockId>,
    pub version: u64,
}
