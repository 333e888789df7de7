use crate::models::{BlockContent, BlockId};

/// Commands that can be applied to a `BlockModel`
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Append a new block of the given type with its plugin's default content
    Add { block_type: String },
    UpdateContent { id: BlockId, content: BlockContent },
    Move { from: usize, to: usize },
    MoveUp { index: usize },
    MoveDown { index: usize },
    /// Drag-and-drop: move `active` to the position currently held by `over`
    MoveById { active: BlockId, over: BlockId },
    Remove { id: BlockId },
}

impl Cmd {
    pub fn add(block_type: impl Into<String>) -> Self {
        Cmd::Add {
            block_type: block_type.into(),
        }
    }

    pub fn update(id: BlockId, content: BlockContent) -> Self {
        Cmd::UpdateContent { id, content }
    }
}
