//! # Block Plugins
//!
//! A plugin owns everything type-specific about a block: the label offered to the
//! user, the default content of a new block and the export into document nodes.
//! The model and the assembler only ever talk to plugins through [`BlockPlugin`],
//! so a new block kind is one new plugin registered at startup.
//!
//! ## Modules
//!
//! - **`registry`**: `PluginRegistry`, the type-string → plugin mapping
//! - **`kinds`**: the built-in plugins (`texto`, `cdu`)

pub mod kinds;
pub mod registry;

pub use kinds::{TextPlugin, UseCasePlugin};
pub use registry::PluginRegistry;

use crate::export::DocNode;
use crate::models::BlockContent;

/// Capability implemented once per block type.
pub trait BlockPlugin: Send + Sync {
    /// Registry key; also the `type` stored on every block of this kind
    fn block_type(&self) -> &str;

    /// Text of the "add block" affordance
    fn label(&self) -> &str;

    /// Content of a freshly added block. Its shape is the shape every block of this
    /// type must keep.
    fn default_content(&self) -> BlockContent;

    /// Short code for visual numbering (`CDU` → `CDU01`). `None` opts out.
    fn visual_code(&self) -> Option<&str> {
        None
    }

    /// Translate one block's content into document nodes.
    ///
    /// Must depend only on its arguments. `visual_id` is present exactly when
    /// `visual_code` is.
    fn export(&self, content: &BlockContent, visual_id: Option<&str>) -> Vec<DocNode>;
}
