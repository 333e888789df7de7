pub mod editing;
pub mod export;
pub mod io;
pub mod models;
pub mod plugins;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{BlockModel, Cmd, EditError, Patch, Snapshot};
pub use export::{Assembler, DocNode, DocumentSerializer, DocumentTree, SerializeError};
pub use io::*;
pub use models::{Block, BlockContent, BlockId, ContentKind, UseCase, UseCaseField};
pub use plugins::{BlockPlugin, PluginRegistry, TextPlugin, UseCasePlugin};
