use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::editing::{BlockModel, Snapshot};
use crate::models::{Block, BlockId};
use crate::plugins::PluginRegistry;

/// Create a temporary directory for file-based tests
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Empty model backed by the built-in plugins
pub fn default_model() -> BlockModel {
    BlockModel::new(Arc::new(PluginRegistry::with_defaults()))
}

pub fn ids_of(model: &BlockModel) -> Vec<BlockId> {
    model.blocks().iter().map(|b| b.id().clone()).collect()
}

pub fn types_of(model: &BlockModel) -> Vec<&str> {
    model.blocks().iter().map(Block::block_type).collect()
}

pub fn snapshot_of(blocks: Vec<Block>) -> Snapshot {
    Snapshot::new(0, blocks)
}
