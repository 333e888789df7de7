use crate::models::Block;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid block list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a JSON array of blocks, as produced by [`write_blocks`]
pub fn read_blocks(path: &Path) -> Result<Vec<Block>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    let blocks = serde_json::from_str(&json)?;
    Ok(blocks)
}

/// Write blocks as a pretty-printed JSON array
pub fn write_blocks(path: &Path, blocks: &[Block]) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(blocks)?;
    save_artifact(path, json.as_bytes())
}

/// Write a serialized artifact, creating parent directories as needed
pub fn save_artifact(path: &Path, bytes: &[u8]) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, bytes)?;
    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
