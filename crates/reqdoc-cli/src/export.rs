use std::path::Path;

use anyhow::{Context, Result};
use reqdoc_docx::DocxWriter;
use reqdoc_engine::{Assembler, BlockModel, DocumentTree, io};

/// Assemble the model's current state under `title` (blank for none)
pub fn assemble(model: &BlockModel, title: &str) -> DocumentTree {
    let registry = model.registry().clone();
    Assembler::new(&registry)
        .with_title(title)
        .document(&model.snapshot())
}

/// Assemble, pack and save the document to `path`. Returns the artifact size.
pub fn export_to(model: &BlockModel, title: &str, path: &Path) -> Result<usize> {
    let document = assemble(model, title);
    let bytes = document
        .serialize_with(&DocxWriter::new())
        .context("Failed to build docx")?;
    io::save_artifact(path, &bytes)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(bytes.len())
}
