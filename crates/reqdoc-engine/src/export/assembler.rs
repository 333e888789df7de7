use std::collections::HashMap;

use crate::editing::Snapshot;
use crate::export::serializer::DocumentTree;
use crate::export::{DocNode, style};
use crate::plugins::{BlockPlugin, PluginRegistry};

/// Formats a visual identifier: short code plus the counter padded to two digits
pub fn format_visual_id(code: &str, counter: u32) -> String {
    format!("{code}{counter:02}")
}

/// Per-type running counters for one assembly pass.
///
/// Counters are never stored on blocks; a fresh `Numbering` per pass makes the ids
/// follow the current document order.
#[derive(Debug, Default)]
struct Numbering {
    counters: HashMap<String, u32>,
}

impl Numbering {
    fn next(&mut self, plugin: &dyn BlockPlugin) -> Option<String> {
        let code = plugin.visual_code()?;
        let counter = self
            .counters
            .entry(plugin.block_type().to_string())
            .or_insert(0);
        *counter += 1;
        Some(format_visual_id(code, *counter))
    }
}

/// Translates a snapshot into an ordered sequence of document nodes.
///
/// Assembly is deterministic and side-effect free: the same snapshot always yields the
/// same nodes. Blocks whose type has no registered plugin are skipped.
pub struct Assembler<'a> {
    registry: &'a PluginRegistry,
    title: Option<String>,
}

impl<'a> Assembler<'a> {
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self {
            registry,
            title: None,
        }
    }

    /// Prepend a fixed heading. Blank text disables it.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = if title.trim().is_empty() {
            None
        } else {
            Some(title)
        };
        self
    }

    pub fn assemble(&self, snapshot: &Snapshot) -> Vec<DocNode> {
        let mut nodes = Vec::new();
        if let Some(title) = &self.title {
            nodes.push(style::title(title).into());
        }

        let mut numbering = Numbering::default();
        for block in &snapshot.blocks {
            let Some(plugin) = self.registry.resolve(block.block_type()) else {
                log::debug!(
                    "Skipping block '{}' with unregistered type '{}'",
                    block.id(),
                    block.block_type()
                );
                continue;
            };

            let visual_id = numbering.next(plugin);
            nodes.extend(plugin.export(block.content(), visual_id.as_deref()));
        }

        log::debug!(
            "Assembled {} nodes from {} blocks (version {})",
            nodes.len(),
            snapshot.len(),
            snapshot.version
        );
        nodes
    }

    /// Assemble into a single-section document ready for a serializer
    pub fn document(&self, snapshot: &Snapshot) -> DocumentTree {
        DocumentTree::single(self.assemble(snapshot))
    }

    /// Visual identifier each block would receive on export, aligned with
    /// `snapshot.blocks`
    pub fn visual_ids(&self, snapshot: &Snapshot) -> Vec<Option<String>> {
        let mut numbering = Numbering::default();
        snapshot
            .blocks
            .iter()
            .map(|block| {
                self.registry
                    .resolve(block.block_type())
                    .and_then(|plugin| numbering.next(plugin))
            })
            .collect()
    }
}
