use std::collections::HashMap;
use std::fmt;

use crate::plugins::{BlockPlugin, TextPlugin, UseCasePlugin};

/// Mapping from block type to plugin, built once at startup.
///
/// Registering a type twice replaces the earlier plugin (last registration wins) but
/// keeps its original slot, so `list` order stays the order types were first seen.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn BlockPlugin>>,
    index: HashMap<String, usize>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `texto` and `cdu` plugins
    pub fn with_defaults() -> Self {
        Self::new()
            .with_plugin(Box::new(TextPlugin))
            .with_plugin(Box::new(UseCasePlugin))
    }

    pub fn with_plugin(mut self, plugin: Box<dyn BlockPlugin>) -> Self {
        self.register(plugin);
        self
    }

    /// Register `plugin` under its own type, returning the plugin it replaced
    pub fn register(&mut self, plugin: Box<dyn BlockPlugin>) -> Option<Box<dyn BlockPlugin>> {
        let block_type = plugin.block_type().to_string();
        match self.index.get(&block_type) {
            Some(&slot) => {
                log::debug!("Plugin for block type '{block_type}' overridden");
                Some(std::mem::replace(&mut self.plugins[slot], plugin))
            }
            None => {
                self.index.insert(block_type, self.plugins.len());
                self.plugins.push(plugin);
                None
            }
        }
    }

    pub fn resolve(&self, block_type: &str) -> Option<&dyn BlockPlugin> {
        self.index
            .get(block_type)
            .map(|&slot| self.plugins[slot].as_ref())
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.index.contains_key(block_type)
    }

    /// Plugins in registration order
    pub fn list(&self) -> impl Iterator<Item = &dyn BlockPlugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.plugins.iter().map(|plugin| plugin.block_type()))
            .finish()
    }
}
