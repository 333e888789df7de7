use std::collections::HashSet;
use std::sync::Arc;

use crate::editing::{Cmd, EditError, Patch, Snapshot};
use crate::models::{Block, BlockContent, BlockId};
use crate::plugins::PluginRegistry;

/// Ordered, mutable sequence of typed blocks: the single source of truth for the
/// document's structure and content.
///
/// ## Invariants
/// - Block ids are unique for the lifetime of the model
/// - A block's type never changes; its content keeps the shape it was created with
/// - Order is document order; moves only permute positions
/// - A rejected operation leaves the model untouched (all checks run before mutation)
///
/// ## Usage Pattern
///
/// ```rust
/// # use std::sync::Arc;
/// # use reqdoc_engine::{BlockModel, BlockContent, PluginRegistry, UseCase};
/// let registry = Arc::new(PluginRegistry::with_defaults());
/// let mut model = BlockModel::new(registry);
///
/// let intro = model.add("texto").unwrap();
/// let login = model.add("cdu").unwrap();
/// model
///     .update_content(login.id(), BlockContent::UseCase(UseCase::titled("Login")))
///     .unwrap();
/// model.move_block(1, 0).unwrap();
///
/// let snapshot = model.snapshot();
/// assert_eq!(snapshot.blocks[1].id(), intro.id());
/// ```
#[derive(Debug, Clone)]
pub struct BlockModel {
    registry: Arc<PluginRegistry>,
    blocks: Vec<Block>,
    /// Incremented on every successful mutation
    version: u64,
}

impl BlockModel {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            registry,
            blocks: Vec::new(),
            version: 0,
        }
    }

    /// Build a model from existing blocks, e.g. an imported block list.
    ///
    /// Blocks whose type is not registered are kept as-is; the assembler skips them.
    /// Registered types must carry content of their plugin's shape.
    pub fn from_blocks(
        registry: Arc<PluginRegistry>,
        blocks: Vec<Block>,
    ) -> Result<Self, EditError> {
        let mut seen = HashSet::new();
        for block in &blocks {
            if !seen.insert(block.id()) {
                return Err(EditError::DuplicateBlockId(block.id().clone()));
            }
            if let Some(plugin) = registry.resolve(block.block_type()) {
                let expected = plugin.default_content().kind();
                let found = block.content().kind();
                if expected != found {
                    return Err(EditError::ContentShapeMismatch {
                        id: block.id().clone(),
                        expected,
                        found,
                    });
                }
            } else {
                log::warn!(
                    "Block '{}' has unregistered type '{}'",
                    block.id(),
                    block.block_type()
                );
            }
        }

        Ok(Self {
            registry,
            blocks,
            version: 0,
        })
    }

    /// Append a new block of `block_type` seeded with its plugin's default content
    pub fn add(&mut self, block_type: &str) -> Result<Block, EditError> {
        let plugin = self
            .registry
            .resolve(block_type)
            .ok_or_else(|| EditError::UnknownBlockType(block_type.to_string()))?;

        let block = Block::new(BlockId::generate(), block_type, plugin.default_content());
        log::debug!("Added {} block '{}'", block_type, block.id());
        self.blocks.push(block.clone());
        self.version += 1;
        Ok(block)
    }

    /// Replace the content of block `id` wholesale. Other blocks are untouched.
    pub fn update_content(&mut self, id: &BlockId, content: BlockContent) -> Result<(), EditError> {
        let index = self.position_of(id)?;
        let block = &mut self.blocks[index];

        let expected = block.content().kind();
        if expected != content.kind() {
            return Err(EditError::ContentShapeMismatch {
                id: id.clone(),
                expected,
                found: content.kind(),
            });
        }

        block.replace_content(content);
        self.version += 1;
        Ok(())
    }

    /// Remove the block at `from` and reinsert it at `to`
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        let len = self.blocks.len();
        for index in [from, to] {
            if index >= len {
                return Err(EditError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        self.version += 1;
        Ok(())
    }

    pub fn move_up(&mut self, index: usize) -> Result<(), EditError> {
        self.check_index(index)?;
        if index == 0 {
            return Err(EditError::AtEdge { index });
        }
        self.move_block(index, index - 1)
    }

    pub fn move_down(&mut self, index: usize) -> Result<(), EditError> {
        self.check_index(index)?;
        if index + 1 == self.blocks.len() {
            return Err(EditError::AtEdge { index });
        }
        self.move_block(index, index + 1)
    }

    /// Move `active` to the position currently held by `over`
    pub fn move_by_id(&mut self, active: &BlockId, over: &BlockId) -> Result<(), EditError> {
        let from = self.position_of(active)?;
        let to = self.position_of(over)?;
        self.move_block(from, to)
    }

    pub fn remove(&mut self, id: &BlockId) -> Result<Block, EditError> {
        let index = self.position_of(id)?;
        let block = self.blocks.remove(index);
        self.version += 1;
        Ok(block)
    }

    /// Apply a command, reporting which blocks it touched
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let changed = match cmd {
            Cmd::Add { block_type } => vec![self.add(&block_type)?.id().clone()],
            Cmd::UpdateContent { id, content } => {
                self.update_content(&id, content)?;
                vec![id]
            }
            Cmd::Move { from, to } => {
                self.move_block(from, to)?;
                self.ids_between(from, to)
            }
            Cmd::MoveUp { index } => {
                self.move_up(index)?;
                self.ids_between(index - 1, index)
            }
            Cmd::MoveDown { index } => {
                self.move_down(index)?;
                self.ids_between(index, index + 1)
            }
            Cmd::MoveById { active, over } => {
                let from = self.position_of(&active)?;
                let to = self.position_of(&over)?;
                self.move_block(from, to)?;
                self.ids_between(from, to)
            }
            Cmd::Remove { id } => vec![self.remove(&id)?.id().clone()],
        };

        Ok(Patch {
            changed,
            version: self.version,
        })
    }

    /// Consistent copy of the current block sequence
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.version, self.blocks.clone())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id() == id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id() == id)
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn position_of(&self, id: &BlockId) -> Result<usize, EditError> {
        self.position(id)
            .ok_or_else(|| EditError::BlockNotFound(id.clone()))
    }

    fn check_index(&self, index: usize) -> Result<(), EditError> {
        let len = self.blocks.len();
        if index >= len {
            return Err(EditError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Ids of the blocks now occupying positions between `a` and `b` inclusive
    fn ids_between(&self, a: usize, b: usize) -> Vec<BlockId> {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        self.blocks[start..=end]
            .iter()
            .map(|block| block.id().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UseCase, UseCaseField};
    use crate::tests::{default_model, ids_of, types_of};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn add_appends_with_default_content() {
        let mut model = default_model();

        let text = model.add("texto").unwrap();
        let cdu = model.add("cdu").unwrap();

        assert_eq!(model.len(), 2);
        assert_eq!(text.content(), &BlockContent::Text(String::new()));
        assert_eq!(cdu.content(), &BlockContent::UseCase(UseCase::default()));
        assert_eq!(ids_of(&model), vec![text.id().clone(), cdu.id().clone()]);
        assert_eq!(model.version(), 2);
    }

    #[test]
    fn add_unknown_type_is_rejected_without_change() {
        let mut model = default_model();
        model.add("texto").unwrap();
        let before = model.snapshot();

        let result = model.add("imagem");

        assert_eq!(result, Err(EditError::UnknownBlockType("imagem".to_string())));
        assert_eq!(model.snapshot(), before);
    }

    #[test]
    fn update_replaces_only_target_content() {
        let mut model = default_model();
        let a = model.add("cdu").unwrap();
        let b = model.add("cdu").unwrap();

        model
            .update_content(a.id(), BlockContent::UseCase(UseCase::titled("Login")))
            .unwrap();

        let updated = model.get(a.id()).unwrap();
        assert_eq!(updated.content().as_use_case().unwrap().title, "Login");
        assert_eq!(updated.block_type(), "cdu");
        assert_eq!(model.get(b.id()).unwrap().content(), b.content());
    }

    #[test]
    fn latest_update_wins() {
        let mut model = default_model();
        let block = model.add("cdu").unwrap();

        for title in ["Entrar", "Login"] {
            let current = model.get(block.id()).unwrap().content();
            let mut use_case = current.as_use_case().unwrap().clone();
            *use_case.field_mut(UseCaseField::Title) = title.to_string();
            model
                .update_content(block.id(), BlockContent::UseCase(use_case))
                .unwrap();
        }

        let content = model.get(block.id()).unwrap().content();
        assert_eq!(content.as_use_case().unwrap().title, "Login");
    }

    #[test]
    fn update_unknown_id_is_reported() {
        let mut model = default_model();
        model.add("texto").unwrap();
        let before = model.snapshot();

        let missing = BlockId::from("missing");
        let result = model.update_content(&missing, BlockContent::Text("x".to_string()));

        assert_eq!(result, Err(EditError::BlockNotFound(missing)));
        assert_eq!(model.snapshot(), before);
    }

    #[test]
    fn update_with_wrong_shape_is_rejected() {
        let mut model = default_model();
        let block = model.add("texto").unwrap();

        let result =
            model.update_content(block.id(), BlockContent::UseCase(UseCase::titled("x")));

        assert!(matches!(result, Err(EditError::ContentShapeMismatch { .. })));
        assert_eq!(model.get(block.id()).unwrap().content(), block.content());
    }

    #[rstest]
    #[case(0, 2, vec!["cdu", "texto", "texto"])]
    #[case(2, 0, vec!["texto", "texto", "cdu"])]
    #[case(1, 1, vec!["texto", "cdu", "texto"])]
    fn move_block_permutes(#[case] from: usize, #[case] to: usize, #[case] expected: Vec<&str>) {
        let mut model = default_model();
        model.add("texto").unwrap();
        model.add("cdu").unwrap();
        model.add("texto").unwrap();
        let mut ids_before = ids_of(&model);

        model.move_block(from, to).unwrap();

        assert_eq!(types_of(&model), expected);
        let mut ids_after = ids_of(&model);
        ids_before.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids_after.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(ids_before, ids_after);
    }

    #[rstest]
    #[case(3, 0)]
    #[case(0, 3)]
    #[case(7, 9)]
    fn move_out_of_range_is_rejected(#[case] from: usize, #[case] to: usize) {
        let mut model = default_model();
        for _ in 0..3 {
            model.add("texto").unwrap();
        }
        let before = model.snapshot();

        let result = model.move_block(from, to);

        assert!(matches!(result, Err(EditError::IndexOutOfRange { len: 3, .. })));
        assert_eq!(model.snapshot(), before);
    }

    #[test]
    fn move_up_and_down_swap_neighbours() {
        let mut model = default_model();
        let a = model.add("texto").unwrap();
        let b = model.add("cdu").unwrap();

        model.move_up(1).unwrap();
        assert_eq!(ids_of(&model), vec![b.id().clone(), a.id().clone()]);

        model.move_down(0).unwrap();
        assert_eq!(ids_of(&model), vec![a.id().clone(), b.id().clone()]);
    }

    #[test]
    fn moves_past_the_edges_are_rejected() {
        let mut model = default_model();
        model.add("texto").unwrap();
        model.add("cdu").unwrap();

        assert_eq!(model.move_up(0), Err(EditError::AtEdge { index: 0 }));
        assert_eq!(model.move_down(1), Err(EditError::AtEdge { index: 1 }));
        assert_eq!(
            model.move_down(2),
            Err(EditError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(model.version(), 2);
    }

    #[test]
    fn move_by_id_takes_position_of_target() {
        let mut model = default_model();
        let a = model.add("texto").unwrap();
        let b = model.add("cdu").unwrap();
        let c = model.add("texto").unwrap();

        model.move_by_id(a.id(), c.id()).unwrap();

        assert_eq!(
            ids_of(&model),
            vec![b.id().clone(), c.id().clone(), a.id().clone()]
        );
    }

    #[test]
    fn remove_returns_block() {
        let mut model = default_model();
        let a = model.add("texto").unwrap();
        let b = model.add("cdu").unwrap();

        let removed = model.remove(a.id()).unwrap();

        assert_eq!(removed, a);
        assert_eq!(ids_of(&model), vec![b.id().clone()]);
        assert!(model.remove(a.id()).is_err());
    }

    #[test]
    fn snapshot_is_isolated_from_later_edits() {
        let mut model = default_model();
        let block = model.add("texto").unwrap();
        let snapshot = model.snapshot();

        model
            .update_content(block.id(), BlockContent::Text("changed".to_string()))
            .unwrap();
        model.add("cdu").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.blocks[0].content(), &BlockContent::Text(String::new()));
        assert!(snapshot.version < model.version());
    }

    #[test]
    fn apply_reports_changed_blocks() {
        let mut model = default_model();
        let add = model.apply(Cmd::add("texto")).unwrap();
        let second = model.apply(Cmd::add("cdu")).unwrap();

        assert_eq!(add.changed.len(), 1);
        assert_eq!(second.version, 2);

        let moved = model.apply(Cmd::MoveUp { index: 1 }).unwrap();
        assert_eq!(moved.changed, ids_of(&model));
        assert_eq!(moved.version, 3);

        let rejected = model.apply(Cmd::Move { from: 0, to: 5 });
        assert!(rejected.is_err());
        assert_eq!(model.version(), 3);
    }

    #[test]
    fn apply_move_by_id_reports_shifted_range() {
        let mut model = default_model();
        let a = model.add("texto").unwrap();
        let b = model.add("texto").unwrap();
        let c = model.add("texto").unwrap();

        let patch = model
            .apply(Cmd::MoveById {
                active: c.id().clone(),
                over: a.id().clone(),
            })
            .unwrap();

        assert_eq!(ids_of(&model), vec![c.id().clone(), a.id().clone(), b.id().clone()]);
        assert_eq!(patch.changed, ids_of(&model));
    }

    #[test]
    fn from_blocks_rejects_duplicate_ids() {
        let registry = Arc::new(PluginRegistry::with_defaults());
        let blocks = vec![
            Block::new("b1".into(), "texto", BlockContent::Text("a".to_string())),
            Block::new("b1".into(), "texto", BlockContent::Text("b".to_string())),
        ];

        let result = BlockModel::from_blocks(registry, blocks);

        assert_eq!(
            result.map(|m| m.len()),
            Err(EditError::DuplicateBlockId("b1".into()))
        );
    }

    #[test]
    fn from_blocks_keeps_unregistered_types() {
        let registry = Arc::new(PluginRegistry::with_defaults());
        let blocks = vec![
            Block::new("b1".into(), "texto", BlockContent::Text("a".to_string())),
            Block::new("b2".into(), "imagem", BlockContent::Text(String::new())),
        ];

        let model = BlockModel::from_blocks(registry, blocks).unwrap();

        assert_eq!(types_of(&model), vec!["texto", "imagem"]);
    }

    #[test]
    fn from_blocks_rejects_wrong_shape_for_registered_type() {
        let registry = Arc::new(PluginRegistry::with_defaults());
        let blocks = vec![Block::new(
            "b1".into(),
            "cdu",
            BlockContent::Text("not a table".to_string()),
        )];

        let result = BlockModel::from_blocks(registry, blocks);

        assert!(matches!(result, Err(EditError::ContentShapeMismatch { .. })));
    }
}
