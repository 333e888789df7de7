use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use reqdoc_config::Config;
use reqdoc_engine::{
    Assembler, BlockContent, BlockId, BlockModel, Cmd, EditError, PluginRegistry, UseCase,
    UseCaseField, io,
};

use crate::export;

/// The default document a fresh session starts with
pub fn seed_model() -> Result<BlockModel, EditError> {
    let mut model = BlockModel::new(Arc::new(PluginRegistry::with_defaults()));

    let intro = model.add("texto")?;
    model.update_content(
        intro.id(),
        BlockContent::Text("Introdução ao Sistema".to_string()),
    )?;

    let login = model.add("cdu")?;
    model.update_content(login.id(), BlockContent::UseCase(UseCase::titled("Login")))?;

    Ok(model)
}

/// Whether the event loop should keep going
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A block being edited. Changes stay in `draft` until committed.
pub struct Draft {
    pub id: BlockId,
    pub content: BlockContent,
    /// Index into `UseCaseField::ALL`; unused for text
    pub field: usize,
}

impl Draft {
    pub fn field(&self) -> Option<UseCaseField> {
        match self.content {
            BlockContent::UseCase(_) => Some(UseCaseField::ALL[self.field]),
            BlockContent::Text(_) | BlockContent::Opaque(_) => None,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.content {
            BlockContent::Text(text) => Some(text),
            BlockContent::UseCase(use_case) => {
                Some(use_case.field_mut(UseCaseField::ALL[self.field]))
            }
            BlockContent::Opaque(_) => None,
        }
    }

    fn cycle(&mut self, forward: bool) {
        let count = UseCaseField::ALL.len();
        self.field = if forward {
            (self.field + 1) % count
        } else {
            (self.field + count - 1) % count
        };
    }
}

pub enum Mode {
    Browse,
    Edit(Draft),
}

pub struct App {
    pub model: BlockModel,
    pub config: Config,
    pub output: PathBuf,
    pub list_state: ListState,
    pub mode: Mode,
    pub status: String,
}

impl App {
    pub fn new(model: BlockModel, config: Config, output: PathBuf) -> Self {
        let mut list_state = ListState::default();
        if !model.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            model,
            config,
            output,
            list_state,
            mode: Mode::Browse,
            status: String::new(),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state
            .selected()
            .filter(|&index| index < self.model.len())
    }

    /// Visual ids the next export will assign, one per block
    pub fn visual_ids(&self) -> Vec<Option<String>> {
        let registry = self.model.registry().clone();
        Assembler::new(&registry).visual_ids(&self.model.snapshot())
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if matches!(self.mode, Mode::Edit(_)) {
            self.on_edit_key(key);
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Char('K') => self.move_selected(true),
            KeyCode::Char('J') => self.move_selected(false),
            KeyCode::Char('d') => self.remove_selected(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('s') => self.save_blocks(),
            KeyCode::Enter => self.begin_edit(),
            KeyCode::Char(c @ '1'..='9') => {
                let slot = c as usize - '1' as usize;
                self.add_block(slot);
            }
            _ => {}
        }
        Flow::Continue
    }

    fn on_edit_key(&mut self, key: KeyEvent) {
        let Mode::Edit(draft) = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.commit_edit(),
            KeyCode::Tab => draft.cycle(true),
            KeyCode::BackTab => draft.cycle(false),
            KeyCode::Enter => {
                if let Some(text) = draft.text_mut() {
                    text.push('\n');
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = draft.text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(text) = draft.text_mut() {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    fn select_next(&mut self) {
        if self.model.is_empty() {
            return;
        }
        let i = match self.selected() {
            Some(i) => (i + 1) % self.model.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.model.is_empty() {
            return;
        }
        let i = match self.selected() {
            Some(0) | None => self.model.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn move_selected(&mut self, up: bool) {
        let Some(index) = self.selected() else {
            return;
        };
        let (cmd, new_index) = if up {
            (Cmd::MoveUp { index }, index.saturating_sub(1))
        } else {
            (Cmd::MoveDown { index }, index + 1)
        };
        match self.model.apply(cmd) {
            Ok(_) => {
                self.list_state.select(Some(new_index));
                self.status = format!("Moved block to position {}", new_index + 1);
            }
            Err(e) => self.report(e),
        }
    }

    fn add_block(&mut self, slot: usize) {
        let Some(block_type) = self
            .model
            .registry()
            .list()
            .nth(slot)
            .map(|plugin| plugin.block_type().to_string())
        else {
            self.status = format!("No block kind bound to {}", slot + 1);
            return;
        };

        match self.model.apply(Cmd::add(&block_type)) {
            Ok(patch) => {
                self.list_state.select(Some(self.model.len() - 1));
                let ids: Vec<String> = patch.changed.iter().map(ToString::to_string).collect();
                self.status = format!("Added {} block {}", block_type, ids.join(", "));
            }
            Err(e) => self.report(e),
        }
    }

    fn remove_selected(&mut self) {
        let Some(index) = self.selected() else {
            return;
        };
        let block = self.model.blocks()[index].clone();
        match self.model.apply(Cmd::Remove {
            id: block.id().clone(),
        }) {
            Ok(_) => {
                let selected = if self.model.is_empty() {
                    None
                } else {
                    Some(index.min(self.model.len() - 1))
                };
                self.list_state.select(selected);
                self.status = format!("Removed {} block {}", block.block_type(), block.id());
            }
            Err(e) => self.report(e),
        }
    }

    fn begin_edit(&mut self) {
        let Some(index) = self.selected() else {
            return;
        };
        let block = &self.model.blocks()[index];
        if !self.model.registry().contains(block.block_type())
            || matches!(block.content(), BlockContent::Opaque(_))
        {
            self.status = format!("'{}' block is read-only", block.block_type());
            return;
        }
        self.mode = Mode::Edit(Draft {
            id: block.id().clone(),
            content: block.content().clone(),
            field: 0,
        });
        self.status = "Editing: Esc to save, Tab to switch field".to_string();
    }

    fn commit_edit(&mut self) {
        let Mode::Edit(draft) = std::mem::replace(&mut self.mode, Mode::Browse) else {
            return;
        };
        match self.model.apply(Cmd::update(draft.id.clone(), draft.content)) {
            Ok(patch) => self.status = format!("Saved {} (version {})", draft.id, patch.version),
            Err(e) => self.report(e),
        }
    }

    fn export(&mut self) {
        match export::export_to(&self.model, &self.config.title, &self.output) {
            Ok(size) => {
                self.status = format!("Exported {} bytes to {}", size, self.output.display());
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status = format!("Export failed: {e:#}");
            }
        }
    }

    /// Block list file written next to the exported document
    pub fn blocks_path(&self) -> PathBuf {
        self.output.with_extension("json")
    }

    fn save_blocks(&mut self) {
        let path = self.blocks_path();
        match io::write_blocks(&path, self.model.blocks()) {
            Ok(()) => {
                self.status = format!("Saved {} blocks to {}", self.model.len(), path.display());
            }
            Err(e) => {
                log::error!("Saving blocks failed: {e}");
                self.status = format!("Saving blocks failed: {e}");
            }
        }
    }

    fn report(&mut self, error: EditError) {
        log::warn!("Edit rejected: {error}");
        self.status = error.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(
            seed_model().unwrap(),
            Config::default(),
            PathBuf::from("Requisitos.docx"),
        )
    }

    fn types(app: &App) -> Vec<&str> {
        app.model.blocks().iter().map(|b| b.block_type()).collect()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_seed_document() {
        let app = app();

        assert_eq!(types(&app), vec!["texto", "cdu"]);
        assert_eq!(app.visual_ids(), vec![None, Some("CDU01".to_string())]);
        assert_eq!(app.selected(), Some(0));
    }

    #[test]
    fn test_quit() {
        let mut app = app();

        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Flow::Quit);
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app();

        app.on_key(key(KeyCode::Up));
        assert_eq!(app.selected(), Some(1));
        app.on_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected(), Some(0));
    }

    #[test]
    fn test_reorder_follows_selection() {
        let mut app = app();

        app.on_key(key(KeyCode::Char('J')));

        assert_eq!(types(&app), vec!["cdu", "texto"]);
        assert_eq!(app.selected(), Some(1));
    }

    #[test]
    fn test_reorder_at_edge_reports_error() {
        let mut app = app();

        app.on_key(key(KeyCode::Char('K')));

        assert_eq!(types(&app), vec!["texto", "cdu"]);
        assert!(!app.status.is_empty());
    }

    #[test]
    fn test_add_by_registry_slot() {
        let mut app = app();

        app.on_key(key(KeyCode::Char('2')));
        app.on_key(key(KeyCode::Char('1')));
        app.on_key(key(KeyCode::Char('9')));

        assert_eq!(types(&app), vec!["texto", "cdu", "cdu", "texto"]);
        assert_eq!(app.selected(), Some(3));
        assert_eq!(app.status, "No block kind bound to 9");
    }

    #[test]
    fn test_delete_keeps_selection_in_range() {
        let mut app = app();
        app.on_key(key(KeyCode::Down));

        app.on_key(key(KeyCode::Char('d')));
        assert_eq!(types(&app), vec!["texto"]);
        assert_eq!(app.selected(), Some(0));

        app.on_key(key(KeyCode::Char('d')));
        assert!(app.model.is_empty());
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn test_edit_text_block() {
        let mut app = app();

        app.on_key(key(KeyCode::Enter));
        type_text(&mut app, "!");
        app.on_key(key(KeyCode::Enter));
        type_text(&mut app, "v2");
        app.on_key(key(KeyCode::Esc));

        assert!(matches!(app.mode, Mode::Browse));
        assert_eq!(
            app.model.blocks()[0].content(),
            &BlockContent::Text("Introdução ao Sistema!\nv2".to_string())
        );
    }

    #[test]
    fn test_edit_use_case_fields() {
        let mut app = app();
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Enter));

        // Title is the first field; Tab moves to module
        app.on_key(key(KeyCode::Backspace));
        app.on_key(key(KeyCode::Tab));
        type_text(&mut app, "Acesso");
        app.on_key(key(KeyCode::BackTab));
        app.on_key(key(KeyCode::BackTab));
        type_text(&mut app, "x");
        app.on_key(key(KeyCode::Esc));

        let use_case = app.model.blocks()[1].content().as_use_case().unwrap();
        assert_eq!(use_case.title, "Logi");
        assert_eq!(use_case.module, "Acesso");
        assert_eq!(use_case.postconditions, "x");
    }

    #[test]
    fn test_draft_is_not_visible_until_committed() {
        let mut app = app();

        app.on_key(key(KeyCode::Enter));
        type_text(&mut app, "draft");

        assert_eq!(
            app.model.blocks()[0].content(),
            &BlockContent::Text("Introdução ao Sistema".to_string())
        );
    }

    #[test]
    fn test_export_key_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            seed_model().unwrap(),
            Config::default(),
            dir.path().join("Requisitos.docx"),
        );

        app.on_key(key(KeyCode::Char('e')));

        assert!(app.output.exists());
        assert!(app.status.starts_with("Exported"));
    }

    #[test]
    fn test_save_key_writes_block_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            seed_model().unwrap(),
            Config::default(),
            dir.path().join("Requisitos.docx"),
        );

        app.on_key(key(KeyCode::Char('s')));

        let blocks = io::read_blocks(&app.blocks_path()).unwrap();
        assert_eq!(blocks, app.model.blocks());
        assert!(app.status.starts_with("Saved 2 blocks"));
    }

    #[test]
    fn test_opaque_block_is_read_only() {
        let registry = Arc::new(PluginRegistry::with_defaults());
        let blocks = vec![reqdoc_engine::Block::new(
            "img".into(),
            "imagem",
            BlockContent::Opaque(serde_json::json!({ "legenda": "fig" })),
        )];
        let model = BlockModel::from_blocks(registry, blocks).unwrap();
        let mut app = App::new(model, Config::default(), PathBuf::from("Requisitos.docx"));

        app.on_key(key(KeyCode::Enter));

        assert!(matches!(app.mode, Mode::Browse));
        assert_eq!(app.status, "'imagem' block is read-only");
    }
}
