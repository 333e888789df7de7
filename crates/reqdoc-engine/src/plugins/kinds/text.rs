use crate::export::style::{BODY_SIZE, BODY_SPACING, runs};
use crate::export::{Alignment, DocNode, Paragraph};
use crate::models::BlockContent;
use crate::plugins::BlockPlugin;

/// Free-text block exported as one justified body paragraph.
pub struct TextPlugin;

impl TextPlugin {
    pub const TYPE: &'static str = "texto";
}

impl BlockPlugin for TextPlugin {
    fn block_type(&self) -> &str {
        Self::TYPE
    }

    fn label(&self) -> &str {
        "+ Texto"
    }

    fn default_content(&self) -> BlockContent {
        BlockContent::Text(String::new())
    }

    fn export(&self, content: &BlockContent, _visual_id: Option<&str>) -> Vec<DocNode> {
        let Some(text) = content.as_text() else {
            log::warn!(
                "Text plugin received {} content, nothing exported",
                content.kind()
            );
            return Vec::new();
        };

        let paragraph = Paragraph::new()
            .align(Alignment::Justified)
            .spacing(BODY_SPACING)
            .add_runs(runs(text, BODY_SIZE, false));
        vec![paragraph.into()]
    }
}
