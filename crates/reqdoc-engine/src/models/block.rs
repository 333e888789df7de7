use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::UseCase;

/// Opaque identifier of a block, unique within a `BlockModel` for its lifetime
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(format!("blk-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Type-dependent payload of a block.
///
/// Serialized untagged so a block list reads the same as the editor's JSON dump:
/// text content is a bare string, a use case is an object of named fields.
/// Anything else is kept verbatim as `Opaque` so blocks of types without a plugin
/// survive a read/write cycle unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockContent {
    Text(String),
    UseCase(UseCase),
    // must stay last, it matches any JSON value
    Opaque(serde_json::Value),
}

/// Shape of a `BlockContent`, used to check content against a plugin's default
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    UseCase,
    Opaque,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Text => f.write_str("text"),
            ContentKind::UseCase => f.write_str("use case"),
            ContentKind::Opaque => f.write_str("opaque"),
        }
    }
}

impl BlockContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            BlockContent::Text(_) => ContentKind::Text,
            BlockContent::UseCase(_) => ContentKind::UseCase,
            BlockContent::Opaque(_) => ContentKind::Opaque,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            BlockContent::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_use_case(&self) -> Option<&UseCase> {
        match self {
            BlockContent::UseCase(use_case) => Some(use_case),
            _ => None,
        }
    }

    /// Short single-line summary for list views
    pub fn summary(&self) -> String {
        let text = match self {
            BlockContent::Text(text) => text.as_str(),
            BlockContent::UseCase(use_case) => use_case.title.as_str(),
            BlockContent::Opaque(value) => return value.to_string(),
        };
        text.lines().next().unwrap_or("").trim().to_string()
    }
}

/// One unit of document content.
///
/// `id` and `block_type` are fixed at creation; `content` only changes through the
/// owning `BlockModel`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: String,
    content: BlockContent,
}

impl Block {
    pub fn new(id: BlockId, block_type: impl Into<String>, content: BlockContent) -> Self {
        Self {
            id,
            block_type: block_type.into(),
            content,
        }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    pub(crate) fn replace_content(&mut self, content: BlockContent) {
        self.content = content;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generated_ids_are_unique() {
        let a = BlockId::generate();
        let b = BlockId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("blk-"));
    }

    #[test]
    fn text_block_reads_editor_json() {
        let json = r#"{ "id": "b1", "type": "texto", "content": "Introdução ao Sistema" }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.id(), &BlockId::from("b1"));
        assert_eq!(block.block_type(), "texto");
        assert_eq!(
            block.content(),
            &BlockContent::Text("Introdução ao Sistema".to_string())
        );
    }

    #[test]
    fn use_case_block_reads_editor_json() {
        let json = r#"{
            "id": "b2",
            "type": "cdu",
            "content": { "titulo": "Login", "modulo": "Acesso", "fluxoPrincipal": "1. Abrir" }
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        let use_case = block.content().as_use_case().unwrap();
        assert_eq!(use_case.title, "Login");
        assert_eq!(use_case.module, "Acesso");
        assert_eq!(use_case.main_flow, "1. Abrir");
        assert_eq!(use_case.postconditions, "");
    }

    #[test]
    fn unknown_object_content_is_kept_verbatim() {
        let json = r#"{ "id": "img", "type": "imagem", "content": { "base64": "AAA", "legenda": "fig" } }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.content().kind(), ContentKind::Opaque);
        assert_eq!(
            serde_json::to_value(&block).unwrap()["content"],
            serde_json::json!({ "base64": "AAA", "legenda": "fig" })
        );
    }

    #[test]
    fn null_content_is_opaque() {
        let json = r#"{ "id": "img", "type": "imagem", "content": null }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(
            block.content(),
            &BlockContent::Opaque(serde_json::Value::Null)
        );
    }

    #[test]
    fn use_case_tolerates_null_fields() {
        let json = r#"{ "id": "b2", "type": "cdu", "content": { "titulo": null, "atores": "User" } }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        let use_case = block.content().as_use_case().unwrap();
        assert_eq!(use_case.title, "");
        assert_eq!(use_case.actors, "User");
    }

    #[test]
    fn summary_takes_first_line() {
        let content = BlockContent::Text("  First line \nsecond".to_string());
        assert_eq!(content.summary(), "First line");
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(BlockContent::Text(String::new()).kind(), ContentKind::Text);
        assert_eq!(
            BlockContent::UseCase(UseCase::default()).kind(),
            ContentKind::UseCase
        );
        assert_eq!(
            BlockContent::Opaque(serde_json::Value::Null).kind(),
            ContentKind::Opaque
        );
    }
}
