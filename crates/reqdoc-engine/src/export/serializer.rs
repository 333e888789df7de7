use crate::export::DocNode;

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("Failed to pack document: {0}")]
    Pack(String),
    #[error("Document has no sections")]
    EmptyDocument,
}

/// A run of nodes laid out with the same page settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub children: Vec<DocNode>,
}

/// Document-level wrapper handed to a serializer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTree {
    pub sections: Vec<Section>,
}

impl DocumentTree {
    pub fn single(children: Vec<DocNode>) -> Self {
        Self {
            sections: vec![Section { children }],
        }
    }

    /// All nodes in document order
    pub fn nodes(&self) -> impl Iterator<Item = &DocNode> {
        self.sections.iter().flat_map(|section| section.children.iter())
    }

    /// Serialize without consuming the tree, so a failed attempt can be retried
    pub fn serialize_with(
        &self,
        serializer: &dyn DocumentSerializer,
    ) -> Result<Vec<u8>, SerializeError> {
        serializer.serialize(self).inspect_err(|e| {
            log::warn!("Document serialization failed: {e}");
        })
    }
}

/// Packs an assembled document into a binary artifact.
///
/// Implementations must keep node order and must not alter node formatting.
pub trait DocumentSerializer {
    fn serialize(&self, document: &DocumentTree) -> Result<Vec<u8>, SerializeError>;
}
