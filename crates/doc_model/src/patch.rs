//! Partial updates applied by the editing engine

use crate::{BlockKind, BlockStylePatch, ContentBlock, Document, DocumentSettings};
use serde::{Deserialize, Serialize};

/// Shallow update of a single block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub content: Option<String>,
    pub style: Option<BlockStylePatch>,
    /// Replaces the block's type and metadata wholesale
    pub kind: Option<BlockKind>,
}

impl BlockPatch {
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn style(style: BlockStylePatch) -> Self {
        Self {
            style: Some(style),
            ..Default::default()
        }
    }

    pub fn kind(kind: BlockKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.kind.is_none()
            && self.style.as_ref().map_or(true, BlockStylePatch::is_empty)
    }

    pub fn apply(&self, block: &mut ContentBlock) {
        if let Some(content) = &self.content {
            block.content = content.clone();
        }
        if let Some(style) = &self.style {
            style.apply(&mut block.style);
        }
        if let Some(kind) = &self.kind {
            block.kind = kind.clone();
        }
    }
}

/// Shallow update of document-level fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub template: Option<String>,
    pub settings: Option<DocumentSettings>,
    pub blocks: Option<Vec<ContentBlock>>,
}

impl DocumentPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn settings(settings: DocumentSettings) -> Self {
        Self {
            settings: Some(settings),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply to a document; duplicate ids in replacement blocks are re-keyed.
    pub fn apply(&self, doc: &mut Document) {
        if let Some(title) = &self.title {
            doc.title = title.clone();
        }
        if let Some(template) = &self.template {
            doc.template = template.clone();
        }
        if let Some(settings) = &self.settings {
            doc.settings = settings.clone();
        }
        if let Some(blocks) = &self.blocks {
            doc.blocks = blocks.clone();
            doc.dedupe_block_ids();
        }
    }
}
