//! Document root and document-level settings

use crate::{BlockId, ContentBlock, DocModelError, DocumentId, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Supported paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
}

impl PageSize {
    /// Portrait dimensions in points (width, height)
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.276, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page and typography settings of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentSettings {
    /// Uniform page margin in points
    pub page_margins: f32,
    pub page_size: PageSize,
    pub font_family: String,
    pub page_orientation: Orientation,
    pub line_spacing: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            page_margins: 72.0,
            page_size: PageSize::A4,
            font_family: "Inter".to_string(),
            page_orientation: Orientation::Portrait,
            line_spacing: 1.5,
            header_text: None,
            footer_text: None,
        }
    }
}

impl DocumentSettings {
    /// Page dimensions in points with orientation applied
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.page_size.dimensions();
        match self.page_orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// A block-based document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    /// Name of the originating template, `"blank"` for new documents
    pub template: String,
    /// Blocks in reading order
    pub blocks: Vec<ContentBlock>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub settings: DocumentSettings,
}

pub const UNTITLED_DOCUMENT: &str = "Untitled Document";
pub const BLANK_TEMPLATE: &str = "blank";

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty untitled document with default settings
    pub fn new() -> Self {
        Self {
            id: DocumentId::new(),
            title: UNTITLED_DOCUMENT.to_string(),
            template: BLANK_TEMPLATE.to_string(),
            blocks: Vec::new(),
            last_modified: Utc::now(),
            settings: DocumentSettings::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<ContentBlock>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn with_settings(mut self, settings: DocumentSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Stamp the modification time
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    pub fn block(&self, id: BlockId) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut ContentBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn block_index(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn contains_block(&self, id: BlockId) -> bool {
        self.block_index(id).is_some()
    }

    /// Check that every block id is unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if !seen.insert(block.id) {
                return Err(DocModelError::DuplicateBlockId(block.id));
            }
        }
        Ok(())
    }

    /// Give duplicate block ids a fresh id, keeping the first occurrence.
    ///
    /// Returns the number of blocks that were re-keyed.
    pub fn dedupe_block_ids(&mut self) -> usize {
        let mut seen = HashSet::with_capacity(self.blocks.len());
        let mut rekeyed = 0;
        for block in &mut self.blocks {
            while !seen.insert(block.id) {
                block.id = BlockId::new();
                rekeyed += 1;
            }
        }
        rekeyed
    }

    /// Copies of all blocks under fresh ids
    pub fn rekeyed_blocks(&self) -> Vec<ContentBlock> {
        self.blocks.iter().map(ContentBlock::with_fresh_id).collect()
    }

    /// Text of the first heading, if any
    pub fn first_heading(&self) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.heading_level().is_some())
            .map(|b| b.content.as_str())
    }
}
