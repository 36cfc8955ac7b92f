//! Content blocks and their type-specific metadata
//!
//! A block's metadata is modelled as a sum type keyed by the block type, so a
//! heading carries only a level, a table only its grid, and so on. On the
//! wire the block keeps the flat `{ id, type, content, style, metadata }`
//! shape; missing or mismatched metadata is repaired with the type default
//! while deserializing instead of being rejected.

use crate::{BlockId, BlockStyle, FontWeight, TableGrid};
use serde::{Deserialize, Serialize};

pub const MIN_HEADING_LEVEL: u8 = 1;
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Default size of an image placeholder, in pixels
pub const DEFAULT_IMAGE_WIDTH: u32 = 300;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 200;

/// Closed set of block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Heading,
    Paragraph,
    List,
    Image,
    Divider,
    Table,
    Quote,
    PageBreak,
}

impl BlockType {
    pub const ALL: [BlockType; 8] = [
        BlockType::Heading,
        BlockType::Paragraph,
        BlockType::List,
        BlockType::Image,
        BlockType::Divider,
        BlockType::Table,
        BlockType::Quote,
        BlockType::PageBreak,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Paragraph => "paragraph",
            BlockType::List => "list",
            BlockType::Image => "image",
            BlockType::Divider => "divider",
            BlockType::Table => "table",
            BlockType::Quote => "quote",
            BlockType::PageBreak => "pagebreak",
        }
    }

    /// Metadata a block of this type starts with
    pub fn default_kind(&self) -> BlockKind {
        match self {
            BlockType::Heading => BlockKind::Heading { level: 1 },
            BlockType::Paragraph => BlockKind::Paragraph,
            BlockType::List => BlockKind::List {
                list_type: ListType::Bullet,
            },
            BlockType::Image => BlockKind::Image {
                url: String::new(),
                width: DEFAULT_IMAGE_WIDTH,
                height: DEFAULT_IMAGE_HEIGHT,
            },
            BlockType::Divider => BlockKind::Divider,
            BlockType::Table => BlockKind::Table { grid: None },
            BlockType::Quote => BlockKind::Quote,
            BlockType::PageBreak => BlockKind::PageBreak,
        }
    }

    /// Placeholder text a new block of this type is created with
    pub fn default_content(&self) -> &'static str {
        match self {
            BlockType::Heading => "New Heading",
            BlockType::Paragraph => "Start typing your content here...",
            BlockType::List => "First item\nSecond item\nThird item",
            BlockType::Quote => "This is a quote block. Add your inspirational text here.",
            BlockType::Table => "Table",
            BlockType::Image => "Image placeholder",
            BlockType::Divider | BlockType::PageBreak => "",
        }
    }

    /// Style a new block of this type is created with
    pub fn default_style(&self) -> BlockStyle {
        let (size, weight) = match self {
            BlockType::Heading => (24.0, FontWeight::Bold),
            BlockType::Quote => (18.0, FontWeight::Semibold),
            BlockType::Table => (14.0, FontWeight::Normal),
            _ => (16.0, FontWeight::Normal),
        };
        BlockStyle::default().with_font_size(size).with_weight(weight)
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered vs. unordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Bullet,
    Numbered,
}

/// Type-specific metadata of a block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading { level: u8 },
    Paragraph,
    List { list_type: ListType },
    Image { url: String, width: u32, height: u32 },
    Divider,
    /// `grid` is `None` until the table is first rendered by the editor.
    Table { grid: Option<TableGrid> },
    Quote,
    PageBreak,
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Heading { .. } => BlockType::Heading,
            BlockKind::Paragraph => BlockType::Paragraph,
            BlockKind::List { .. } => BlockType::List,
            BlockKind::Image { .. } => BlockType::Image,
            BlockKind::Divider => BlockType::Divider,
            BlockKind::Table { .. } => BlockType::Table,
            BlockKind::Quote => BlockType::Quote,
            BlockKind::PageBreak => BlockType::PageBreak,
        }
    }

    pub fn heading(level: i64) -> Self {
        BlockKind::Heading {
            level: clamp_heading_level(level),
        }
    }
}

/// Clamp an arbitrary heading level into 1..=6
pub fn clamp_heading_level(level: i64) -> u8 {
    level.clamp(MIN_HEADING_LEVEL as i64, MAX_HEADING_LEVEL as i64) as u8
}

/// One atomic unit of document content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct ContentBlock {
    pub id: BlockId,
    pub kind: BlockKind,
    pub content: String,
    pub style: BlockStyle,
    /// Last measured rendered height in pixels, written back by the editor.
    pub height: Option<f32>,
}

impl ContentBlock {
    /// Create a block with the editor's defaults for its type
    pub fn new(block_type: BlockType) -> Self {
        Self {
            id: BlockId::new(),
            kind: block_type.default_kind(),
            content: block_type.default_content().to_string(),
            style: block_type.default_style(),
            height: None,
        }
    }

    pub fn heading(level: i64, content: impl Into<String>) -> Self {
        Self::new(BlockType::Heading)
            .with_kind(BlockKind::heading(level))
            .with_content(content)
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::new(BlockType::Paragraph).with_content(content)
    }

    pub fn list(list_type: ListType, content: impl Into<String>) -> Self {
        Self::new(BlockType::List)
            .with_kind(BlockKind::List { list_type })
            .with_content(content)
    }

    pub fn quote(content: impl Into<String>) -> Self {
        Self::new(BlockType::Quote).with_content(content)
    }

    pub fn divider() -> Self {
        Self::new(BlockType::Divider)
    }

    pub fn page_break() -> Self {
        Self::new(BlockType::PageBreak)
    }

    pub fn image(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self::new(BlockType::Image)
            .with_kind(BlockKind::Image {
                url: url.into(),
                width: DEFAULT_IMAGE_WIDTH,
                height: DEFAULT_IMAGE_HEIGHT,
            })
            .with_content(caption)
    }

    pub fn table(grid: TableGrid) -> Self {
        Self::new(BlockType::Table).with_kind(BlockKind::Table { grid: Some(grid) })
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_style(mut self, style: BlockStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_kind(mut self, kind: BlockKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Heading level clamped to 1..=6, or `None` for non-headings
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading { level } => Some(clamp_heading_level(level as i64)),
            _ => None,
        }
    }

    pub fn list_type(&self) -> Option<ListType> {
        match self.kind {
            BlockKind::List { list_type } => Some(list_type),
            _ => None,
        }
    }

    /// Non-blank lines of a list block's content, one per item
    pub fn list_items(&self) -> Vec<&str> {
        self.content
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect()
    }

    pub fn table_grid(&self) -> Option<&TableGrid> {
        match &self.kind {
            BlockKind::Table { grid } => grid.as_ref(),
            _ => None,
        }
    }

    pub fn table_grid_mut(&mut self) -> Option<&mut TableGrid> {
        match &mut self.kind {
            BlockKind::Table { grid } => grid.as_mut(),
            _ => None,
        }
    }

    /// Seed an uninitialized table with the default 2x2 grid.
    ///
    /// Returns `true` if the grid was seeded.
    pub fn ensure_table_initialized(&mut self) -> bool {
        match &mut self.kind {
            BlockKind::Table { grid } if grid.is_none() => {
                *grid = Some(TableGrid::seed());
                true
            }
            _ => false,
        }
    }

    /// Measured height, or `default` when the block was never measured
    pub fn height_or(&self, default: f32) -> f32 {
        self.height.unwrap_or(default)
    }

    /// Copy of this block under a freshly generated id
    pub fn with_fresh_id(&self) -> Self {
        Self {
            id: BlockId::new(),
            ..self.clone()
        }
    }

    /// Equality ignoring `id` and the measured height
    pub fn same_content(&self, other: &Self) -> bool {
        self.kind == other.kind && self.content == other.content && self.style == other.style
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    list_type: Option<ListType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_cols: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_data: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: BlockId,
    #[serde(rename = "type")]
    block_type: BlockType,
    #[serde(default)]
    content: String,
    #[serde(default)]
    style: BlockStyle,
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f32>,
}

fn pixel_dimension(value: Option<f64>, default: u32) -> u32 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.round() as u32,
        _ => default,
    }
}

impl From<RawBlock> for ContentBlock {
    fn from(raw: RawBlock) -> Self {
        let meta = raw.metadata;
        let kind = match raw.block_type {
            BlockType::Heading => BlockKind::heading(meta.level.unwrap_or(1)),
            BlockType::Paragraph => BlockKind::Paragraph,
            BlockType::List => BlockKind::List {
                list_type: meta.list_type.unwrap_or_default(),
            },
            BlockType::Image => BlockKind::Image {
                url: meta.image_url.unwrap_or_default(),
                width: pixel_dimension(meta.image_width, DEFAULT_IMAGE_WIDTH),
                height: pixel_dimension(meta.image_height, DEFAULT_IMAGE_HEIGHT),
            },
            BlockType::Divider => BlockKind::Divider,
            // Row/column counts are derived from the grid itself
            BlockType::Table => BlockKind::Table {
                grid: meta.table_data.map(TableGrid::from_rows),
            },
            BlockType::Quote => BlockKind::Quote,
            BlockType::PageBreak => BlockKind::PageBreak,
        };

        Self {
            id: raw.id,
            kind,
            content: raw.content,
            style: raw.style,
            height: raw.height.filter(|h| h.is_finite() && *h >= 0.0),
        }
    }
}

impl From<ContentBlock> for RawBlock {
    fn from(block: ContentBlock) -> Self {
        let block_type = block.block_type();
        let mut metadata = RawMetadata::default();
        match block.kind {
            BlockKind::Heading { level } => metadata.level = Some(level as i64),
            BlockKind::List { list_type } => metadata.list_type = Some(list_type),
            BlockKind::Image { url, width, height } => {
                metadata.image_url = Some(url);
                metadata.image_width = Some(width as f64);
                metadata.image_height = Some(height as f64);
            }
            BlockKind::Table { grid: Some(grid) } => {
                metadata.table_rows = Some(grid.row_count());
                metadata.table_cols = Some(grid.col_count());
                metadata.table_data = Some(grid.into());
            }
            BlockKind::Table { grid: None }
            | BlockKind::Paragraph
            | BlockKind::Divider
            | BlockKind::Quote
            | BlockKind::PageBreak => {}
        }

        Self {
            id: block.id,
            block_type,
            content: block.content,
            style: block.style,
            metadata,
            height: block.height,
        }
    }
}
