//! Height estimates for blocks that have no measured height
//!
//! Export runs without a live layout, so block heights are approximated from
//! content length and style.

use doc_model::{BlockKind, ContentBlock};
use serde::{Deserialize, Serialize};

/// Tunables for [`HeightEstimator`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeightEstimator {
    /// Characters assumed to fit on one paragraph line
    pub chars_per_line: usize,
    /// Height of one table row
    pub table_row_height: f32,
    /// Height used for blocks without a text heuristic (dividers)
    pub fallback_height: f32,
    /// Lines taken by a level-1 heading
    pub major_heading_lines: f32,
    /// Lines taken by headings of level 2 and deeper
    pub minor_heading_lines: f32,
}

impl Default for HeightEstimator {
    fn default() -> Self {
        Self {
            chars_per_line: 80,
            table_row_height: 30.0,
            fallback_height: 50.0,
            major_heading_lines: 2.5,
            minor_heading_lines: 2.0,
        }
    }
}

impl HeightEstimator {
    /// Estimated block height including its vertical margins
    pub fn estimate(&self, block: &ContentBlock) -> f32 {
        let line = block.style.line_pixels();
        let line = if line.is_finite() && line > 0.0 { line } else { 24.0 };

        let body = match &block.kind {
            BlockKind::PageBreak => return 0.0,
            BlockKind::Heading { level } => {
                if *level <= 1 {
                    line * self.major_heading_lines
                } else {
                    line * self.minor_heading_lines
                }
            }
            BlockKind::Paragraph | BlockKind::Quote => line * self.text_lines(&block.content),
            BlockKind::List { .. } => line * block.list_items().len().max(1) as f32,
            BlockKind::Table { grid } => {
                grid.as_ref().map_or(0.0, |g| g.row_count() as f32 * self.table_row_height)
            }
            BlockKind::Image { height, .. } => *height as f32 + line,
            BlockKind::Divider => self.fallback_height,
        };

        let total = body + block.style.margin_top.max(0.0) + block.style.margin_bottom.max(0.0);
        if total.is_finite() {
            total
        } else {
            self.fallback_height
        }
    }

    fn text_lines(&self, content: &str) -> f32 {
        let per_line = self.chars_per_line.max(1);
        let chars = content.chars().count();
        chars.div_ceil(per_line).max(1) as f32
    }
}

/// Estimate with the default tunables
pub fn estimate_block_height(block: &ContentBlock) -> f32 {
    HeightEstimator::default().estimate(block)
}

/// Measured height when present, otherwise the estimate
pub fn measured_or_estimated(block: &ContentBlock) -> f32 {
    block.height.unwrap_or_else(|| estimate_block_height(block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{BlockStyle, ListType, TableGrid};

    fn bare(block: ContentBlock) -> ContentBlock {
        let style = BlockStyle::default()
            .with_font_size(10.0)
            .with_line_height(2.0)
            .with_margins(0.0, 0.0);
        block.with_style(style)
    }

    #[test]
    fn test_heading_lines() {
        assert_eq!(estimate_block_height(&bare(ContentBlock::heading(1, "T"))), 50.0);
        assert_eq!(estimate_block_height(&bare(ContentBlock::heading(3, "T"))), 40.0);
    }

    #[test]
    fn test_paragraph_scales_with_length() {
        let short = bare(ContentBlock::paragraph("short"));
        let long = bare(ContentBlock::paragraph("x".repeat(161)));
        assert_eq!(estimate_block_height(&short), 20.0);
        assert_eq!(estimate_block_height(&long), 60.0);
    }

    #[test]
    fn test_empty_paragraph_still_takes_a_line() {
        assert_eq!(estimate_block_height(&bare(ContentBlock::paragraph(""))), 20.0);
    }

    #[test]
    fn test_list_counts_items() {
        let list = bare(ContentBlock::list(ListType::Bullet, "a\nb\nc\nd"));
        assert_eq!(estimate_block_height(&list), 80.0);
    }

    #[test]
    fn test_table_rows() {
        let table = bare(ContentBlock::table(TableGrid::new(4, 2)));
        assert_eq!(estimate_block_height(&table), 120.0);
    }

    #[test]
    fn test_margins_are_added() {
        let block = ContentBlock::paragraph("x")
            .with_style(BlockStyle::default().with_font_size(10.0).with_line_height(1.0));
        assert_eq!(estimate_block_height(&block), 10.0 + 32.0);
    }

    #[test]
    fn test_page_break_is_free() {
        assert_eq!(estimate_block_height(&ContentBlock::page_break()), 0.0);
    }

    #[test]
    fn test_measured_height_wins() {
        let block = ContentBlock::paragraph("x").with_height(321.0);
        assert_eq!(measured_or_estimated(&block), 321.0);
    }
}
