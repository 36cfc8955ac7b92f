//! Greedy first-fit pagination
//!
//! Blocks are taken in order and appended to the current page while their
//! accumulated height stays within the budget. A block that does not fit
//! starts a new page; blocks are never split or reordered. A block taller
//! than the whole budget gets a page of its own.

use doc_model::{BlockType, ContentBlock};
use tracing::trace;

/// Height assumed for blocks that were never measured
pub const DEFAULT_BLOCK_HEIGHT: f32 = 100.0;

/// Page height used for on-screen page framing
pub const EDITOR_PAGE_HEIGHT: f32 = 800.0;

/// Page height used by the print preview (A4 at 96 dpi)
pub const PRINT_PAGE_HEIGHT: f32 = 1122.0;

/// One page worth of blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub blocks: Vec<&'a ContentBlock>,
    /// Sum of the block heights used to pack this page
    pub height: f32,
}

impl<'a> Page<'a> {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            height: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn push(&mut self, block: &'a ContentBlock, height: f32) {
        self.blocks.push(block);
        self.height += height;
    }
}

/// Paginate using measured heights, 100 px for unmeasured blocks
pub fn paginate(blocks: &[ContentBlock], budget: f32) -> Vec<Page<'_>> {
    paginate_by(blocks, budget, |b| b.height_or(DEFAULT_BLOCK_HEIGHT))
}

/// Paginate with a caller-supplied height function.
///
/// Negative or non-finite heights count as zero.
pub fn paginate_by<F>(blocks: &[ContentBlock], budget: f32, height_of: F) -> Vec<Page<'_>>
where
    F: Fn(&ContentBlock) -> f32,
{
    pack(blocks, budget, height_of, false)
}

/// Like [`paginate_by`], but a page break block also closes its page.
///
/// The break block stays on the page it ends.
pub fn paginate_with_breaks<F>(blocks: &[ContentBlock], budget: f32, height_of: F) -> Vec<Page<'_>>
where
    F: Fn(&ContentBlock) -> f32,
{
    pack(blocks, budget, height_of, true)
}

/// Whether a block of `height` still fits on a page already filled to `used`
pub fn can_fit(used: f32, height: f32, budget: f32) -> bool {
    used + sanitize(height) <= budget
}

/// Whether a forced break belongs before `blocks[index]` when level-1
/// headings start new pages
pub fn needs_forced_break(blocks: &[ContentBlock], index: usize) -> bool {
    index > 0
        && index < blocks.len()
        && blocks[index].heading_level() == Some(1)
        && blocks[index - 1].block_type() != BlockType::PageBreak
}

/// Copy of `blocks` with a page break inserted wherever [`needs_forced_break`] holds
pub fn with_forced_breaks(blocks: &[ContentBlock]) -> Vec<ContentBlock> {
    let mut out = Vec::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        if needs_forced_break(blocks, index) {
            out.push(ContentBlock::page_break());
        }
        out.push(block.clone());
    }
    out
}

fn sanitize(height: f32) -> f32 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}

fn pack<F>(blocks: &[ContentBlock], budget: f32, height_of: F, honor_breaks: bool) -> Vec<Page<'_>>
where
    F: Fn(&ContentBlock) -> f32,
{
    let mut pages = Vec::new();
    let mut current = Page::new();

    for block in blocks {
        let height = sanitize(height_of(block));
        if !current.is_empty() && !can_fit(current.height, height, budget) {
            pages.push(std::mem::replace(&mut current, Page::new()));
        }
        current.push(block, height);

        if honor_breaks && block.block_type() == BlockType::PageBreak {
            pages.push(std::mem::replace(&mut current, Page::new()));
        }
    }

    if !current.is_empty() {
        pages.push(current);
    }

    trace!(blocks = blocks.len(), pages = pages.len(), budget, "paginated");
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::BlockId;
    use proptest::prelude::*;

    fn blocks_with_heights(heights: &[f32]) -> Vec<ContentBlock> {
        heights
            .iter()
            .map(|h| ContentBlock::paragraph("x").with_height(*h))
            .collect()
    }

    fn page_sizes(pages: &[Page<'_>]) -> Vec<usize> {
        pages.iter().map(Page::len).collect()
    }

    #[test]
    fn test_five_blocks_of_250() {
        let blocks = blocks_with_heights(&[250.0; 5]);
        let pages = paginate(&blocks, 800.0);
        assert_eq!(page_sizes(&pages), vec![3, 2]);
        assert_eq!(pages[0].height, 750.0);
    }

    #[test]
    fn test_unmeasured_blocks_default_to_100() {
        let blocks: Vec<_> = (0..10).map(|_| ContentBlock::paragraph("x")).collect();
        let pages = paginate(&blocks, EDITOR_PAGE_HEIGHT);
        assert_eq!(page_sizes(&pages), vec![8, 2]);
    }

    #[test]
    fn test_oversized_block_gets_its_own_page() {
        let blocks = blocks_with_heights(&[100.0, 1500.0, 100.0]);
        let pages = paginate(&blocks, 800.0);
        assert_eq!(page_sizes(&pages), vec![1, 1, 1]);
    }

    #[test]
    fn test_leading_oversized_block_emits_no_empty_page() {
        let blocks = blocks_with_heights(&[2000.0]);
        let pages = paginate(&blocks, 800.0);
        assert_eq!(page_sizes(&pages), vec![1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(paginate(&[], 800.0).is_empty());
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let blocks = blocks_with_heights(&[400.0, 400.0, 1.0]);
        let pages = paginate(&blocks, 800.0);
        assert_eq!(page_sizes(&pages), vec![2, 1]);
    }

    #[test]
    fn test_page_break_closes_page() {
        let blocks = vec![
            ContentBlock::paragraph("a").with_height(10.0),
            ContentBlock::page_break(),
            ContentBlock::paragraph("b").with_height(10.0),
        ];
        let pages = paginate_with_breaks(&blocks, 800.0, |b| b.height_or(0.0));
        assert_eq!(page_sizes(&pages), vec![2, 1]);

        // Plain pagination ignores the break
        let pages = paginate_by(&blocks, 800.0, |b| b.height_or(0.0));
        assert_eq!(page_sizes(&pages), vec![3]);
    }

    #[test]
    fn test_trailing_page_break_adds_no_page() {
        let blocks = vec![ContentBlock::paragraph("a"), ContentBlock::page_break()];
        let pages = paginate_with_breaks(&blocks, 800.0, |_| 10.0);
        assert_eq!(page_sizes(&pages), vec![2]);
    }

    #[test]
    fn test_invalid_heights_count_as_zero() {
        let blocks = blocks_with_heights(&[f32::NAN, -5.0, 700.0]);
        let pages = paginate(&blocks, 800.0);
        assert_eq!(page_sizes(&pages), vec![3]);
    }

    #[test]
    fn test_forced_breaks_before_major_headings() {
        let blocks = vec![
            ContentBlock::heading(1, "One"),
            ContentBlock::paragraph("a"),
            ContentBlock::heading(2, "Sub"),
            ContentBlock::page_break(),
            ContentBlock::heading(1, "Two"),
            ContentBlock::heading(1, "Three"),
        ];
        let kinds: Vec<_> = with_forced_breaks(&blocks)
            .iter()
            .map(ContentBlock::block_type)
            .collect();
        assert_eq!(
            kinds,
            vec![
                BlockType::Heading,
                BlockType::Paragraph,
                BlockType::Heading,
                BlockType::PageBreak,
                BlockType::Heading,
                BlockType::PageBreak,
                BlockType::Heading,
            ]
        );
    }

    fn ids(pages: &[Page<'_>]) -> Vec<BlockId> {
        pages.iter().flat_map(|p| p.blocks.iter().map(|b| b.id)).collect()
    }

    proptest! {
        #[test]
        fn prop_pagination_is_ordered_partition(
            heights in prop::collection::vec(0.0f32..1200.0, 0..60),
            budget in 1.0f32..2000.0,
        ) {
            let blocks = blocks_with_heights(&heights);
            let pages = paginate(&blocks, budget);

            let expected: Vec<_> = blocks.iter().map(|b| b.id).collect();
            prop_assert_eq!(ids(&pages), expected);
            prop_assert!(pages.iter().all(|p| !p.is_empty()));
        }

        #[test]
        fn prop_pagination_is_greedy(
            heights in prop::collection::vec(0.0f32..1200.0, 1..60),
            budget in 1.0f32..2000.0,
        ) {
            let blocks = blocks_with_heights(&heights);
            let pages = paginate(&blocks, budget);

            for pair in pages.windows(2) {
                let next = pair[1].blocks[0].height_or(DEFAULT_BLOCK_HEIGHT);
                prop_assert!(pair[0].height + next > budget);
            }
            for page in &pages {
                prop_assert!(page.height <= budget || page.len() == 1);
            }
        }
    }
}
