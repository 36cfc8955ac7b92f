//! Document state manager

use crate::{EditError, History, Result, DEFAULT_HISTORY_LIMIT};
use doc_model::{
    BlockId, BlockKind, BlockPatch, BlockType, ContentBlock, Document, DocumentPatch, TableGrid,
};
use tracing::debug;

/// Whether snapshots are currently being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    #[default]
    Recording,
    /// A historical snapshot is being applied; nothing may be recorded.
    Replaying,
}

/// Owns the document being edited, the block selection, and the history.
///
/// Mutations on unknown block ids are no-ops and record nothing, as are
/// undo/redo at either end of the history.
#[derive(Debug, Clone)]
pub struct DocumentState {
    document: Document,
    selected: Option<BlockId>,
    history: History,
    mode: HistoryMode,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

impl DocumentState {
    /// Start an editing session on `document`
    pub fn new(document: Document) -> Self {
        Self::with_history_limit(document, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(mut document: Document, limit: usize) -> Self {
        document.dedupe_block_ids();
        Self {
            history: History::with_limit(document.clone(), limit),
            document,
            selected: None,
            mode: HistoryMode::Recording,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selected_block(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Select a block; unknown ids clear the selection
    pub fn select(&mut self, id: Option<BlockId>) {
        self.selected = id.filter(|id| self.document.contains_block(*id));
    }

    /// Replace the whole session with another document and a fresh history
    pub fn load(&mut self, mut document: Document) {
        document.dedupe_block_ids();
        self.history.reset(document.clone());
        self.document = document;
        self.selected = None;
    }

    /// Apply a partial update to document-level fields
    pub fn update(&mut self, patch: DocumentPatch) {
        if patch.is_empty() {
            return;
        }
        patch.apply(&mut self.document);
        if self.selected.is_some_and(|id| !self.document.contains_block(id)) {
            self.selected = None;
        }
        self.commit("update");
    }

    /// Insert a new block with type defaults at `index` (default: end) and select it
    pub fn add_block(&mut self, block_type: BlockType, index: Option<usize>) -> BlockId {
        self.insert_block(ContentBlock::new(block_type), index)
    }

    /// Insert a prepared block, re-keying it if its id is already taken
    pub fn insert_block(&mut self, mut block: ContentBlock, index: Option<usize>) -> BlockId {
        if self.document.contains_block(block.id) {
            block.id = BlockId::new();
        }
        let id = block.id;
        let at = index
            .unwrap_or(self.document.blocks.len())
            .min(self.document.blocks.len());

        self.document.blocks.insert(at, block);
        self.selected = Some(id);
        self.commit("add_block");
        id
    }

    /// Shallow-merge `patch` into the block with `id`
    pub fn update_block(&mut self, id: BlockId, patch: BlockPatch) {
        if patch.is_empty() {
            return;
        }
        let Some(block) = self.document.block_mut(id) else {
            return;
        };
        patch.apply(block);
        self.commit("update_block");
    }

    pub fn delete_block(&mut self, id: BlockId) {
        let Some(index) = self.document.block_index(id) else {
            return;
        };
        self.document.blocks.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.commit("delete_block");
    }

    /// Relocate a block; `new_index` is clamped to the end of the list
    pub fn move_block(&mut self, id: BlockId, new_index: usize) {
        let Some(from) = self.document.block_index(id) else {
            return;
        };
        let to = new_index.min(self.document.blocks.len() - 1);
        if from == to {
            return;
        }
        let block = self.document.blocks.remove(from);
        self.document.blocks.insert(to, block);
        self.commit("move_block");
    }

    /// Write back a measured height. Layout hints are not recorded in history.
    pub fn set_block_height(&mut self, id: BlockId, height: f32) {
        if let Some(block) = self.document.block_mut(id) {
            block.height = Some(height).filter(|h| h.is_finite() && *h >= 0.0);
        }
    }

    /// Seed every uninitialized table with its default grid.
    ///
    /// Records a single history entry when anything was seeded, except while
    /// a snapshot is being restored.
    pub fn ensure_tables_initialized(&mut self) -> usize {
        let mut seeded = 0;
        for block in &mut self.document.blocks {
            if block.ensure_table_initialized() {
                seeded += 1;
            }
        }
        if seeded > 0 {
            self.commit("init_tables");
        }
        seeded
    }

    pub fn add_table_row(&mut self, id: BlockId) -> Result<()> {
        self.edit_table(id, |grid| {
            grid.add_row();
            Ok(())
        })
    }

    pub fn add_table_column(&mut self, id: BlockId) -> Result<()> {
        self.edit_table(id, |grid| {
            grid.add_column();
            Ok(())
        })
    }

    /// Remove the last row; the only remaining row is kept
    pub fn remove_table_row(&mut self, id: BlockId) -> Result<()> {
        self.edit_table(id, |grid| grid.remove_row(grid.row_count().saturating_sub(1)))
    }

    /// Remove the last column; the only remaining column is kept
    pub fn remove_table_column(&mut self, id: BlockId) -> Result<()> {
        self.edit_table(id, |grid| grid.remove_column(grid.col_count().saturating_sub(1)))
    }

    pub fn set_table_cell(
        &mut self,
        id: BlockId,
        row: usize,
        col: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        let text = text.into();
        self.edit_table(id, move |grid| grid.set_cell(row, col, text))
    }

    fn edit_table<F>(&mut self, id: BlockId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut TableGrid) -> doc_model::Result<()>,
    {
        let block = self.document.block(id).ok_or(EditError::BlockNotFound(id))?;
        let mut grid = match &block.kind {
            BlockKind::Table { grid } => grid.clone().unwrap_or_else(TableGrid::seed),
            _ => return Err(EditError::NotATable(id)),
        };
        edit(&mut grid)?;
        self.update_block(id, BlockPatch::kind(BlockKind::Table { grid: Some(grid) }));
        Ok(())
    }

    /// Step back one snapshot
    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.step_back().cloned() else {
            return;
        };
        self.restore(snapshot);
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) {
        let Some(snapshot) = self.history.step_forward().cloned() else {
            return;
        };
        self.restore(snapshot);
    }

    fn restore(&mut self, snapshot: Document) {
        self.mode = HistoryMode::Replaying;
        self.document = snapshot;
        if self.selected.is_some_and(|id| !self.document.contains_block(id)) {
            self.selected = None;
        }
        // Seeded in place; nothing is recorded while replaying
        self.ensure_tables_initialized();
        self.mode = HistoryMode::Recording;
        debug!(index = self.history.index(), "restored history snapshot");
    }

    fn commit(&mut self, operation: &'static str) {
        if self.mode == HistoryMode::Replaying {
            return;
        }
        self.document.touch();
        self.history.record(self.document.clone());
        debug!(
            operation,
            blocks = self.document.blocks.len(),
            history = self.history.len(),
            "document mutated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{BlockStylePatch, TextAlign};
    use proptest::prelude::*;

    fn contents(state: &DocumentState) -> Vec<String> {
        state.document().blocks.iter().map(|b| b.content.clone()).collect()
    }

    #[test]
    fn test_add_block_selects_and_appends() {
        let mut state = DocumentState::default();
        let first = state.add_block(BlockType::Paragraph, None);
        let second = state.add_block(BlockType::Heading, Some(0));

        assert_eq!(state.selected_block(), Some(second));
        assert_eq!(state.document().blocks[0].id, second);
        assert_eq!(state.document().blocks[1].id, first);
        assert!(state.can_undo());
    }

    #[test]
    fn test_add_block_index_is_clamped() {
        let mut state = DocumentState::default();
        state.add_block(BlockType::Paragraph, None);
        let id = state.add_block(BlockType::Quote, Some(99));
        assert_eq!(state.document().blocks.last().unwrap().id, id);
    }

    #[test]
    fn test_update_block_merges_style() {
        let mut state = DocumentState::default();
        let id = state.add_block(BlockType::Paragraph, None);
        state.update_block(
            id,
            BlockPatch {
                content: Some("Hello".to_string()),
                style: Some(BlockStylePatch {
                    text_align: Some(TextAlign::Center),
                    ..Default::default()
                }),
                kind: None,
            },
        );

        let block = state.document().block(id).unwrap();
        assert_eq!(block.content, "Hello");
        assert_eq!(block.style.text_align, TextAlign::Center);
        assert_eq!(block.style.font_size, 16.0);
    }

    #[test]
    fn test_delete_selected_block_clears_selection() {
        let mut state = DocumentState::default();
        let id = state.add_block(BlockType::Paragraph, None);
        state.delete_block(id);
        assert!(state.document().blocks.is_empty());
        assert_eq!(state.selected_block(), None);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut state = DocumentState::default();
        state.add_block(BlockType::Paragraph, None);
        let before = state.history().len();
        let ghost = BlockId::new();

        state.update_block(ghost, BlockPatch::content("x"));
        state.delete_block(ghost);
        state.move_block(ghost, 0);

        assert_eq!(state.history().len(), before);
    }

    #[test]
    fn test_move_block() {
        let mut state = DocumentState::default();
        let a = state.add_block(BlockType::Paragraph, None);
        state.update_block(a, BlockPatch::content("a"));
        let b = state.add_block(BlockType::Paragraph, None);
        state.update_block(b, BlockPatch::content("b"));
        let c = state.add_block(BlockType::Paragraph, None);
        state.update_block(c, BlockPatch::content("c"));

        state.move_block(c, 0);
        assert_eq!(contents(&state), vec!["c", "a", "b"]);

        state.move_block(c, 10);
        assert_eq!(contents(&state), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_undo_redo_restore_snapshots() {
        let mut state = DocumentState::default();
        state.update(DocumentPatch::title("First"));
        state.update(DocumentPatch::title("Second"));

        state.undo();
        assert_eq!(state.document().title, "First");
        state.undo();
        assert_eq!(state.document().title, "Untitled Document");
        state.undo();
        assert_eq!(state.document().title, "Untitled Document");

        state.redo();
        state.redo();
        assert_eq!(state.document().title, "Second");
        assert!(!state.can_redo());
        assert_eq!(state.mode(), HistoryMode::Recording);
    }

    #[test]
    fn test_undo_does_not_record() {
        let mut state = DocumentState::default();
        state.update(DocumentPatch::title("A"));
        state.update(DocumentPatch::title("B"));
        let len = state.history().len();

        state.undo();
        state.redo();
        state.undo();
        assert_eq!(state.history().len(), len);
    }

    #[test]
    fn test_new_mutation_after_undo_truncates_redo() {
        let mut state = DocumentState::default();
        state.update(DocumentPatch::title("S1"));
        state.update(DocumentPatch::title("S2"));
        state.undo();
        state.update(DocumentPatch::title("S1'"));

        assert!(!state.can_redo());
        let titles: Vec<_> = state.history().entries().map(|d| d.title.clone()).collect();
        assert_eq!(titles, vec!["Untitled Document", "S1", "S1'"]);
    }

    #[test]
    fn test_undo_clears_stale_selection() {
        let mut state = DocumentState::default();
        state.add_block(BlockType::Heading, None);
        assert!(state.selected_block().is_some());
        state.undo();
        assert_eq!(state.selected_block(), None);
    }

    #[test]
    fn test_lazy_table_initialization() {
        let mut state = DocumentState::default();
        let id = state.add_block(BlockType::Table, None);
        assert!(state.document().block(id).unwrap().table_grid().is_none());

        assert_eq!(state.ensure_tables_initialized(), 1);
        let grid = state.document().block(id).unwrap().table_grid().unwrap();
        assert_eq!(
            grid.rows(),
            &[
                vec!["Cell 1".to_string(), "Cell 2".to_string()],
                vec!["Cell 3".to_string(), "Cell 4".to_string()],
            ]
        );

        let json = serde_json::to_value(state.document().block(id).unwrap()).unwrap();
        assert_eq!(json["metadata"]["tableRows"], 2);
        assert_eq!(json["metadata"]["tableCols"], 2);
        assert_eq!(state.ensure_tables_initialized(), 0);
    }

    #[test]
    fn test_undo_seeds_tables_without_recording() {
        let mut state = DocumentState::default();
        let id = state.add_block(BlockType::Table, None);
        state.update(DocumentPatch::title("After"));
        let len = state.history().len();

        state.undo();
        assert!(state.document().block(id).unwrap().table_grid().is_some());
        assert_eq!(state.history().len(), len);
        assert!(state.can_redo());
        assert_eq!(state.mode(), HistoryMode::Recording);

        state.redo();
        assert_eq!(state.document().title, "After");
        assert!(!state.can_redo());
    }

    #[test]
    fn test_table_editing_is_undoable() {
        let mut state = DocumentState::default();
        let id = state.add_block(BlockType::Table, None);
        state.add_table_row(id).unwrap();
        state.set_table_cell(id, 2, 1, "new").unwrap();

        let grid = state.document().block(id).unwrap().table_grid().unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.cell(2, 1), Some("new"));

        state.undo();
        let grid = state.document().block(id).unwrap().table_grid().unwrap();
        assert_eq!(grid.cell(2, 1), Some(""));
    }

    #[test]
    fn test_cannot_remove_last_column() {
        let mut state = DocumentState::default();
        let id = state.add_block(BlockType::Table, None);
        state.remove_table_column(id).unwrap();
        assert!(state.remove_table_column(id).is_err());
    }

    #[test]
    fn test_table_ops_on_non_table() {
        let mut state = DocumentState::default();
        let id = state.add_block(BlockType::Paragraph, None);
        assert!(matches!(state.add_table_row(id), Err(EditError::NotATable(_))));
        assert!(matches!(
            state.add_table_row(BlockId::new()),
            Err(EditError::BlockNotFound(_))
        ));
    }

    #[test]
    fn test_height_writeback_is_not_recorded() {
        let mut state = DocumentState::default();
        let id = state.add_block(BlockType::Paragraph, None);
        let len = state.history().len();
        state.set_block_height(id, 120.0);
        assert_eq!(state.document().block(id).unwrap().height, Some(120.0));
        assert_eq!(state.history().len(), len);
    }

    proptest! {
        #[test]
        fn prop_history_is_bounded(n in 51usize..120) {
            let mut state = DocumentState::default();
            for i in 0..n {
                state.update(DocumentPatch::title(format!("T{}", i)));
            }
            prop_assert_eq!(state.history().len(), DEFAULT_HISTORY_LIMIT);

            for _ in 0..DEFAULT_HISTORY_LIMIT - 1 {
                state.undo();
            }
            prop_assert!(!state.can_undo());
            // n mutations leave n + 1 snapshots; the oldest retained one is T(n - 50)
            let expected = format!("T{}", n - DEFAULT_HISTORY_LIMIT);
            prop_assert_eq!(&state.document().title, &expected);
        }
    }
}
