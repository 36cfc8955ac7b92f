//! Autosave of documents into a key-value slot per document id
//!
//! Each document owns the key `document:<id>`. Writes are last-write-wins;
//! there is no conflict detection between sessions.

use crate::file_io::{deserialize_document, serialize_document};
use crate::storage::KeyValueStore;
use crate::Result;
use doc_model::{Document, DocumentId};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Key prefix of autosave slots
pub const AUTOSAVE_KEY_PREFIX: &str = "document:";

/// Store key holding the autosaved copy of `id`
pub fn autosave_key(id: DocumentId) -> String {
    format!("{AUTOSAVE_KEY_PREFIX}{id}")
}

/// Autosave configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutosaveConfig {
    pub enabled: bool,
    /// Minimum quiet time after the last change before a save goes through
    pub debounce_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 1000,
        }
    }
}

impl AutosaveConfig {
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Current autosave status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutosaveStatus {
    pub enabled: bool,
    pub has_unsaved_changes: bool,
    /// Unix timestamp in ms of the last successful save
    pub last_save_time: Option<u64>,
    pub last_error: Option<String>,
}

/// Autosave slot for one document
pub struct AutosaveSlot<S: KeyValueStore> {
    store: S,
    config: AutosaveConfig,
    document_id: DocumentId,
    dirty: Arc<AtomicBool>,
    last_change: Mutex<Option<Instant>>,
    last_save_time: AtomicU64,
    last_error: Mutex<Option<String>>,
}

impl<S: KeyValueStore> AutosaveSlot<S> {
    pub fn new(store: S, document_id: DocumentId, config: AutosaveConfig) -> Self {
        Self {
            store,
            config,
            document_id,
            dirty: Arc::new(AtomicBool::new(false)),
            last_change: Mutex::new(None),
            last_save_time: AtomicU64::new(0),
            last_error: Mutex::new(None),
        }
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn key(&self) -> String {
        autosave_key(self.document_id)
    }

    pub fn config(&self) -> &AutosaveConfig {
        &self.config
    }

    /// Shared dirty flag, for callers that mark changes from elsewhere
    pub fn dirty_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.dirty)
    }

    /// Record that the document changed since the last save
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
        if let Ok(mut last) = self.last_change.lock() {
            *last = Some(Instant::now());
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    fn debounce_elapsed(&self) -> bool {
        let debounce = Duration::from_millis(self.config.debounce_ms);
        match self.last_change.lock() {
            Ok(last) => last.map_or(true, |t| t.elapsed() >= debounce),
            Err(_) => true,
        }
    }

    /// Save if enabled, dirty, and the debounce period has passed.
    ///
    /// Returns whether a write happened.
    pub fn autosave(&self, document: &Document) -> Result<bool> {
        if !self.config.enabled || !self.is_dirty() || !self.debounce_elapsed() {
            return Ok(false);
        }
        self.save_now(document).map(|()| true)
    }

    /// Write the document unconditionally
    pub fn save_now(&self, document: &Document) -> Result<()> {
        let result =
            serialize_document(document).and_then(|json| self.store.set(&self.key(), &json));

        let error = match &result {
            Ok(()) => {
                self.dirty.store(false, Ordering::SeqCst);
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_millis() as u64;
                self.last_save_time.store(now, Ordering::SeqCst);
                debug!(key = %self.key(), "autosaved document");
                None
            }
            Err(e) => {
                warn!(key = %self.key(), error = %e, "autosave failed");
                Some(e.to_string())
            }
        };
        if let Ok(mut last) = self.last_error.lock() {
            *last = error;
        }
        result
    }

    /// Whether a saved copy exists for recovery
    pub fn has_recovery(&self) -> Result<bool> {
        Ok(self.store.get(&self.key())?.is_some())
    }

    /// Load the saved copy, if any
    pub fn recover(&self) -> Result<Option<Document>> {
        self.store
            .get(&self.key())?
            .map(|json| deserialize_document(&json))
            .transpose()
    }

    /// Drop the saved copy
    pub fn clear(&self) -> Result<bool> {
        self.store.remove(&self.key())
    }

    pub fn status(&self) -> AutosaveStatus {
        let last_save = self.last_save_time.load(Ordering::SeqCst);
        AutosaveStatus {
            enabled: self.config.enabled,
            has_unsaved_changes: self.is_dirty(),
            last_save_time: (last_save > 0).then_some(last_save),
            last_error: self.last_error.lock().ok().and_then(|e| e.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use doc_model::ContentBlock;

    fn slot(
        config: AutosaveConfig,
    ) -> (Arc<MemoryStore>, AutosaveSlot<Arc<MemoryStore>>, Document) {
        let store = Arc::new(MemoryStore::new());
        let doc = Document::new()
            .with_title("Draft")
            .with_blocks(vec![ContentBlock::paragraph("text")]);
        let slot = AutosaveSlot::new(Arc::clone(&store), doc.id, config);
        (store, slot, doc)
    }

    #[test]
    fn test_clean_document_is_not_saved() {
        let (store, slot, doc) = slot(AutosaveConfig::default().with_debounce(0));
        assert!(!slot.autosave(&doc).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_dirty_document_is_saved_under_its_key() {
        let (store, slot, doc) = slot(AutosaveConfig::default().with_debounce(0));
        slot.mark_dirty();

        assert!(slot.autosave(&doc).unwrap());
        assert!(!slot.is_dirty());
        assert!(store.get(&format!("document:{}", doc.id)).unwrap().is_some());
        assert_eq!(slot.recover().unwrap(), Some(doc));
        assert!(slot.status().last_save_time.is_some());
    }

    #[test]
    fn test_debounce_defers_save() {
        let (_, slot, doc) = slot(AutosaveConfig::default().with_debounce(60_000));
        slot.mark_dirty();
        assert!(!slot.autosave(&doc).unwrap());
        assert!(slot.is_dirty());
    }

    #[test]
    fn test_disabled_never_saves() {
        let (_, slot, doc) = slot(AutosaveConfig::disabled());
        slot.mark_dirty();
        assert!(!slot.autosave(&doc).unwrap());
    }

    #[test]
    fn test_last_write_wins() {
        let (_, slot, mut doc) = slot(AutosaveConfig::default());
        slot.save_now(&doc).unwrap();
        doc.title = "Second".to_string();
        slot.save_now(&doc).unwrap();
        assert_eq!(slot.recover().unwrap().unwrap().title, "Second");
    }

    #[test]
    fn test_quota_failure_is_reported() {
        let store = MemoryStore::with_quota(8);
        let doc = Document::new();
        let slot = AutosaveSlot::new(store, doc.id, AutosaveConfig::default());

        assert!(slot.save_now(&doc).is_err());
        assert!(slot.status().last_error.is_some());
        assert!(!slot.has_recovery().unwrap());
    }
}
