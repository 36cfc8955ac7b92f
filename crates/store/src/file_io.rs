//! Document file I/O

use crate::{Result, StoreError};
use doc_model::Document;
use std::path::Path;

/// Parse a document from JSON, re-keying duplicate block ids
pub fn deserialize_document(json: &str) -> Result<Document> {
    let mut document: Document = serde_json::from_str(json)?;
    let rekeyed = document.dedupe_block_ids();
    if rekeyed > 0 {
        tracing::warn!(rekeyed, "document contained duplicate block ids");
    }
    Ok(document)
}

pub fn serialize_document(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Save a document to a file
pub async fn save_document(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let json = serialize_document(document)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Load a document from a file
pub async fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();

    if !tokio::fs::try_exists(path).await? {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = tokio::fs::read_to_string(path).await?;
    deserialize_document(&json)
}

/// Save a document synchronously
pub fn save_document_sync(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let json = serialize_document(document)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a document synchronously
pub fn load_document_sync(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = std::fs::read_to_string(path)?;
    deserialize_document(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::ContentBlock;
    use tempfile::TempDir;

    #[test]
    fn test_sync_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let doc = Document::new()
            .with_title("Saved")
            .with_blocks(vec![ContentBlock::paragraph("body")]);

        save_document_sync(&doc, &path).unwrap();
        assert_eq!(load_document_sync(&path).unwrap(), doc);
    }

    #[tokio::test]
    async fn test_async_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_document(dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(StoreError::FileNotFound(_))));
    }

    #[test]
    fn test_duplicate_ids_are_repaired_on_load() {
        let block = ContentBlock::paragraph("dup");
        let doc = Document::new().with_blocks(vec![block.clone(), block]);
        let json = serde_json::to_string(&doc).unwrap();

        let loaded = deserialize_document(&json).unwrap();
        assert!(loaded.validate().is_ok());
    }
}
