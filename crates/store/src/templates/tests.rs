//! Integration tests for the template system
//!
//! These tests cover the complete workflow of saving documents as
//! templates, listing and deleting them, and creating documents back.

#[cfg(test)]
mod integration_tests {
    use crate::storage::{FileStore, KeyValueStore, MemoryStore};
    use crate::templates::*;
    use crate::StoreError;
    use doc_model::{BlockStyle, ContentBlock, Document, FontWeight, ListType, TableGrid};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn sample_document() -> Document {
        Document::new().with_title("Quarterly").with_blocks(vec![
            ContentBlock::heading(2, "Summary"),
            ContentBlock::paragraph("Revenue grew.")
                .with_style(BlockStyle::default().with_weight(FontWeight::Bold)),
            ContentBlock::list(ListType::Numbered, "one\ntwo"),
            ContentBlock::table(TableGrid::seed()),
            ContentBlock::page_break(),
            ContentBlock::image("https://example.org/chart.png", "Chart"),
        ])
    }

    #[test]
    fn test_complete_template_workflow() {
        let manager = TemplateManager::new(MemoryStore::new());
        let doc = sample_document();

        let template = manager
            .create_template_from_document(&doc, "Quarterly", "Quarterly report", Some("ana"))
            .expect("Failed to save template");
        assert_eq!(template.category, TemplateCategory::Custom);
        assert_eq!(template.created_by.as_deref(), Some("ana"));
        assert_eq!(template.preview.as_deref(), Some("Summary Revenue grew."));

        let all = manager.all_templates().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].id, template.id);
        assert!(all[..2].iter().all(Template::is_builtin));

        assert!(manager.delete_template(template.id).unwrap());
        assert!(manager.custom_templates().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_everything_but_ids() {
        let manager = TemplateManager::new(MemoryStore::new());
        let source = sample_document();

        let template = manager
            .create_template_from_document(&source, "T", "D", None)
            .unwrap();
        let stored = manager.find_template(template.id).unwrap();
        let copy = create_from_template(&stored, None);

        assert_eq!(copy.blocks.len(), source.blocks.len());
        for (a, b) in source.blocks.iter().zip(&copy.blocks) {
            assert_ne!(a.id, b.id);
            assert!(a.same_content(b));
        }
        for (a, b) in template.blocks.iter().zip(&copy.blocks) {
            assert_ne!(a.id, b.id);
        }
        assert_eq!(copy.settings, source.settings);
        assert_eq!(copy.template, "T");
        assert_ne!(copy.id, source.id);
    }

    #[test]
    fn test_store_uses_versioned_envelope() {
        let store = Arc::new(MemoryStore::new());
        let manager = TemplateManager::new(Arc::clone(&store));
        manager
            .create_template_from_document(&sample_document(), "T", "D", None)
            .unwrap();

        let raw = store.get(TEMPLATE_STORE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], TEMPLATE_STORE_VERSION);
        assert_eq!(value["templates"].as_array().unwrap().len(), 1);
        assert!(value["templates"][0]["createdAt"].is_string());
    }

    #[test]
    fn test_legacy_array_is_readable() {
        let template = blank_template();
        let legacy = serde_json::to_string(&vec![Template {
            category: TemplateCategory::Custom,
            ..template
        }])
        .unwrap();

        let store = MemoryStore::new();
        store.set(TEMPLATE_STORE_KEY, &legacy).unwrap();
        let manager = TemplateManager::new(store);

        let custom = manager.custom_templates().unwrap();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].name, "Blank Document");
    }

    #[test]
    fn test_quota_failure_is_recoverable() {
        let manager = TemplateManager::new(MemoryStore::with_quota(64));
        let err = manager
            .create_template_from_document(&sample_document(), "T", "D", None)
            .unwrap_err();

        assert!(matches!(
            err,
            TemplateError::Storage(StoreError::QuotaExceeded { .. })
        ));
        assert!(manager.custom_templates().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_persists_across_managers() {
        let dir = tempdir().unwrap();
        let id = {
            let manager = TemplateManager::new(FileStore::open(dir.path()).unwrap());
            manager
                .create_template_from_document(&sample_document(), "Saved", "On disk", None)
                .unwrap()
                .id
        };

        let manager = TemplateManager::new(FileStore::open(dir.path()).unwrap());
        assert_eq!(manager.find_template(id).unwrap().name, "Saved");
        assert!(manager.find_by_name("Saved").unwrap().is_some());
    }

    #[test]
    fn test_delete_keeps_other_templates() {
        let manager = TemplateManager::new(MemoryStore::new());
        let doc = sample_document();
        let a = manager.create_template_from_document(&doc, "A", "a", None).unwrap();
        let b = manager.create_template_from_document(&doc, "B", "b", None).unwrap();

        assert!(manager.delete_template(a.id).unwrap());
        let remaining = manager.custom_templates().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[test]
    fn test_builtin_cannot_be_deleted() {
        let manager = TemplateManager::new(MemoryStore::new());
        let builtin = blank_template();
        assert!(!manager.delete_template(builtin.id).unwrap());
        assert!(manager.find_template(builtin.id).is_ok());
    }

    #[test]
    fn test_report_from_structured_data_becomes_template() {
        let manager = TemplateManager::new(MemoryStore::new());
        let report = create_from_structured_data(&AcademicReportData::sample()).unwrap();
        let template = manager
            .create_template_from_document(&report, "My report", "Report copy", None)
            .unwrap();

        let preview = template.preview.unwrap();
        assert!(preview.starts_with("[COLLEGE LOGO] BANNARI AMMAN INSTITUTE OF TECHNOLOGY"));
    }
}
