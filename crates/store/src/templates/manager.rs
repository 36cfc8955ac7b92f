//! Custom template persistence and document/template conversion

use super::{
    builtin_templates, StoredTemplates, Template, TemplateCategory, TemplateError,
    TemplateResult, TemplateStoreFile,
};
use crate::storage::KeyValueStore;
use chrono::Utc;
use doc_model::{BlockType, ContentBlock, Document, TemplateId};
use tracing::{info, warn};

/// Store key holding the custom template list
pub const TEMPLATE_STORE_KEY: &str = "docx-custom-templates";

/// Maximum preview length in characters
pub const PREVIEW_LIMIT: usize = 200;

/// Number of text blocks sampled for a preview
const PREVIEW_BLOCKS: usize = 3;

/// Manages custom templates in an injected key-value store
#[derive(Debug)]
pub struct TemplateManager<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TemplateManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load custom templates.
    ///
    /// A missing key is an empty list. Unreadable contents are logged and
    /// treated as empty; only store failures are errors.
    pub fn custom_templates(&self) -> TemplateResult<Vec<Template>> {
        let Some(raw) = self.store.get(TEMPLATE_STORE_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<StoredTemplates>(&raw) {
            Ok(stored) => Ok(stored.into_templates()),
            Err(e) => {
                warn!(error = %e, "custom template store is corrupt, ignoring it");
                Ok(Vec::new())
            }
        }
    }

    /// Built-in templates followed by custom ones
    pub fn all_templates(&self) -> TemplateResult<Vec<Template>> {
        let mut templates = builtin_templates();
        templates.extend(self.custom_templates()?);
        Ok(templates)
    }

    /// Find a built-in or custom template by id
    pub fn find_template(&self, id: TemplateId) -> TemplateResult<Template> {
        self.all_templates()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(TemplateError::NotFound(id))
    }

    /// Find a template by exact name; built-ins are searched first
    pub fn find_by_name(&self, name: &str) -> TemplateResult<Option<Template>> {
        Ok(self.all_templates()?.into_iter().find(|t| t.name == name))
    }

    fn write_custom(&self, templates: Vec<Template>) -> TemplateResult<()> {
        let json = serde_json::to_string(&TemplateStoreFile::new(templates))?;
        self.store.set(TEMPLATE_STORE_KEY, &json)?;
        Ok(())
    }

    /// Snapshot a document as a new custom template and persist it.
    ///
    /// Blocks are copied under fresh ids. Name and description must be
    /// non-blank; nothing is written when validation fails.
    pub fn create_template_from_document(
        &self,
        document: &Document,
        name: &str,
        description: &str,
        created_by: Option<&str>,
    ) -> TemplateResult<Template> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(TemplateError::validation("Template name is required"));
        }
        if description.is_empty() {
            return Err(TemplateError::validation("Template description is required"));
        }

        let template = Template {
            id: TemplateId::new(),
            name: name.to_string(),
            description: description.to_string(),
            category: TemplateCategory::Custom,
            created_at: Utc::now(),
            created_by: created_by
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            blocks: document.rekeyed_blocks(),
            settings: document.settings.clone(),
            preview: Some(generate_preview(&document.blocks)),
        };

        let mut templates = self.custom_templates()?;
        templates.push(template.clone());
        self.write_custom(templates)?;

        info!(id = %template.id, name = %template.name, "saved custom template");
        Ok(template)
    }

    /// Remove a custom template.
    ///
    /// Returns `Ok(false)` when no custom template has that id.
    pub fn delete_template(&self, id: TemplateId) -> TemplateResult<bool> {
        let mut templates = self.custom_templates()?;
        let before = templates.len();
        templates.retain(|t| t.id != id);
        if templates.len() == before {
            return Ok(false);
        }

        self.write_custom(templates)?;
        info!(%id, "deleted custom template");
        Ok(true)
    }
}

/// New document from a template, with fresh block ids and copied settings
pub fn create_from_template(template: &Template, title: Option<&str>) -> Document {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Document from {}", template.name));

    let mut document = Document::new()
        .with_title(title)
        .with_blocks(template.blocks.iter().map(ContentBlock::with_fresh_id).collect())
        .with_settings(template.settings.clone());
    document.template = template.name.clone();
    document
}

/// Short text preview: the first three non-blank heading, paragraph, or
/// quote blocks joined by spaces, cut to 200 characters with `...` when cut
pub fn generate_preview(blocks: &[ContentBlock]) -> String {
    let joined = blocks
        .iter()
        .filter(|b| {
            matches!(
                b.block_type(),
                BlockType::Heading | BlockType::Paragraph | BlockType::Quote
            )
        })
        .filter(|b| !b.content.trim().is_empty())
        .take(PREVIEW_BLOCKS)
        .map(|b| b.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.chars().count() > PREVIEW_LIMIT {
        let mut preview: String = joined.chars().take(PREVIEW_LIMIT).collect();
        preview.push_str("...");
        preview
    } else {
        joined
    }
}
