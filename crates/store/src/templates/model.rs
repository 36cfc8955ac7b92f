//! Template records and their persisted form

use chrono::{DateTime, Utc};
use doc_model::{ContentBlock, DocumentSettings, TemplateId};
use serde::{Deserialize, Serialize};

/// Current version of the persisted template list
pub const TEMPLATE_STORE_VERSION: u32 = 1;

/// Where a template comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    /// Shipped with the editor, never persisted
    BuiltIn,
    /// Saved by the user
    #[default]
    Custom,
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuiltIn => write!(f, "built-in"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// A reusable block sequence plus document settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub category: TemplateCategory,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub settings: DocumentSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl Template {
    pub fn is_builtin(&self) -> bool {
        self.category == TemplateCategory::BuiltIn
    }
}

/// Versioned envelope written under the template store key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TemplateStoreFile {
    pub version: u32,
    pub templates: Vec<Template>,
}

impl TemplateStoreFile {
    pub fn new(templates: Vec<Template>) -> Self {
        Self {
            version: TEMPLATE_STORE_VERSION,
            templates,
        }
    }
}

/// Accepted on read: the envelope or a bare list from before versioning
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredTemplates {
    Versioned(TemplateStoreFile),
    Legacy(Vec<Template>),
}

impl StoredTemplates {
    pub fn into_templates(self) -> Vec<Template> {
        match self {
            Self::Versioned(file) => file.templates,
            Self::Legacy(templates) => templates,
        }
    }
}
