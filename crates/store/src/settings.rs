//! Editor settings persisted as JSON

use crate::autosave::AutosaveConfig;
use crate::export::ExportOptions;
use crate::Result;
use doc_model::DocumentSettings;
use layout_engine::{HeightEstimator, EDITOR_PAGE_HEIGHT, PRINT_PAGE_HEIGHT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the settings file inside the config directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Application-wide editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Page setup given to new documents
    pub document: DocumentSettings,
    /// Undo steps kept per document
    pub history_limit: usize,
    /// Page height for on-screen page framing
    pub editor_page_height: f32,
    /// Page height for the print preview
    pub print_page_height: f32,
    pub export: ExportOptions,
    pub autosave: AutosaveConfig,
    /// Height heuristics for unmeasured blocks
    pub estimator: HeightEstimator,
    /// Directory for templates and autosave slots; next to the settings
    /// file when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            document: DocumentSettings::default(),
            history_limit: 50,
            editor_page_height: EDITOR_PAGE_HEIGHT,
            print_page_height: PRINT_PAGE_HEIGHT,
            export: ExportOptions::default(),
            autosave: AutosaveConfig::default(),
            estimator: HeightEstimator::default(),
            storage_dir: None,
        }
    }
}

/// Settings manager for loading, saving, and updating editor settings
pub struct SettingsManager {
    settings_path: PathBuf,
    /// Cached copy of the last loaded or saved settings
    current: EditorSettings,
}

impl SettingsManager {
    /// Manager for `settings.json` inside `config_dir`
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            settings_path: config_dir.as_ref().join(SETTINGS_FILE),
            current: EditorSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Configured storage directory, defaulting to `data/` beside the settings file
    pub fn storage_dir(&self) -> PathBuf {
        match &self.current.storage_dir {
            Some(dir) => dir.clone(),
            None => self
                .settings_path
                .parent()
                .map(|p| p.join("data"))
                .unwrap_or_else(|| PathBuf::from("data")),
        }
    }

    fn parse(content: &str) -> EditorSettings {
        match serde_json::from_str::<EditorSettings>(content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to parse settings file, using defaults: {}", e);
                EditorSettings::default()
            }
        }
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&EditorSettings> {
        self.current = if tokio::fs::try_exists(&self.settings_path).await? {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            Self::parse(&content)
        } else {
            EditorSettings::default()
        };
        Ok(&self.current)
    }

    /// Load settings synchronously (for use during startup)
    pub fn load_sync(&mut self) -> Result<&EditorSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            Self::parse(&content)
        } else {
            EditorSettings::default()
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    /// Save settings synchronously
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &EditorSettings {
        &self.current
    }

    /// Replace settings and save to disk
    pub async fn update(&mut self, settings: EditorSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    pub fn update_sync(&mut self, settings: EditorSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub async fn reset(&mut self) -> Result<&EditorSettings> {
        self.current = EditorSettings::default();
        self.save().await?;
        Ok(&self.current)
    }

    pub fn reset_sync(&mut self) -> Result<&EditorSettings> {
        self.current = EditorSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }
}
