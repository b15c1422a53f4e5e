//! Configuration file support for vscode-projects

use crate::core::RecordPolicy;
use crate::editor::EditorKind;
use crate::error::{ProjectsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hide projects whose folder no longer exists
    pub existing_only: bool,
    /// What discovery does with unreadable history records
    pub on_malformed: RecordPolicy,
    /// Editors to search; empty means every known editor with defaults
    pub editors: Vec<EditorConfig>,
}

/// Per-editor overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub kind: EditorKind,
    /// Binary candidates in preference order
    #[serde(default)]
    pub binaries: Vec<String>,
    /// Workspace storage directory, `~/` is expanded
    #[serde(default)]
    pub storage_root: Option<PathBuf>,
    #[serde(default)]
    pub icon: Option<PathBuf>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            existing_only: true,
            on_malformed: RecordPolicy::Skip,
            editors: Vec::new(),
        }
    }
}

impl EditorConfig {
    /// Config entry for `kind` with every field defaulted
    pub fn for_kind(kind: EditorKind) -> Self {
        Self {
            kind,
            binaries: Vec::new(),
            storage_root: None,
            icon: None,
            enabled: true,
        }
    }

    /// Binary candidates, falling back to the editor's usual names
    pub fn candidates(&self) -> Vec<String> {
        if self.binaries.is_empty() {
            self.kind
                .default_binaries()
                .iter()
                .map(|b| b.to_string())
                .collect()
        } else {
            self.binaries.clone()
        }
    }

    /// Storage root, falling back to the editor's default location
    pub fn resolved_storage_root(&self) -> Result<PathBuf> {
        match &self.storage_root {
            Some(path) => Ok(expand_home(path)),
            None => self.kind.storage_root(),
        }
    }
}

impl Config {
    /// Returns the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ProjectsError::Config("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("vscode-projects").join("config.toml"))
    }

    /// Load configuration from file, falling back to defaults if not found
    ///
    /// `path` overrides the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Editor entries to use, one per known editor when none are configured
    pub fn editor_entries(&self) -> Vec<EditorConfig> {
        if self.editors.is_empty() {
            EditorKind::ALL
                .iter()
                .map(|kind| EditorConfig::for_kind(*kind))
                .collect()
        } else {
            self.editors.iter().filter(|e| e.enabled).cloned().collect()
        }
    }
}

/// Expand ~ in path
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
