/// Editor detection logic
///
/// Knows where each VS Code flavour keeps its workspace storage and which
/// binary launches it. Binaries are resolved once, up front, by looking them
/// up on PATH.

use crate::config::{Config, EditorConfig};
use crate::error::{ProjectsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Supported editors
///
/// All of them write the same `workspace.json` history records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorKind {
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "code-insiders")]
    CodeInsiders,
    #[serde(rename = "vscodium")]
    VSCodium,
}

impl EditorKind {
    pub const ALL: [EditorKind; 3] = [
        EditorKind::Code,
        EditorKind::CodeInsiders,
        EditorKind::VSCodium,
    ];

    /// Identifier used in config files and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            EditorKind::Code => "code",
            EditorKind::CodeInsiders => "code-insiders",
            EditorKind::VSCodium => "vscodium",
        }
    }

    /// Human readable editor name
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorKind::Code => "VS Code",
            EditorKind::CodeInsiders => "VS Code Insiders",
            EditorKind::VSCodium => "VSCodium",
        }
    }

    /// Binaries to try, in order
    pub fn default_binaries(&self) -> &'static [&'static str] {
        match self {
            EditorKind::Code => &["code"],
            EditorKind::CodeInsiders => &["code-insiders"],
            EditorKind::VSCodium => &["codium", "vscodium"],
        }
    }

    /// Directory name under the platform config dir
    pub fn config_dir_name(&self) -> &'static str {
        match self {
            EditorKind::Code => "Code",
            EditorKind::CodeInsiders => "Code - Insiders",
            EditorKind::VSCodium => "VSCodium",
        }
    }

    /// Get the workspace storage path for this editor
    ///
    /// e.g. `~/.config/Code/User/workspaceStorage` on Linux.
    pub fn storage_root(&self) -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ProjectsError::Config("Could not determine config directory".to_string())
        })?;

        Ok(config_dir
            .join(self.config_dir_name())
            .join("User")
            .join("workspaceStorage"))
    }
}

impl std::fmt::Display for EditorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for EditorKind {
    type Err = ProjectsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "code" | "vscode" => Ok(EditorKind::Code),
            "code-insiders" | "insiders" => Ok(EditorKind::CodeInsiders),
            "vscodium" | "codium" => Ok(EditorKind::VSCodium),
            other => Err(ProjectsError::Config(format!("Unknown editor: {}", other))),
        }
    }
}

/// An editor with a binary that is actually available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    kind: EditorKind,
    name: String,
    icon: Option<PathBuf>,
    binary: String,
    storage_root: PathBuf,
}

impl Editor {
    /// Create an editor from an already resolved binary
    pub fn new(kind: EditorKind, binary: impl Into<String>, storage_root: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            icon: None,
            binary: binary.into(),
            storage_root: storage_root.into(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<PathBuf>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Resolve an editor from its binary candidates
    ///
    /// Returns None when no candidate is on PATH.
    pub fn resolve(
        kind: EditorKind,
        candidates: &[String],
        storage_root: impl Into<PathBuf>,
    ) -> Option<Self> {
        let binary = Self::find_binary(candidates)?;
        Some(Self::new(kind, binary, storage_root))
    }

    /// First candidate that exists on PATH
    pub fn find_binary(candidates: &[String]) -> Option<String> {
        candidates
            .iter()
            .find(|candidate| which::which(candidate.as_str()).is_ok())
            .cloned()
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }
}

/// Editor detector
pub struct EditorDetector;

impl EditorDetector {
    /// Detect every configured editor that can be launched
    pub fn detect_all(config: &Config) -> Vec<Editor> {
        config
            .editor_entries()
            .iter()
            .filter_map(Self::detect)
            .collect()
    }

    /// Resolve a single editor entry
    pub fn detect(entry: &EditorConfig) -> Option<Editor> {
        let storage_root = match entry.resolved_storage_root() {
            Ok(root) => root,
            Err(e) => {
                debug!(editor = %entry.kind, error = %e, "no storage root");
                return None;
            }
        };

        let candidates = entry.candidates();
        match Editor::resolve(entry.kind, &candidates, storage_root) {
            Some(editor) => Some(match &entry.icon {
                Some(icon) => editor.with_icon(icon),
                None => editor,
            }),
            None => {
                debug!(editor = %entry.kind, ?candidates, "no binary on PATH");
                None
            }
        }
    }
}
