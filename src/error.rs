/// Error types for vscode-projects
///
/// This module defines all possible errors that can occur while discovering,
/// filtering and launching projects. Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vscode-projects operations
#[derive(Error, Debug)]
pub enum ProjectsError {
    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal errors
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A workspace history record that can't be turned into a project
    #[error("Malformed record {}: {reason}", path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// No usable editor binary on PATH
    #[error("Editor not found: {0}")]
    EditorNotFound(String),

    /// No recent project matched the given name
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Spawning the editor failed
    #[error("Failed to launch {binary}: {source}")]
    LaunchFailed {
        binary: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for vscode-projects operations
pub type Result<T> = std::result::Result<T, ProjectsError>;

impl ProjectsError {
    /// Build a MalformedRecord error for the record at `path`
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ProjectsError::MalformedRecord {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Convert ProjectsError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ProjectsError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            ProjectsError::Walk(e) => {
                format!("Could not read workspace storage. Details: {}", e)
            }
            ProjectsError::MalformedRecord { path, reason } => {
                format!(
                    "Workspace history file {} is unreadable: {}",
                    path.display(),
                    reason
                )
            }
            ProjectsError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            ProjectsError::ConfigParse(e) => {
                format!("Config file is not valid TOML: {}", e)
            }
            ProjectsError::EditorNotFound(name) => {
                format!("No binary for '{}' found on PATH", name)
            }
            ProjectsError::ProjectNotFound(name) => {
                format!("No recent project named '{}'", name)
            }
            ProjectsError::LaunchFailed { binary, source } => {
                format!("Could not start '{}'. Details: {}", binary, source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = ProjectsError::ProjectNotFound("proj1".to_string());
        assert!(err.user_message().contains("proj1"));

        let err = ProjectsError::EditorNotFound("VS Code".to_string());
        assert!(err.user_message().contains("PATH"));
    }

    #[test]
    fn test_malformed_display() {
        let err = ProjectsError::malformed("/tmp/a/workspace.json", "missing `folder`");
        let display = format!("{}", err);
        assert!(display.contains("Malformed record"));
        assert!(display.contains("/tmp/a/workspace.json"));
        assert!(display.contains("missing `folder`"));
    }

    #[test]
    fn test_launch_failed_keeps_source() {
        use std::error::Error as _;

        let err = ProjectsError::LaunchFailed {
            binary: "code".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.source().is_some());
        assert!(err.user_message().contains("code"));
    }
}
