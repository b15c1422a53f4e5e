// Workspace history records
//
// The editor writes one `workspace.json` per tracked workspace. Folder
// workspaces look like {"folder": "file:///home/me/proj"}; multi-root ones
// carry a "workspace" key instead and don't name a single folder.

use crate::core::ProjectDescriptor;
use crate::error::{ProjectsError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// File name the editor uses for history records
pub const RECORD_FILE_NAME: &str = "workspace.json";

/// Raw contents of a `workspace.json`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceRecord {
    pub folder: Option<String>,
    pub workspace: Option<String>,
}

impl WorkspaceRecord {
    /// Parse record JSON, bytes must be UTF-8
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// The folder URI this record points at
    pub fn folder_uri(&self) -> std::result::Result<&str, String> {
        match (&self.folder, &self.workspace) {
            (Some(folder), _) => Ok(folder),
            (None, Some(_)) => Err("multi-root workspace has no `folder`".to_string()),
            (None, None) => Err("missing `folder`".to_string()),
        }
    }
}

/// Turn a folder URI into a local filesystem path
///
/// Only `file` URIs name something we can open. Percent-escapes are decoded,
/// nothing else about the path is touched. URI parsing would collapse `.` and
/// `..` segments, so those are refused instead of rewritten.
pub fn folder_to_path(uri: &str) -> std::result::Result<PathBuf, String> {
    let url = Url::parse(uri).map_err(|e| format!("`{}` is not a URI: {}", uri, e))?;

    if url.scheme() != "file" {
        return Err(format!("unsupported URI scheme `{}`", url.scheme()));
    }

    if has_dot_segment(uri) {
        return Err(format!("`{}` contains `.` or `..` segments", uri));
    }

    url.to_file_path()
        .map_err(|_| format!("`{}` does not name a local path", uri))
}

// Looks at the raw path, before the URI parser normalizes it
fn has_dot_segment(uri: &str) -> bool {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let path = rest.find('/').map_or("", |start| &rest[start..]);
    let path = path.split(['?', '#']).next().unwrap_or("");

    path.split('/').any(|segment| {
        let segment = segment.to_ascii_lowercase().replace("%2e", ".");
        segment == "." || segment == ".."
    })
}

/// Read a history record from disk and build its project
///
/// Returns the raw folder URI alongside the descriptor so callers can log it.
pub fn read_record(path: &Path) -> Result<(String, ProjectDescriptor)> {
    let bytes = fs::read(path)?;

    let record = WorkspaceRecord::from_json(&bytes)
        .map_err(|e| ProjectsError::malformed(path, e.to_string()))?;
    let uri = record
        .folder_uri()
        .map_err(|reason| ProjectsError::malformed(path, reason))?;
    let location = folder_to_path(uri).map_err(|reason| ProjectsError::malformed(path, reason))?;

    let mut project = ProjectDescriptor::new(location);
    if let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) {
        project = project.with_last_opened(DateTime::<Utc>::from(modified));
    }

    Ok((uri.to_string(), project))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_record(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(RECORD_FILE_NAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_folder_to_path() {
        assert_eq!(
            folder_to_path("file:///home/u/proj1").unwrap(),
            PathBuf::from("/home/u/proj1")
        );
    }

    #[test]
    fn test_folder_to_path_decodes_escapes() {
        assert_eq!(
            folder_to_path("file:///home/u/my%20project").unwrap(),
            PathBuf::from("/home/u/my project")
        );
    }

    #[test]
    fn test_folder_to_path_rejects_other_schemes() {
        let err = folder_to_path("vscode-remote://ssh-remote+box/home/u/proj").unwrap_err();
        assert!(err.contains("vscode-remote"));
    }

    #[test]
    fn test_folder_to_path_keeps_dot_segments_out() {
        let err = folder_to_path("file:///home/u/proj/../other").unwrap_err();
        assert!(err.contains(".."));
        assert!(folder_to_path("file:///home/u/./proj").is_err());
        assert!(folder_to_path("file:///home/u/proj/%2E%2E/other").is_err());

        // dots inside a name are fine
        assert_eq!(
            folder_to_path("file:///home/u/my.proj..v2").unwrap(),
            PathBuf::from("/home/u/my.proj..v2")
        );
    }

    #[test]
    fn test_folder_to_path_rejects_missing_scheme() {
        assert!(folder_to_path("/home/u/proj").is_err());
    }

    #[test]
    fn test_read_record() {
        let temp = TempDir::new().unwrap();
        let path = write_record(&temp, r#"{"folder":"file:///home/u/proj1"}"#);

        let (uri, project) = read_record(&path).unwrap();
        assert_eq!(uri, "file:///home/u/proj1");
        assert_eq!(project.name(), "proj1");
        assert_eq!(project.location(), Path::new("/home/u/proj1"));
        assert!(project.last_opened().is_some());
    }

    #[test]
    fn test_read_record_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = write_record(&temp, "{not json");

        match read_record(&path) {
            Err(ProjectsError::MalformedRecord { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_read_record_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(RECORD_FILE_NAME);
        fs::write(&path, b"{\"folder\":\"file:///x/\xff\"}").unwrap();

        match read_record(&path) {
            Err(ProjectsError::MalformedRecord { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_read_record_missing_file_is_io() {
        let temp = TempDir::new().unwrap();
        let result = read_record(&temp.path().join(RECORD_FILE_NAME));
        assert!(matches!(result, Err(ProjectsError::Io(_))));
    }

    #[test]
    fn test_read_record_missing_folder() {
        let temp = TempDir::new().unwrap();
        let path = write_record(&temp, r#"{"configuration":"x"}"#);

        match read_record(&path) {
            Err(ProjectsError::MalformedRecord { reason, .. }) => {
                assert!(reason.contains("folder"))
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_read_record_multi_root() {
        let temp = TempDir::new().unwrap();
        let path = write_record(&temp, r#"{"workspace":"file:///home/u/all.code-workspace"}"#);

        match read_record(&path) {
            Err(ProjectsError::MalformedRecord { reason, .. }) => {
                assert!(reason.contains("multi-root"))
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }
}
