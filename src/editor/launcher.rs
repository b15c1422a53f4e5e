// Starts an editor on a project folder.
//
// The editor is spawned detached: we don't wait for it and don't keep its
// output around.

use crate::error::{ProjectsError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

/// Run `<binary> <location>` in the background
pub fn launch(binary: &str, location: &Path) -> Result<()> {
    Command::new(binary)
        .arg(location)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ProjectsError::LaunchFailed {
            binary: binary.to_string(),
            source,
        })?;

    info!(binary, location = %location.display(), "launched editor");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_launch_existing_binary() {
        let temp = TempDir::new().unwrap();
        assert!(launch("true", temp.path()).is_ok());
    }

    #[test]
    fn test_launch_missing_binary() {
        let temp = TempDir::new().unwrap();
        let result = launch("definitely-not-an-editor-binary", temp.path());

        match result {
            Err(ProjectsError::LaunchFailed { binary, .. }) => {
                assert_eq!(binary, "definitely-not-an-editor-binary")
            }
            other => panic!("Expected LaunchFailed error, got {:?}", other),
        }
    }
}
