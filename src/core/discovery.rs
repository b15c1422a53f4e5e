/// Recent project discovery
///
/// Walks an editor's workspace storage, reads every `workspace.json` history
/// record and turns the folder it names into a ProjectDescriptor.

use crate::core::record::{read_record, RECORD_FILE_NAME};
use crate::core::ProjectDescriptor;
use crate::error::{ProjectsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// What to do with a history record that can't be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPolicy {
    /// Log it, remember it in the report and keep going
    #[default]
    Skip,
    /// Fail the whole discovery pass
    Abort,
}

/// A history record that was left out of the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one discovery pass
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Projects in traversal order
    pub projects: Vec<ProjectDescriptor>,
    /// Unreadable entries, plus bad records under RecordPolicy::Skip
    pub skipped: Vec<SkippedRecord>,
}

/// Finds recent projects in a workspace storage directory
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectDiscovery {
    policy: RecordPolicy,
}

impl ProjectDiscovery {
    /// Create a discovery pass with the given record policy
    pub fn new(policy: RecordPolicy) -> Self {
        Self { policy }
    }

    /// Discover projects under `storage_root`
    ///
    /// A missing root yields no projects. Results keep the order the
    /// directory walk found them in.
    ///
    /// # Examples
    /// ```no_run
    /// use vscode_projects_lib::core::ProjectDiscovery;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let projects = ProjectDiscovery::default()
    ///     .discover("/home/me/.config/Code/User/workspaceStorage")?;
    /// for project in projects {
    ///     println!("{} -> {}", project.name(), project.location().display());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn discover<P: AsRef<Path>>(&self, storage_root: P) -> Result<Vec<ProjectDescriptor>> {
        self.discover_with_report(storage_root)
            .map(|report| report.projects)
    }

    /// Discover projects and also report the records that were skipped
    pub fn discover_with_report<P: AsRef<Path>>(&self, storage_root: P) -> Result<DiscoveryReport> {
        let storage_root = storage_root.as_ref();
        let mut report = DiscoveryReport::default();

        if !storage_root.exists() {
            debug!(root = %storage_root.display(), "workspace storage missing");
            return Ok(report);
        }

        let mut folders = Vec::new();

        for entry in WalkDir::new(storage_root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    Self::note_walk_error(&mut report, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || entry.file_name() != RECORD_FILE_NAME {
                continue;
            }

            match read_record(entry.path()) {
                Ok((uri, project)) => {
                    folders.push(uri);
                    report.projects.push(project);
                }
                Err(e) => self.skip(&mut report, entry.path().to_path_buf(), e)?,
            }
        }

        debug!(?folders, "workspace folders");
        debug!(
            root = %storage_root.display(),
            found = report.projects.len(),
            skipped = report.skipped.len(),
            "discovery finished"
        );

        Ok(report)
    }

    // Unreadable directories never abort the pass, whatever the policy
    fn note_walk_error(report: &mut DiscoveryReport, err: walkdir::Error) {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let reason = ProjectsError::from(err).to_string();

        warn!(path = %path.display(), %reason, "skipping unreadable entry");
        report.skipped.push(SkippedRecord { path, reason });
    }

    // Apply the record policy to a bad record
    fn skip(&self, report: &mut DiscoveryReport, path: PathBuf, err: ProjectsError) -> Result<()> {
        if self.policy == RecordPolicy::Abort {
            return Err(err);
        }

        let reason = match err {
            ProjectsError::MalformedRecord { reason, .. } => reason,
            other => other.to_string(),
        };
        warn!(path = %path.display(), %reason, "skipping workspace record");
        report.skipped.push(SkippedRecord { path, reason });

        Ok(())
    }
}
