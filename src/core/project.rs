/// Project descriptor
///
/// A normalized (name, location) pair for one recently opened project.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One discoverable project
///
/// The name is always derived from the location, so the two can't drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    name: String,
    location: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_opened: Option<DateTime<Utc>>,
}

impl ProjectDescriptor {
    /// Create a descriptor for the project rooted at `location`
    pub fn new<P: Into<PathBuf>>(location: P) -> Self {
        let location = location.into();
        let name = Self::name_for(&location);

        Self {
            name,
            location,
            last_opened: None,
        }
    }

    /// Attach the time the editor last touched this project's history record
    pub fn with_last_opened(mut self, last_opened: DateTime<Utc>) -> Self {
        self.last_opened = Some(last_opened);
        self
    }

    /// Final path segment of the location
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path to the project root
    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn last_opened(&self) -> Option<DateTime<Utc>> {
        self.last_opened
    }

    /// Check whether the project still exists on disk
    ///
    /// Not cached: every call hits the filesystem.
    pub fn exists(&self) -> bool {
        self.location.exists()
    }

    /// Derive the display name from a location
    ///
    /// Uses the last path segment. Paths without one (`/`) fall back to the
    /// whole path so the name is never empty.
    pub fn name_for(location: &Path) -> String {
        location
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.to_string_lossy().into_owned())
    }
}
