/// vscode-projects library
///
/// Finds recently opened VS Code projects and filters them for a launcher.

pub mod config;
pub mod core;
pub mod editor;
pub mod error;
pub mod recent;

// Re-exports for convenience
pub use config::Config;
pub use crate::core::{ProjectDescriptor, ProjectDiscovery, ProjectFilter, RecordPolicy};
pub use error::{ProjectsError, Result};
pub use recent::{ProjectMatch, RecentProjects};
