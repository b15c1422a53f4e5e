/// Core functionality modules
///
/// Contains the main logic for discovering recent projects from workspace
/// storage and filtering them by query.

pub mod discovery;
pub mod filter;
pub mod project;
pub mod record;

pub use discovery::{DiscoveryReport, ProjectDiscovery, RecordPolicy, SkippedRecord};
pub use filter::ProjectFilter;
pub use project::ProjectDescriptor;
pub use record::WorkspaceRecord;
