/// Project filtering
///
/// Narrows a discovered project list by the live query text.

use crate::core::ProjectDescriptor;

/// Plain case-insensitive substring filter
///
/// No ranking: results come back in input order.
pub struct ProjectFilter;

impl ProjectFilter {
    /// Filter projects by name
    ///
    /// # Arguments
    /// * `projects` - Candidates, usually straight from discovery
    /// * `existing_only` - Drop projects whose location is gone from disk
    /// * `query` - Substring to look for in the project name (empty matches all)
    pub fn filter(
        projects: &[ProjectDescriptor],
        existing_only: bool,
        query: &str,
    ) -> Vec<ProjectDescriptor> {
        let needle = query.to_lowercase();

        projects
            .iter()
            .filter(|project| !existing_only || project.exists())
            .filter(|project| Self::name_contains(project.name(), &needle))
            .cloned()
            .collect()
    }

    // `needle` must already be lowercase
    fn name_contains(name: &str, needle: &str) -> bool {
        needle.is_empty() || name.to_lowercase().contains(needle)
    }
}
