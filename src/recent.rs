/// Recent projects across editors
///
/// Glue between discovery, filtering and the editors: answers a trigger query
/// with (editor, project) pairs the launcher can show and open.

use crate::config::Config;
use crate::core::{ProjectDescriptor, ProjectDiscovery, ProjectFilter};
use crate::editor::{launch, Editor, EditorDetector};
use crate::error::{ProjectsError, Result};
use tracing::debug;

/// One project offered by one editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMatch<'a> {
    pub editor: &'a Editor,
    pub project: ProjectDescriptor,
}

impl ProjectMatch<'_> {
    /// Stable item id: `<binary>-<location>`
    pub fn id(&self) -> String {
        format!(
            "{}-{}",
            self.editor.binary(),
            self.project.location().display()
        )
    }

    /// Open the project in its editor
    pub fn open(&self) -> Result<()> {
        launch(self.editor.binary(), self.project.location())
    }
}

/// Answers queries against every available editor's history
pub struct RecentProjects {
    editors: Vec<Editor>,
    discovery: ProjectDiscovery,
    existing_only: bool,
}

impl RecentProjects {
    /// Create a query handler over already resolved editors
    pub fn new(editors: Vec<Editor>, discovery: ProjectDiscovery, existing_only: bool) -> Self {
        Self {
            editors,
            discovery,
            existing_only,
        }
    }

    /// Detect editors and set up discovery from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            EditorDetector::detect_all(config),
            ProjectDiscovery::new(config.on_malformed),
            config.existing_only,
        )
    }

    pub fn editors(&self) -> &[Editor] {
        &self.editors
    }

    /// Find projects whose name contains `query`
    ///
    /// Discovery runs fresh on every call. Results are grouped by editor,
    /// each group in discovery order.
    pub fn query(&self, query: &str) -> Result<Vec<ProjectMatch<'_>>> {
        let mut matches = Vec::new();

        for editor in &self.editors {
            let projects = self.discovery.discover(editor.storage_root())?;
            let projects = ProjectFilter::filter(&projects, self.existing_only, query);
            debug!(editor = editor.name(), query, count = projects.len(), "query matched");

            matches.extend(
                projects
                    .into_iter()
                    .map(|project| ProjectMatch { editor, project }),
            );
        }

        Ok(matches)
    }

    /// Find the first project with exactly this name (ignoring case)
    pub fn find(&self, name: &str) -> Result<ProjectMatch<'_>> {
        let wanted = name.to_lowercase();

        self.query(name)?
            .into_iter()
            .find(|m| m.project.name().to_lowercase() == wanted)
            .ok_or_else(|| ProjectsError::ProjectNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordPolicy;
    use crate::editor::EditorKind;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn add_record(root: &Path, dir: &str, folder: &Path) {
        let record_dir = root.join(dir);
        fs::create_dir_all(&record_dir).unwrap();
        let uri = url::Url::from_file_path(folder).unwrap();
        fs::write(
            record_dir.join("workspace.json"),
            format!(r#"{{"folder":"{}"}}"#, uri),
        )
        .unwrap();
    }

    struct Fixture {
        _temp: TempDir,
        projects_dir: std::path::PathBuf,
        code_storage: std::path::PathBuf,
        codium_storage: std::path::PathBuf,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let projects_dir = temp.path().join("projects");
        let code_storage = temp.path().join("code");
        let codium_storage = temp.path().join("codium");

        for name in ["webapp", "api"] {
            fs::create_dir_all(projects_dir.join(name)).unwrap();
        }

        add_record(&code_storage, "1", &projects_dir.join("webapp"));
        add_record(&code_storage, "2", &projects_dir.join("deleted-app"));
        add_record(&codium_storage, "1", &projects_dir.join("api"));

        Fixture {
            _temp: temp,
            projects_dir,
            code_storage,
            codium_storage,
        }
    }

    fn recent(fx: &Fixture, existing_only: bool) -> RecentProjects {
        RecentProjects::new(
            vec![
                Editor::new(EditorKind::Code, "code", &fx.code_storage),
                Editor::new(EditorKind::VSCodium, "codium", &fx.codium_storage),
            ],
            ProjectDiscovery::new(RecordPolicy::Skip),
            existing_only,
        )
    }

    #[test]
    fn test_query_pairs_editor_and_project() {
        let fx = fixture();
        let recent = recent(&fx, true);

        let matches = recent.query("").unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].editor.binary(), "code");
        assert_eq!(matches[0].project.name(), "webapp");
        assert_eq!(matches[1].editor.binary(), "codium");
        assert_eq!(matches[1].project.name(), "api");
    }

    #[test]
    fn test_query_filters_by_name() {
        let fx = fixture();
        let recent = recent(&fx, true);

        let matches = recent.query("APP").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].project.name(), "webapp");
    }

    #[test]
    fn test_query_can_include_stale() {
        let fx = fixture();
        let recent = recent(&fx, false);

        let matches = recent.query("app").unwrap();
        let mut names: Vec<&str> = matches.iter().map(|m| m.project.name()).collect();
        names.sort();
        assert_eq!(names, vec!["deleted-app", "webapp"]);
    }

    #[test]
    fn test_match_id() {
        let fx = fixture();
        let recent = recent(&fx, true);

        let found = recent.find("api").unwrap();
        assert_eq!(
            found.id(),
            format!("codium-{}", fx.projects_dir.join("api").display())
        );
    }

    #[test]
    fn test_find_is_exact() {
        let fx = fixture();
        let recent = recent(&fx, true);

        assert_eq!(recent.find("WebApp").unwrap().project.name(), "webapp");
        assert!(matches!(
            recent.find("web"),
            Err(ProjectsError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_no_editors_no_matches() {
        let recent = RecentProjects::new(Vec::new(), ProjectDiscovery::default(), true);
        assert!(recent.query("").unwrap().is_empty());
    }
}
