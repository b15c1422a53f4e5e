// vscode-projects - open your recent VS Code projects from anywhere
//
// This is the main entry point. Parses CLI args and dispatches to handlers.
// It plays the part of the launcher: query in, list out, open on request.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use vscode_projects_lib::{
    editor::{EditorDetector, EditorKind},
    Config, ProjectDiscovery, ProjectsError, RecentProjects,
};

#[derive(Parser)]
#[command(name = "vscode-projects")]
#[command(about = "Open your recent VS Code projects")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ~/.config/vscode-projects/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent projects whose name contains QUERY
    List {
        /// Text to look for in project names
        #[arg(default_value = "")]
        query: String,
        /// Include projects whose folder no longer exists
        #[arg(long)]
        all: bool,
        /// Only search this editor (code, code-insiders, vscodium)
        #[arg(long)]
        editor: Option<EditorKind>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Open a recent project by name
    Open {
        /// Project name
        name: String,
        /// Only search this editor
        #[arg(long)]
        editor: Option<EditorKind>,
    },
    /// Show detected editors
    Editors,
    /// Scan a workspace storage directory and report unreadable records
    Scan {
        /// Directory to scan
        storage_root: PathBuf,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with listings
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ProjectsError>() {
                Some(err) => eprintln!("✗ {}", err.user_message()),
                None => eprintln!("✗ {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Commands::List {
            query,
            all,
            editor,
            json,
        } => handle_list(config, &query, all, editor, json),
        Commands::Open { name, editor } => handle_open(config, &name, editor),
        Commands::Editors => handle_editors(config),
        Commands::Scan { storage_root } => handle_scan(config, storage_root),
    }
}

fn handle_list(
    mut config: Config,
    query: &str,
    all: bool,
    editor: Option<EditorKind>,
    json: bool,
) -> anyhow::Result<()> {
    if all {
        config.existing_only = false;
    }
    let recent = recent_projects(&config, editor)?;
    let matches = recent.query(query)?;

    if json {
        let projects: Vec<_> = matches.iter().map(|m| &m.project).collect();
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No projects found matching '{}'", query);
        return Ok(());
    }

    println!("\nFound {} project(s):", matches.len());
    println!("{}", "=".repeat(60));
    for (i, m) in matches.iter().enumerate() {
        println!(
            "{:3}. {:<24} {} ({})",
            i + 1,
            m.project.name(),
            m.project.location().display(),
            m.editor.name()
        );
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

fn handle_open(config: Config, name: &str, editor: Option<EditorKind>) -> anyhow::Result<()> {
    let recent = recent_projects(&config, editor)?;
    let found = recent.find(name)?;

    found.open()?;
    println!(
        "✓ Opened {} in {}",
        found.project.location().display(),
        found.editor.name()
    );

    Ok(())
}

fn handle_editors(config: Config) -> anyhow::Result<()> {
    let recent = RecentProjects::from_config(&config);

    println!("\nEditors");
    println!("{}", "=".repeat(60));
    for kind in EditorKind::ALL {
        match recent.editors().iter().find(|e| e.kind() == kind) {
            Some(editor) => {
                println!(
                    "  {:<18} ✓ {} ({})",
                    kind.display_name(),
                    editor.binary(),
                    editor.storage_root().display()
                );
                if let Some(icon) = editor.icon() {
                    println!("  {:<18}   icon: {}", "", icon.display());
                }
            }
            None => println!("  {:<18} ✗ Not found", kind.display_name()),
        }
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

fn handle_scan(config: Config, storage_root: PathBuf) -> anyhow::Result<()> {
    let report = ProjectDiscovery::new(config.on_malformed)
        .discover_with_report(&storage_root)
        .with_context(|| format!("scanning {}", storage_root.display()))?;

    println!("\nScanned {}", storage_root.display());
    println!("{}", "=".repeat(60));
    println!("  Projects: {}", report.projects.len());
    println!("  Skipped:  {}", report.skipped.len());
    for skipped in &report.skipped {
        println!("    {} ({})", skipped.path.display(), skipped.reason);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

// Detect editors, optionally narrowed to one kind
fn recent_projects(config: &Config, editor: Option<EditorKind>) -> anyhow::Result<RecentProjects> {
    let editors: Vec<_> = EditorDetector::detect_all(config)
        .into_iter()
        .filter(|e| editor.map_or(true, |kind| e.kind() == kind))
        .collect();

    if editors.is_empty() {
        let wanted = editor.map_or("VS Code", |k| k.display_name()).to_string();
        return Err(ProjectsError::EditorNotFound(wanted).into());
    }

    Ok(RecentProjects::new(
        editors,
        ProjectDiscovery::new(config.on_malformed),
        config.existing_only,
    ))
}
