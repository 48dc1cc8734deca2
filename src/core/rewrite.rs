//! Reference rewrite pipeline.
//!
//! Drives the rebasing pass over a site checkout:
//! 1. Locate `projects/` under the site root
//! 2. Enumerate project directories and their top-level pages
//! 3. Apply the substitution table to each page
//! 4. Write back pages whose content changed
//!
//! Page failures are contained: a page that cannot be read or written is
//! recorded in the report and the run continues with the next page.

use std::path::Path;

use glob::Pattern;

use crate::error::{Error, Result};
use crate::local_files::FileSystem;
use crate::output::{ProjectReport, RewriteReport, RewriteSummary, RunStatus};
use crate::rules::RuleSet;

/// Directory scanned for project subdirectories, relative to the site root.
pub const PROJECTS_DIR_NAME: &str = "projects";

/// Name pattern for pages eligible for rewriting. Only files directly inside
/// a project directory are considered; nested directories are never scanned.
pub const PAGE_PATTERN: &str = "*.html";

/// Knobs for a rewrite run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
    /// Compute and report without writing anything back.
    pub dry_run: bool,
}

/// Outcome of rewriting a single page.
#[derive(Debug, Clone, Copy)]
pub struct PageOutcome {
    pub changed: bool,
    pub replacements: usize,
}

/// Rewrite one page: read, apply the rules, and write back when the content
/// changed. A page is written at most once per run.
pub fn rewrite_page(
    fs: &dyn FileSystem,
    path: &Path,
    rules: &RuleSet,
    dry_run: bool,
) -> Result<PageOutcome> {
    let original = fs.read(path)?;
    let (updated, replacements) = rules.apply(&original);

    if updated == original {
        return Ok(PageOutcome {
            changed: false,
            replacements: 0,
        });
    }

    if !dry_run {
        fs.write(path, &updated)?;
    }

    Ok(PageOutcome {
        changed: true,
        replacements,
    })
}

/// Run the rewrite pass over every project under `<root>/projects`.
///
/// A missing `projects/` directory is a successful run with
/// `RunStatus::ProjectsDirMissing`, not an error. Enumeration failures do
/// propagate; per-page failures are recorded and skipped.
pub fn rewrite_projects(
    fs: &dyn FileSystem,
    root: &Path,
    rules: &RuleSet,
    options: &RewriteOptions,
) -> Result<RewriteReport> {
    let projects_dir = root.join(PROJECTS_DIR_NAME);
    let applied = !options.dry_run;

    if !fs.exists(&projects_dir) {
        return Ok(RewriteReport {
            status: RunStatus::ProjectsDirMissing,
            projects_dir: projects_dir.display().to_string(),
            applied,
            projects: Vec::new(),
            summary: RewriteSummary::default(),
            hints: vec![format!(
                "Run from the site directory that contains {}/, or pass --root",
                PROJECTS_DIR_NAME
            )],
        });
    }

    let pattern = Pattern::new(PAGE_PATTERN)
        .map_err(|e| Error::internal_unexpected(format!("page pattern: {}", e)))?;

    log_status!("rewrite", "Scanning {}", projects_dir.display());

    let mut projects = Vec::new();

    for dir in fs.list_subdirs(&projects_dir)? {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mut project = ProjectReport::new(name);

        for page in fs.list_matching(&dir, &pattern)? {
            let file = display_relative(&page, root);
            match rewrite_page(fs, &page, rules, options.dry_run) {
                Ok(outcome) if outcome.changed => {
                    project.record_updated(file, outcome.replacements);
                }
                Ok(_) => project.record_unchanged(file),
                Err(err) => {
                    log_status!("rewrite", "Skipping {}: {}", page.display(), err.cause());
                    project.record_failed(file, err.cause().to_string());
                }
            }
        }

        projects.push(project);
    }

    let summary = RewriteSummary::tally(&projects);
    log_status!(
        "rewrite",
        "Complete: {} projects, {} pages, {} updated",
        summary.projects_scanned,
        summary.pages_scanned,
        summary.pages_updated
    );

    Ok(RewriteReport {
        status: RunStatus::Completed,
        projects_dir: projects_dir.display().to_string(),
        applied,
        projects,
        summary,
        hints: Vec::new(),
    })
}

/// Path relative to `root` for reporting, falling back to the full path.
fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
