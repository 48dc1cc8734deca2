//! Public report types for rewrite runs.
//!
//! Every page outcome is an explicit value collected into a run report;
//! console lines and the JSON envelope are both rendered from these types
//! after the run, never printed from inside the pipeline.

use serde::Serialize;

/// Helper for `skip_serializing_if` on zero-value usize fields.
fn is_zero(v: &usize) -> bool {
    *v == 0
}

/// How a run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    ProjectsDirMissing,
}

/// Outcome of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Updated,
    Unchanged,
    Failed,
}

/// Per-page outcome within a project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    /// Page path relative to the site root.
    pub file: String,
    pub status: PageStatus,
    #[serde(skip_serializing_if = "is_zero")]
    pub replacements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// All pages scanned in one project directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub name: String,
    pub pages: Vec<PageReport>,
}

impl ProjectReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
        }
    }

    pub fn record_updated(&mut self, file: String, replacements: usize) {
        self.pages.push(PageReport {
            file,
            status: PageStatus::Updated,
            replacements,
            error: None,
        });
    }

    pub fn record_unchanged(&mut self, file: String) {
        self.pages.push(PageReport {
            file,
            status: PageStatus::Unchanged,
            replacements: 0,
            error: None,
        });
    }

    pub fn record_failed(&mut self, file: String, error: String) {
        self.pages.push(PageReport {
            file,
            status: PageStatus::Failed,
            replacements: 0,
            error: Some(error),
        });
    }
}

/// Summary counts for the run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteSummary {
    pub projects_scanned: usize,
    pub pages_scanned: usize,
    pub pages_updated: usize,
    pub pages_unchanged: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub errors: usize,
}

impl RewriteSummary {
    /// Tally counters from per-project page outcomes.
    pub fn tally(projects: &[ProjectReport]) -> Self {
        let mut summary = Self {
            projects_scanned: projects.len(),
            ..Self::default()
        };

        for project in projects {
            for page in &project.pages {
                summary.pages_scanned += 1;
                match page.status {
                    PageStatus::Updated => summary.pages_updated += 1,
                    PageStatus::Unchanged => summary.pages_unchanged += 1,
                    PageStatus::Failed => summary.errors += 1,
                }
            }
        }

        summary
    }
}

/// Complete result of one rewrite run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteReport {
    pub status: RunStatus,
    /// The projects directory that was scanned.
    pub projects_dir: String,
    /// Whether changes were written to disk (false on a dry run).
    pub applied: bool,
    pub projects: Vec<ProjectReport>,
    pub summary: RewriteSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}
