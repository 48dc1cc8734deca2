use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use reroot::local_files::local;
use reroot::output::{PageStatus, RewriteReport, RunStatus};
use reroot::rewrite::{self, RewriteOptions};
use reroot::rules::RuleSet;

use super::CmdResult;

#[derive(Args, Debug, Default)]
pub struct RewriteArgs {
    /// Site root containing the projects/ directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOutput {
    pub command: &'static str,
    pub dry_run: bool,
    pub files_updated: usize,
    pub report: RewriteReport,
}

pub fn run(args: RewriteArgs) -> CmdResult<RewriteOutput> {
    let root = args.root.unwrap_or_else(|| PathBuf::from("."));
    let rules = RuleSet::builtin()?;
    let fs = local();
    let options = RewriteOptions {
        dry_run: args.dry_run,
    };

    let report = rewrite::rewrite_projects(&fs, &root, &rules, &options)?;

    Ok((
        RewriteOutput {
            command: "rewrite",
            dry_run: args.dry_run,
            files_updated: report.summary.pages_updated,
            report,
        },
        0,
    ))
}

pub fn run_console(args: RewriteArgs) -> reroot::Result<(String, i32)> {
    let (output, exit_code) = run(args)?;
    Ok((render(&output.report), exit_code))
}

/// Render the console report: a `Processing:` header per project, one line
/// per updated or failed page, and a trailing update count. A missing
/// projects directory prints only its diagnostic line. Unchanged pages are
/// not listed.
pub fn render(report: &RewriteReport) -> String {
    let mut out = String::new();

    if report.status == RunStatus::ProjectsDirMissing {
        out.push_str("Projects directory not found!\n");
        return out;
    }

    let verb = if report.applied {
        "Updated"
    } else {
        "Would update"
    };

    for project in &report.projects {
        out.push_str(&format!("\nProcessing: {}\n", project.name));
        for page in &project.pages {
            match page.status {
                PageStatus::Updated => {
                    out.push_str(&format!("✓ {}: {}\n", verb, page.file));
                }
                PageStatus::Failed => {
                    out.push_str(&format!(
                        "✗ Error updating {}: {}\n",
                        page.file,
                        page.error.as_deref().unwrap_or("unknown error")
                    ));
                }
                PageStatus::Unchanged => {}
            }
        }
    }

    out.push_str(&format!(
        "\n✓ {} {} files\n",
        verb, report.summary.pages_updated
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reroot::output::{ProjectReport, RewriteSummary};
    use tempfile::tempdir;

    fn completed_report(projects: Vec<ProjectReport>, applied: bool) -> RewriteReport {
        let summary = RewriteSummary::tally(&projects);
        RewriteReport {
            status: RunStatus::Completed,
            projects_dir: "projects".to_string(),
            applied,
            projects,
            summary,
            hints: Vec::new(),
        }
    }

    #[test]
    fn render_lists_updates_per_project() {
        let mut alpha = ProjectReport::new("alpha");
        alpha.record_updated("projects/alpha/index.html".to_string(), 3);
        alpha.record_unchanged("projects/alpha/about.html".to_string());

        let mut beta = ProjectReport::new("beta");
        beta.record_failed(
            "projects/beta/bad.html".to_string(),
            "Is a directory (os error 21)".to_string(),
        );

        let text = render(&completed_report(vec![alpha, beta], true));
        assert_eq!(
            text,
            "\nProcessing: alpha\n\
             ✓ Updated: projects/alpha/index.html\n\
             \nProcessing: beta\n\
             ✗ Error updating projects/beta/bad.html: Is a directory (os error 21)\n\
             \n✓ Updated 1 files\n"
        );
    }

    #[test]
    fn render_missing_projects_dir_prints_only_diagnostic() {
        let report = RewriteReport {
            status: RunStatus::ProjectsDirMissing,
            projects_dir: "projects".to_string(),
            applied: true,
            projects: Vec::new(),
            summary: RewriteSummary::default(),
            hints: vec!["Run from the site directory".to_string()],
        };

        assert_eq!(render(&report), "Projects directory not found!\n");
    }

    #[test]
    fn render_empty_project_prints_header_only() {
        let text = render(&completed_report(vec![ProjectReport::new("empty")], true));
        assert_eq!(text, "\nProcessing: empty\n\n✓ Updated 0 files\n");
    }

    #[test]
    fn render_dry_run_uses_would_update() {
        let mut alpha = ProjectReport::new("alpha");
        alpha.record_updated("projects/alpha/index.html".to_string(), 1);

        let text = render(&completed_report(vec![alpha], false));
        assert!(text.contains("✓ Would update: projects/alpha/index.html"));
        assert!(text.ends_with("\n✓ Would update 1 files\n"));
    }

    #[test]
    fn run_against_tempdir_site() {
        let dir = tempdir().unwrap();
        let alpha = dir.path().join("projects").join("alpha");
        std::fs::create_dir_all(&alpha).unwrap();
        std::fs::write(alpha.join("index.html"), r#"<a href="index.html">"#).unwrap();

        let args = RewriteArgs {
            root: Some(dir.path().to_path_buf()),
            dry_run: false,
        };
        let (output, exit_code) = run(args).unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(output.command, "rewrite");
        assert_eq!(output.files_updated, 1);
        assert_eq!(
            std::fs::read_to_string(alpha.join("index.html")).unwrap(),
            r#"<a href="../../index.html">"#
        );
    }

    #[test]
    fn run_missing_projects_dir_exits_zero() {
        let dir = tempdir().unwrap();

        let args = RewriteArgs {
            root: Some(dir.path().to_path_buf()),
            dry_run: false,
        };
        let (output, exit_code) = run(args).unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(output.report.status, RunStatus::ProjectsDirMissing);
        assert_eq!(output.files_updated, 0);
    }
}
