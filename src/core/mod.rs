// Public modules
pub mod error;
pub mod local_files;
pub mod output;
pub mod rewrite;
pub mod rules;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use local_files::{FileSystem, LocalFs};
pub use output::{PageReport, PageStatus, ProjectReport, RewriteReport, RewriteSummary, RunStatus};
pub use rewrite::{rewrite_page, rewrite_projects, PageOutcome, RewriteOptions};
pub use rules::{RewriteRule, RuleSet};
