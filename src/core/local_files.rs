use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// Name matching follows shell conventions: case-sensitive, and a leading
/// wildcard never matches dot-prefixed names.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Trait for the filesystem operations the rewrite pipeline needs.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Immediate subdirectories of `dir`, in filesystem order.
    fn list_subdirs(&self, dir: &Path) -> Result<Vec<PathBuf>>;
    /// Entries of `dir` whose name matches `pattern`, in filesystem order.
    ///
    /// Matches on the name only. A directory with a matching name is
    /// returned too and surfaces as a read error downstream.
    fn list_matching(&self, dir: &Path, pattern: &Pattern) -> Result<Vec<PathBuf>>;
}

/// Local filesystem implementation
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::internal_io(
                    format!("File not found: {}", path.display()),
                    Some("read file".to_string()),
                )
            } else {
                Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
            }
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        // Atomic write: write to temp file, then rename
        let parent = path.parent().ok_or_else(|| {
            Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some("write file".to_string()),
            )
        })?;

        let filename = path.file_name().ok_or_else(|| {
            Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some("write file".to_string()),
            )
        })?;

        let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

        fs::write(&tmp_path, content)
            .map_err(|e| Error::internal_io(e.to_string(), Some("write temp file".to_string())))?;

        fs::rename(&tmp_path, path)
            .map_err(|e| Error::internal_io(e.to_string(), Some("rename temp file".to_string())))?;

        Ok(())
    }

    fn list_subdirs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
        })?;

        let mut result = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                result.push(path);
            }
        }

        Ok(result)
    }

    fn list_matching(&self, dir: &Path, pattern: &Pattern) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
        })?;

        let mut result = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if pattern.matches_with(name, MATCH_OPTIONS) {
                result.push(path);
            }
        }

        Ok(result)
    }
}

/// Convenience function to get local filesystem
pub fn local() -> LocalFs {
    LocalFs::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        let fs = local();

        fs.write(&path, "<html></html>").unwrap();
        assert_eq!(fs.read(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        let fs = local();

        fs.write(&path, "content").unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("page.html.tmp").exists());
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let fs = local();

        let err = fs.read(&dir.path().join("absent.html")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalIoError);
        assert!(err.cause().contains("File not found"));
    }

    #[test]
    fn list_subdirs_skips_files() {
        let dir = tempdir().unwrap();
        let fs = local();

        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::create_dir(dir.path().join("beta")).unwrap();
        fs.write(&dir.path().join("stray.html"), "x").unwrap();

        let mut names: Vec<String> = fs
            .list_subdirs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn list_subdirs_includes_hidden_dirs() {
        let dir = tempdir().unwrap();
        let fs = local();

        std::fs::create_dir(dir.path().join(".hidden")).unwrap();
        std::fs::create_dir(dir.path().join("visible")).unwrap();

        let mut names: Vec<String> = fs
            .list_subdirs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec![".hidden", "visible"]);
    }

    #[test]
    fn list_matching_filters_by_name_only() {
        let dir = tempdir().unwrap();
        let fs = local();
        let pattern = Pattern::new("*.html").unwrap();

        fs.write(&dir.path().join("a.html"), "x").unwrap();
        fs.write(&dir.path().join("b.txt"), "x").unwrap();
        // Directories with a matching name are listed too
        std::fs::create_dir(dir.path().join("c.html")).unwrap();

        let mut names: Vec<String> = fs
            .list_matching(dir.path(), &pattern)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.html", "c.html"]);
    }

    #[test]
    fn list_matching_skips_dot_files() {
        let dir = tempdir().unwrap();
        let fs = local();
        let pattern = Pattern::new("*.html").unwrap();

        fs.write(&dir.path().join(".draft.html"), "x").unwrap();
        fs.write(&dir.path().join("live.html"), "x").unwrap();

        let names: Vec<String> = fs
            .list_matching(dir.path(), &pattern)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["live.html"]);
    }

    #[test]
    fn list_matching_is_case_sensitive() {
        let dir = tempdir().unwrap();
        let fs = local();
        let pattern = Pattern::new("*.html").unwrap();

        fs.write(&dir.path().join("UPPER.HTML"), "x").unwrap();

        let entries = fs.list_matching(dir.path(), &pattern).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn list_missing_dir_is_io_error() {
        let dir = tempdir().unwrap();
        let fs = local();

        let err = fs.list_subdirs(&dir.path().join("absent")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalIoError);
    }
}
