//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Find files matching glob-style name patterns directly inside `base`.
pub fn glob_files(base: &Path, patterns: &[&str]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in glob(&pattern_str)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Copy a file into a directory, preserving its file name.
pub fn copy_into(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = src
        .file_name()
        .with_context(|| format!("path has no file name: {}", src.display()))?;
    let dest = dest_dir.join(file_name);
    fs::copy(src, &dest).with_context(|| {
        format!("failed to copy {} to {}", src.display(), dest.display())
    })?;
    Ok(dest)
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files_matches_only_patterns() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("clr.so"), "").unwrap();
        fs::write(tmp.path().join("clr.pdb"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let files = glob_files(tmp.path(), &["clr.*"]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["clr.pdb", "clr.so"]);
    }

    #[test]
    fn test_copy_into_preserves_name() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("install");
        fs::create_dir_all(&dest).unwrap();
        let src = tmp.path().join("Python.Runtime.dll");
        fs::write(&src, "assembly").unwrap();

        let copied = copy_into(&src, &dest).unwrap();
        assert_eq!(copied, dest.join("Python.Runtime.dll"));
        assert_eq!(fs::read_to_string(copied).unwrap(), "assembly");
    }
}
