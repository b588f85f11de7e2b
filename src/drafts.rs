use crate::cleanup::Normalizer;
use crate::error::CleanupError;
use ignore::{Walk, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn, Level};

const SAMPLE_PATHS: usize = 5;

pub fn ensure_directory(dir: &Path) -> Result<(), CleanupError> {
    if !dir.exists() {
        return Err(CleanupError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(CleanupError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}

pub fn collect_markdown_files(base: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in walker(base, recursive, true) {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && is_markdown(path) {
                    files.push(path.to_path_buf());
                }
            }
            Err(err) => warn!("skipping unreadable entry: {err}"),
        }
    }

    files.sort();

    debug!(
        base = %base.display(),
        recursive,
        count = files.len(),
        "collected markdown files"
    );
    for sample in files.iter().take(SAMPLE_PATHS) {
        debug!("sample path: {}", sample.display());
    }
    if tracing::enabled!(Level::DEBUG) {
        for skipped in skipped_by_ignore_rules(base, recursive, &files) {
            debug!("skipped by ignore rules: {}", skipped.display());
        }
    }

    files
}

// Markdown files that only a walk without .gitignore/.ignore filtering finds.
// `collected` must be sorted.
fn skipped_by_ignore_rules(base: &Path, recursive: bool, collected: &[PathBuf]) -> Vec<PathBuf> {
    let mut skipped: Vec<PathBuf> = walker(base, recursive, false)
        .flatten()
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_markdown(path))
        .filter(|path| collected.binary_search(path).is_err())
        .collect();
    skipped.sort();
    skipped
}

fn walker(base: &Path, recursive: bool, ignore_rules: bool) -> Walk {
    WalkBuilder::new(base)
        .standard_filters(ignore_rules)
        .hidden(false)
        .git_global(false)
        .git_exclude(false)
        .max_depth(if recursive { None } else { Some(1) })
        .build()
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

pub fn clean_file(
    normalizer: &Normalizer,
    path: &Path,
    dry_run: bool,
) -> Result<bool, CleanupError> {
    let original = fs::read_to_string(path).map_err(|source| CleanupError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let cleaned = normalizer.transform(&original);
    if cleaned == original {
        return Ok(false);
    }

    if !dry_run {
        fs::write(path, cleaned).map_err(|source| CleanupError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(true)
}
