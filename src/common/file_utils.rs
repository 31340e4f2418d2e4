use crate::analyzer::{invalid_root, AnalysisConfig};
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File names that usually hold credentials or key material
static SENSITIVE_FILE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\.env|\.key|\.pem|id_rsa|id_dsa|\.keystore|\.jks|\.pfx|\.p12|\.crt|\.csr|\.der|\.sublime-project|\.sublime-workspace|\.htpasswd)$|^(?:config|credentials)\.json$",
    )
    .expect("sensitive file pattern is valid")
});

/// Totals gathered in one pass over the repository tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeScan {
    pub total_files: usize,
    pub sensitive_files: Vec<String>,
    pub large_files: Vec<String>,
}

/// Validates that the repository root exists and is a directory
pub fn validate_project_path(path: &Path) -> Result<PathBuf> {
    let canonical = match path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            // canonicalize can fail on valid paths (permissions on Windows)
            if path.exists() {
                path.to_path_buf()
            } else {
                return Err(invalid_root(path, format!("path does not exist ({})", e)).into());
            }
        }
    };

    if !canonical.is_dir() {
        return Err(invalid_root(path, "path is not a directory").into());
    }

    Ok(canonical)
}

/// Walks the tree depth-first, skipping excluded directory names.
///
/// Symlinks are followed only while their target stays under `root`. walkdir tracks the
/// ancestor chain so a cyclic link surfaces as an error entry, which is logged and skipped
/// like any other traversal error.
pub fn scan_tree(root: &Path, config: &AnalysisConfig) -> TreeScan {
    let mut scan = TreeScan::default();
    let canonical_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !is_excluded_dir(e, &config.exclude_dirs)
                && !(e.depth() > 0 && link_escapes(e.path(), &canonical_root))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry during walk: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        scan.total_files += 1;
        let relative = get_relative_path(root, entry.path());
        let relative = relative.to_string_lossy().replace('\\', "/");

        if is_sensitive_file_name(&entry.file_name().to_string_lossy()) {
            scan.sensitive_files.push(relative.clone());
        }

        match entry.metadata() {
            Ok(metadata) if metadata.len() > config.large_file_threshold => {
                log::debug!("Large file: {} ({} bytes)", relative, metadata.len());
                scan.large_files.push(relative);
            }
            Ok(_) => {}
            Err(e) => log::debug!("No metadata for {}: {}", relative, e),
        }
    }

    log::debug!(
        "Walked {} files ({} sensitive, {} large)",
        scan.total_files,
        scan.sensitive_files.len(),
        scan.large_files.len()
    );
    scan
}

/// Directories (never the root itself) whose name is in the exclusion set
fn is_excluded_dir(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    exclude_dirs.iter().any(|excluded| *excluded == name)
}

/// A symlink whose resolved target lies outside `within` (or cannot be resolved)
fn link_escapes(path: &Path, within: &Path) -> bool {
    let is_link = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return false;
    }
    match path.canonicalize() {
        Ok(target) if target.starts_with(within) => false,
        Ok(target) => {
            log::warn!(
                "Ignoring {}: link target {} is outside the repository",
                path.display(),
                target.display()
            );
            true
        }
        Err(e) => {
            log::debug!("Ignoring dangling link {}: {}", path.display(), e);
            true
        }
    }
}

pub fn is_sensitive_file_name(file_name: &str) -> bool {
    SENSITIVE_FILE_NAME.is_match(file_name)
}

/// Reads file content with a size limit
pub fn read_file_safe(path: &Path, max_size: usize) -> io::Result<String> {
    let metadata = fs::metadata(path)?;

    if metadata.len() > max_size as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("file too large: {} bytes", metadata.len()),
        ));
    }

    fs::read_to_string(path)
}

/// Reads a candidate file, logging and swallowing any failure.
///
/// A symlinked candidate is read only when its target stays under the candidate's directory.
pub fn read_candidate(path: &Path, max_size: usize) -> Option<String> {
    if !is_readable_file(path) {
        return None;
    }
    let parent = path.parent().and_then(|p| p.canonicalize().ok());
    if parent.is_some_and(|parent| link_escapes(path, &parent)) {
        return None;
    }
    match read_file_safe(path, max_size) {
        Ok(content) => Some(content),
        Err(e) => {
            log::warn!("Error reading {}: {}", path.display(), e);
            None
        }
    }
}

/// Checks if a file exists and is readable
pub fn is_readable_file(path: &Path) -> bool {
    path.is_file() && fs::metadata(path).is_ok()
}

/// Gets the relative path from root to target
pub fn get_relative_path(root: &Path, target: &Path) -> PathBuf {
    target.strip_prefix(root).unwrap_or(target).to_path_buf()
}

/// Files directly under `root` with one of the given extensions
pub fn find_root_files_with_extensions(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let mut files = Vec::new();

    for extension in extensions {
        let pattern = format!("{}/*.{}", escaped_root, extension);
        match glob::glob(&pattern) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    if entry.is_file() {
                        files.push(entry);
                    }
                }
            }
            Err(e) => log::warn!("Invalid glob pattern {}: {}", pattern, e),
        }
    }

    files.sort();
    files.dedup();
    files
}
