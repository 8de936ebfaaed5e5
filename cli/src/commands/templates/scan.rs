use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub fn is_playbook_file(file_name: Option<&str>) -> bool {
    match file_name {
        // Skip hidden files
        Some(name) if name.starts_with('.') => false,
        Some(name) => name.ends_with(".yaml") || name.ends_with(".yml"),
        None => false,
    }
}

/// Lists the playbooks directly inside `dir`, sorted by file name.
pub fn scan_playbooks(dir: &Path) -> Result<Vec<PathBuf>, String> {
    if !dir.is_dir() {
        return Err(format!("Playbook directory not found: {}", dir.display()));
    }

    let mut playbooks = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| format!("Failed to scan {}: {}", dir.display(), e))?;
        // Symlinks count when they resolve to a regular file.
        if entry.path().is_file() && is_playbook_file(entry.file_name().to_str()) {
            playbooks.push(entry.into_path());
        }
    }

    Ok(playbooks)
}

/// The playbook path AWX should run: relative to `base` when it lives
/// under it, with forward slashes.
pub fn source_path_for(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .or_else(|_| path.strip_prefix("."))
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
