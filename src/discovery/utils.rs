use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::loader::MANIFEST_EXTENSIONS;
use crate::error::AssemblyLoadError;

const EXCLUDED_DIRS: &[&str] = &["obj", "node_modules", "target"];

/// Expands a CLI `--path` into the assembly manifests to discover.
///
/// A file is returned as-is. A directory is walked recursively for
/// `*.json`, `*.yaml` and `*.yml` files, skipping hidden entries and build
/// output folders. The result is sorted so runs are reproducible.
pub fn collect_assembly_paths(root: &Path) -> Result<Vec<PathBuf>, AssemblyLoadError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.exists() {
        return Err(AssemblyLoadError::file_not_found(root));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        if e.depth() == 0 {
            return true;
        }
        let name = e.file_name().to_string_lossy();
        if name.starts_with('.') {
            return false;
        }
        !(e.file_type().is_dir() && EXCLUDED_DIRS.contains(&name.as_ref()))
    });

    for entry in walker {
        let entry = entry.map_err(|source| AssemblyLoadError::DirectoryScan {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_manifest(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

pub fn is_manifest(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext))
}
