use std::collections::{HashSet, VecDeque};
use std::path::Path;
use tracing::trace;

use super::loader::ManifestLoader;
use crate::error::AssemblyLoadError;

/// Decides whether an assembly (transitively) references another one.
pub trait AssemblyReferenceValidator: Send + Sync {
    fn is_assembly_referenced(
        &self,
        candidate_reference: &str,
        source_path: &Path,
    ) -> Result<bool, AssemblyLoadError>;
}

/// Follows `references` through the manifests found beside the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestReferenceValidator;

impl AssemblyReferenceValidator for ManifestReferenceValidator {
    fn is_assembly_referenced(
        &self,
        candidate_reference: &str,
        source_path: &Path,
    ) -> Result<bool, AssemblyLoadError> {
        let source = ManifestLoader::read_manifest(source_path)?;
        if source.name == candidate_reference {
            return Ok(true);
        }
        let directory = source_path.parent().unwrap_or_else(|| Path::new("."));

        let mut visited = HashSet::from([source.name.clone()]);
        let mut queue: VecDeque<String> = source.references.into_iter().collect();
        while let Some(reference) = queue.pop_front() {
            if reference == candidate_reference {
                return Ok(true);
            }
            if !visited.insert(reference.clone()) {
                continue;
            }
            let Some(path) = ManifestLoader::find_sibling(directory, &reference) else {
                continue;
            };
            // An unreadable dependency only ends that branch of the search.
            match ManifestLoader::read_manifest(&path) {
                Ok(manifest) => queue.extend(manifest.references),
                Err(error) => trace!(%reference, %error, "skipping unreadable reference"),
            }
        }

        Ok(false)
    }
}
