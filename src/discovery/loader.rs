use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::error::{AssemblyLoadError, TypeLoadError};
use crate::model::{AssemblyDef, AssemblyId, AssemblyManifest, AttributeData, TypeId, TypeUniverse};

pub const MANIFEST_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// An assembly together with every assembly that could be resolved for it.
#[derive(Debug, Clone)]
pub struct LoadedAssembly {
    universe: Arc<TypeUniverse>,
    id: AssemblyId,
    reflection_only: bool,
}

impl LoadedAssembly {
    pub fn new(universe: Arc<TypeUniverse>, id: AssemblyId, reflection_only: bool) -> Self {
        Self {
            universe,
            id,
            reflection_only,
        }
    }

    pub fn universe(&self) -> &Arc<TypeUniverse> {
        &self.universe
    }

    pub fn id(&self) -> AssemblyId {
        self.id
    }

    pub fn definition(&self) -> &AssemblyDef {
        self.universe.assembly(self.id)
    }

    pub fn name(&self) -> &str {
        &self.definition().name
    }

    pub fn path(&self) -> &Path {
        &self.definition().path
    }

    pub fn is_reflection_only(&self) -> bool {
        self.reflection_only
    }
}

/// Some types of an assembly failed to load; `loaded` holds the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLoadFailure {
    pub loaded: Vec<TypeId>,
    pub errors: Vec<TypeLoadError>,
}

pub trait AssemblyLoader: Send + Sync {
    fn does_file_exist(&self, path: &Path) -> bool;

    fn get_full_file_path(&self, path: &Path) -> PathBuf;

    fn load_assembly(
        &self,
        path: &Path,
        reflection_only: bool,
    ) -> Result<LoadedAssembly, AssemblyLoadError>;

    fn get_custom_attributes(
        &self,
        assembly: &LoadedAssembly,
        attribute_type: &str,
    ) -> Vec<AttributeData> {
        assembly
            .definition()
            .attributes
            .iter()
            .filter(|a| a.is_or_derives_from(attribute_type))
            .cloned()
            .collect()
    }

    fn get_types(&self, assembly: &LoadedAssembly) -> Result<Vec<TypeId>, TypeLoadFailure> {
        let definition = assembly.definition();
        if definition.load_errors().is_empty() {
            Ok(definition.types().to_vec())
        } else {
            Err(TypeLoadFailure {
                loaded: definition.types().to_vec(),
                errors: definition.load_errors().to_vec(),
            })
        }
    }
}

/// Loads assembly manifests from disk, resolving references from manifests
/// placed next to the assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestLoader;

impl ManifestLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_manifest(path: &Path) -> Result<AssemblyManifest, AssemblyLoadError> {
        trace!(path = %path.display(), "reading assembly manifest");
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssemblyLoadError::file_not_found(path)
            } else {
                AssemblyLoadError::read_error(path, e)
            }
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let manifest = match extension {
            "json" => AssemblyManifest::from_json(&content)
                .map_err(|e| AssemblyLoadError::bad_image_format(path, e.to_string()))?,
            "yaml" | "yml" => AssemblyManifest::from_yaml(&content)
                .map_err(|e| AssemblyLoadError::bad_image_format(path, e.to_string()))?,
            _ => AssemblyManifest::from_json(&content)
                .or_else(|_| AssemblyManifest::from_yaml(&content))
                .map_err(|e| AssemblyLoadError::bad_image_format(path, e.to_string()))?,
        };

        if manifest.name.trim().is_empty() {
            return Err(AssemblyLoadError::type_load(path, "assembly name is empty"));
        }
        let mut names = HashSet::new();
        for ty in &manifest.types {
            if !names.insert(ty.full_name.as_str()) {
                return Err(AssemblyLoadError::type_load(
                    path,
                    format!("type '{}' is defined more than once", ty.full_name),
                ));
            }
        }

        Ok(manifest)
    }

    pub fn find_sibling(directory: &Path, assembly_name: &str) -> Option<PathBuf> {
        MANIFEST_EXTENSIONS
            .iter()
            .map(|ext| directory.join(format!("{assembly_name}.{ext}")))
            .find(|candidate| candidate.is_file())
    }
}

impl AssemblyLoader for ManifestLoader {
    fn does_file_exist(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn get_full_file_path(&self, path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    }

    fn load_assembly(
        &self,
        path: &Path,
        reflection_only: bool,
    ) -> Result<LoadedAssembly, AssemblyLoadError> {
        let full_path = self.get_full_file_path(path);
        let manifest = Self::read_manifest(&full_path)?;
        let directory = full_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut visited = HashSet::from([manifest.name.clone()]);
        let mut queue: VecDeque<String> = manifest.references.iter().cloned().collect();
        let mut builder = TypeUniverse::builder();
        builder.push(manifest, &full_path);

        if !reflection_only {
            while let Some(reference) = queue.pop_front() {
                if !visited.insert(reference.clone()) {
                    continue;
                }
                let Some(reference_path) = Self::find_sibling(&directory, &reference) else {
                    trace!(%reference, "referenced assembly not found beside assembly");
                    continue;
                };
                match Self::read_manifest(&reference_path) {
                    Ok(referenced) => {
                        queue.extend(referenced.references.iter().cloned());
                        builder.push(referenced, &reference_path);
                    }
                    Err(error) => {
                        warn!(%reference, %error, "failed to load referenced assembly");
                    }
                }
            }
        }

        let universe = Arc::new(builder.build());
        let (id, definition) = universe
            .assemblies()
            .next()
            .map(|(id, def)| (id, def.name.clone()))
            .ok_or_else(|| AssemblyLoadError::type_load(&full_path, "no assembly loaded"))?;
        debug!(assembly = %definition, reflection_only, "loaded assembly");

        Ok(LoadedAssembly::new(universe, id, reflection_only))
    }
}
