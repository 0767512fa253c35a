use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::attributes::AttributeData;
use super::manifest::{
    AssemblyManifest, MethodDef, MethodSlot, PropertyDef, TypeKind, Visibility,
};
use crate::error::{ModelError, TypeLoadError};

const ROOT_TYPES: &[&str] = &["System.Object", "System.ValueType", "System.Enum"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId {
    pub type_id: TypeId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct AssemblyDef {
    pub name: String,
    pub path: PathBuf,
    pub references: Vec<String>,
    pub attributes: Vec<AttributeData>,
    types: Vec<TypeId>,
    load_errors: Vec<TypeLoadError>,
}

impl AssemblyDef {
    /// Types that loaded successfully, in declaration order.
    pub fn types(&self) -> &[TypeId] {
        &self.types
    }

    pub fn load_errors(&self) -> &[TypeLoadError] {
        &self.load_errors
    }
}

#[derive(Debug, Clone)]
pub struct TypeDef {
    pub full_name: String,
    pub assembly: AssemblyId,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_generic_definition: bool,
    pub declaring_type: Option<TypeId>,
    pub base_type: Option<TypeId>,
    pub attributes: Vec<AttributeData>,
    pub methods: Vec<MethodDef>,
    pub properties: Vec<PropertyDef>,
}

impl TypeDef {
    pub fn is_nested(&self) -> bool {
        self.declaring_type.is_some()
    }
}

/// Arena of every type from a set of loaded assemblies, linked by base and
/// declaring-type handles.
#[derive(Debug, Default)]
pub struct TypeUniverse {
    assemblies: Vec<AssemblyDef>,
    types: Vec<TypeDef>,
    index: HashMap<String, TypeId>,
}

impl TypeUniverse {
    pub fn builder() -> UniverseBuilder {
        UniverseBuilder::default()
    }

    pub fn assembly(&self, id: AssemblyId) -> &AssemblyDef {
        &self.assemblies[id.0]
    }

    pub fn assemblies(&self) -> impl Iterator<Item = (AssemblyId, &AssemblyDef)> {
        self.assemblies
            .iter()
            .enumerate()
            .map(|(i, a)| (AssemblyId(i), a))
    }

    pub fn find_assembly(&self, name: &str) -> Option<AssemblyId> {
        self.assemblies
            .iter()
            .position(|a| a.name == name)
            .map(AssemblyId)
    }

    pub fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0]
    }

    pub fn find_type(&self, full_name: &str) -> Option<TypeId> {
        self.index.get(strip_generic_arguments(full_name)).copied()
    }

    pub fn method(&self, id: MethodId) -> &MethodDef {
        &self.types[id.type_id.0].methods[id.index]
    }

    pub fn methods_of(&self, id: TypeId) -> impl Iterator<Item = (MethodId, &MethodDef)> {
        self.types[id.0]
            .methods
            .iter()
            .enumerate()
            .map(move |(index, m)| (MethodId { type_id: id, index }, m))
    }

    /// `Namespace.Type.Method`, for diagnostics.
    pub fn method_display_name(&self, id: MethodId) -> String {
        format!(
            "{}.{}",
            self.type_def(id.type_id).full_name,
            self.method(id).name
        )
    }

    /// The type followed by its base types, most-derived first.
    pub fn ancestors(&self, id: TypeId) -> Result<Vec<TypeId>, ModelError> {
        let mut chain = vec![id];
        let mut seen = HashSet::from([id]);
        let mut current = self.type_def(id).base_type;
        while let Some(base) = current {
            if !seen.insert(base) {
                return Err(ModelError::inheritance_cycle(&self.type_def(id).full_name));
            }
            chain.push(base);
            current = self.type_def(base).base_type;
        }
        Ok(chain)
    }

    /// The type followed by its enclosing types, innermost first.
    pub fn nesting_chain(&self, id: TypeId) -> Result<Vec<TypeId>, ModelError> {
        let mut chain = vec![id];
        let mut seen = HashSet::from([id]);
        let mut current = self.type_def(id).declaring_type;
        while let Some(outer) = current {
            if !seen.insert(outer) {
                return Err(ModelError::nesting_cycle(&self.type_def(id).full_name));
            }
            chain.push(outer);
            current = self.type_def(outer).declaring_type;
        }
        Ok(chain)
    }

    /// Base declarations an overriding method replaces, nearest first. The last
    /// entry is the declaration that introduced the virtual slot.
    pub fn overridden_chain(&self, id: MethodId) -> Result<Vec<MethodId>, ModelError> {
        let mut chain = Vec::new();
        if self.method(id).slot != MethodSlot::Override {
            return Ok(chain);
        }
        let signature = self.method(id).signature();
        let ancestors = self.ancestors(id.type_id)?;
        for &frame in ancestors.iter().skip(1) {
            let found = self
                .methods_of(frame)
                .find(|(_, m)| m.visibility != Visibility::Private && m.signature() == signature);
            if let Some((base_id, base)) = found {
                chain.push(base_id);
                if base.slot != MethodSlot::Override {
                    break;
                }
            }
        }
        Ok(chain)
    }
}

#[derive(Debug, Default)]
pub struct UniverseBuilder {
    entries: Vec<(AssemblyManifest, PathBuf)>,
}

impl UniverseBuilder {
    pub fn add(mut self, manifest: AssemblyManifest, path: impl AsRef<Path>) -> Self {
        self.entries.push((manifest, path.as_ref().to_path_buf()));
        self
    }

    pub fn push(&mut self, manifest: AssemblyManifest, path: impl AsRef<Path>) {
        self.entries.push((manifest, path.as_ref().to_path_buf()));
    }

    pub fn build(self) -> TypeUniverse {
        let mut universe = TypeUniverse::default();
        let mut pending = Vec::new();

        for (manifest, path) in self.entries {
            let assembly = AssemblyId(universe.assemblies.len());
            universe.assemblies.push(AssemblyDef {
                name: manifest.name.clone(),
                path,
                references: manifest.references,
                attributes: manifest.attributes,
                types: Vec::new(),
                load_errors: Vec::new(),
            });

            for spec in manifest.types {
                let id = TypeId(universe.types.len());
                universe.index.entry(spec.full_name.clone()).or_insert(id);
                pending.push((id, spec.base_type, spec.declaring_type));
                universe.types.push(TypeDef {
                    full_name: spec.full_name,
                    assembly,
                    kind: spec.kind,
                    visibility: spec.visibility,
                    is_abstract: spec.is_abstract,
                    is_generic_definition: spec.generic_definition,
                    declaring_type: None,
                    base_type: None,
                    attributes: spec.attributes,
                    methods: spec.methods,
                    properties: spec.properties,
                });
            }
        }

        let mut failures: HashMap<TypeId, TypeLoadError> = HashMap::new();
        for (id, base, declaring) in pending {
            if let Some(base) = base.filter(|b| !ROOT_TYPES.contains(&b.as_str())) {
                match universe.find_type(&base) {
                    Some(resolved) => universe.types[id.0].base_type = Some(resolved),
                    None => {
                        failures.insert(id, universe.unresolved(id, &base));
                        continue;
                    }
                }
            }
            if let Some(declaring) = declaring {
                match universe.find_type(&declaring) {
                    Some(resolved) => universe.types[id.0].declaring_type = Some(resolved),
                    None => {
                        failures.insert(id, universe.unresolved(id, &declaring));
                    }
                }
            }
        }

        // Anything built on a type that failed to load fails with the same cause.
        loop {
            let mut changed = false;
            for (i, ty) in universe.types.iter().enumerate() {
                let id = TypeId(i);
                if failures.contains_key(&id) {
                    continue;
                }
                let cause = [ty.base_type, ty.declaring_type]
                    .into_iter()
                    .flatten()
                    .find_map(|dep| failures.get(&dep).cloned());
                if let Some(cause) = cause {
                    failures.insert(
                        id,
                        TypeLoadError {
                            type_name: ty.full_name.clone(),
                            message: cause.message,
                        },
                    );
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        for i in 0..universe.types.len() {
            let id = TypeId(i);
            let assembly = universe.types[i].assembly.0;
            match failures.remove(&id) {
                Some(error) => universe.assemblies[assembly].load_errors.push(error),
                None => universe.assemblies[assembly].types.push(id),
            }
        }

        universe
    }
}

impl TypeUniverse {
    fn unresolved(&self, id: TypeId, missing: &str) -> TypeLoadError {
        let ty = &self.types[id.0];
        TypeLoadError::unresolved_type(
            &ty.full_name,
            missing,
            &self.assemblies[ty.assembly.0].name,
        )
    }
}

/// `NS.G`1[System.Int32]` names the same definition as `NS.G`1`.
pub fn strip_generic_arguments(name: &str) -> &str {
    match name.find('[') {
        Some(pos) => &name[..pos],
        None => name,
    }
}
