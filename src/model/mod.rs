//! Explicit metadata model for compiled assemblies: the attribute data,
//! the on-disk manifest format, and the linked type arena built from it.

pub mod attributes;
pub mod manifest;
pub mod universe;

pub use attributes::{AttributeData, AttributeValue};
pub use manifest::{
    AccessorDef, AssemblyManifest, MethodDef, MethodSignature, MethodSlot, PropertyDef, TypeKind,
    TypeSpec, Visibility,
};
pub use universe::{AssemblyDef, AssemblyId, MethodId, TypeDef, TypeId, TypeUniverse};

#[cfg(test)]
pub(crate) fn universe_from_yaml(manifests: &[&str]) -> TypeUniverse {
    let mut builder = TypeUniverse::builder();
    for (i, yaml) in manifests.iter().enumerate() {
        let manifest = AssemblyManifest::from_yaml(yaml).expect("test manifest parses");
        builder.push(manifest, format!("/bin/asm{i}.yaml"));
    }
    builder.build()
}
