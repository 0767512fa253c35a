//! Member-hiding and overriding resolution across an inheritance chain.
//!
//! Frames are walked from the most-derived type to the root. For every
//! signature only the first declaration seen survives: a re-declaration in a
//! derived type hides the base one, and an override replaces the virtual it
//! overrides. For overrides the frame that introduced the virtual slot is
//! remembered separately.

use std::collections::HashSet;

use crate::error::ModelError;
use crate::model::{MethodId, TypeId, TypeUniverse, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveMethod {
    pub method: MethodId,
    pub declared_on: TypeId,
    /// For overrides, the type whose declaration introduced the virtual slot.
    pub slot_owner: Option<TypeId>,
}

impl EffectiveMethod {
    /// The type the method's identity is attributed to.
    pub fn owner(&self) -> TypeId {
        self.slot_owner.unwrap_or(self.declared_on)
    }
}

pub fn effective_methods(
    universe: &TypeUniverse,
    type_id: TypeId,
) -> Result<Vec<EffectiveMethod>, ModelError> {
    let ancestors = universe.ancestors(type_id)?;
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for (depth, &frame) in ancestors.iter().enumerate() {
        for (method_id, method) in universe.methods_of(frame) {
            // Private members of base types are not inherited.
            if depth > 0 && method.visibility == Visibility::Private {
                continue;
            }
            if !seen.insert(method.signature()) {
                continue;
            }
            let slot_owner = universe
                .overridden_chain(method_id)?
                .last()
                .map(|base| base.type_id);
            resolved.push(EffectiveMethod {
                method: method_id,
                declared_on: frame,
                slot_owner,
            });
        }
    }

    Ok(resolved)
}
