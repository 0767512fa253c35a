use std::sync::Arc;
use tracing::debug;

use super::resolver::AttributeResolver;
use super::warnings::{messages, WarningList};
use crate::error::ModelError;
use crate::model::{TypeId, TypeKind, TypeUniverse, Visibility};
use crate::reflection::{MemberHandle, TestClassAttribute};

const TEST_CONTEXT_PROPERTY: &str = "TestContext";

/// Decides whether a type is a discoverable test class.
pub struct TypeValidator {
    universe: Arc<TypeUniverse>,
    resolver: Arc<AttributeResolver>,
    discover_internals: bool,
}

impl TypeValidator {
    pub fn new(
        universe: Arc<TypeUniverse>,
        resolver: Arc<AttributeResolver>,
        discover_internals: bool,
    ) -> Self {
        Self {
            universe,
            resolver,
            discover_internals,
        }
    }

    pub fn is_valid_test_class(
        &self,
        type_id: TypeId,
        warnings: &mut WarningList,
    ) -> Result<bool, ModelError> {
        let ty = self.universe.type_def(type_id);

        if ty.kind != TypeKind::Class {
            return Ok(false);
        }

        if !self
            .resolver
            .is_attribute_defined::<TestClassAttribute>(MemberHandle::Type(type_id), false)
        {
            return Ok(false);
        }

        if !ty.is_abstract && !self.has_valid_accessibility(type_id)? {
            warnings.push(messages::non_public_test_class(&ty.full_name));
            return Ok(false);
        }

        if ty.is_generic_definition && !ty.is_abstract {
            warnings.push(messages::generic_non_abstract_test_class(&ty.full_name));
            return Ok(false);
        }

        if ty.is_abstract {
            debug!(type_name = %ty.full_name, "skipping abstract test class");
            return Ok(false);
        }

        if !self.has_correct_test_context_signature(type_id)? {
            warnings.push(messages::invalid_test_context(&ty.full_name));
            return Ok(false);
        }

        Ok(true)
    }

    /// The type and every enclosing type must be public, or internal when
    /// internals are discoverable.
    pub fn has_valid_accessibility(&self, type_id: TypeId) -> Result<bool, ModelError> {
        Ok(self
            .universe
            .nesting_chain(type_id)?
            .into_iter()
            .all(|id| {
                self.universe
                    .type_def(id)
                    .visibility
                    .is_discoverable(self.discover_internals)
            }))
    }

    /// A `TestContext` property, if present, needs a public instance setter
    /// that is not abstract.
    pub fn has_correct_test_context_signature(&self, type_id: TypeId) -> Result<bool, ModelError> {
        for frame in self.universe.ancestors(type_id)? {
            let property = self
                .universe
                .type_def(frame)
                .properties
                .iter()
                .find(|p| p.name == TEST_CONTEXT_PROPERTY);
            let Some(property) = property else {
                continue;
            };
            if !is_test_context_type(&property.type_name) {
                return Ok(true);
            }
            return Ok(match &property.setter {
                Some(setter) => {
                    setter.visibility == Visibility::Public
                        && !setter.is_static
                        && !setter.is_abstract
                }
                None => false,
            });
        }
        Ok(true)
    }
}

fn is_test_context_type(type_name: &str) -> bool {
    type_name == TEST_CONTEXT_PROPERTY || type_name.ends_with(".TestContext")
}
