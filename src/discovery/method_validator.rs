use std::sync::Arc;
use tracing::trace;

use super::resolver::AttributeResolver;
use super::warnings::{messages, WarningList};
use crate::model::{MethodId, TypeId, TypeUniverse};
use crate::reflection::{AsyncStateMachineAttribute, MemberHandle, TestMethodAttribute};

/// Decides whether a method is a runnable test case.
pub struct MethodValidator {
    universe: Arc<TypeUniverse>,
    resolver: Arc<AttributeResolver>,
    discover_internals: bool,
}

impl MethodValidator {
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

    /// Only a generic method definition is reported; every other rejection
    /// just means "not a test".
    pub fn is_valid_test_method(
        &self,
        method_id: MethodId,
        declaring_type: TypeId,
        warnings: &mut WarningList,
    ) -> bool {
        let member = MemberHandle::Method(method_id);
        if !self
            .resolver
            .is_attribute_defined::<TestMethodAttribute>(member, false)
        {
            return false;
        }

        let method = self.universe.method(method_id);
        if method.generic_definition {
            warnings.push(messages::generic_test_method(
                &self.universe.type_def(declaring_type).full_name,
                &method.name,
            ));
            return false;
        }

        if !method.visibility.is_discoverable(self.discover_internals)
            || method.is_abstract
            || method.is_static
        {
            trace!(method = %method.name, "rejected test method by signature");
            return false;
        }

        self.has_valid_return_type(method_id)
    }

    /// `void` (unless async) or a non-generic awaitable.
    fn has_valid_return_type(&self, method_id: MethodId) -> bool {
        let method = self.universe.method(method_id);
        if method.returns_awaitable() {
            return true;
        }
        method.returns_void()
            && !self
                .resolver
                .is_attribute_defined::<AsyncStateMachineAttribute>(
                    MemberHandle::Method(method_id),
                    false,
                )
    }
}
