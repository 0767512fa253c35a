use tracing::{debug, trace};

use super::conditions::{combine, evaluate_conditions, IgnoreDecision};
use super::context::DiscoveryContext;
use super::descriptor::{DeploymentItem, TestMethod, TestMethodDescriptor, Trait};
use super::hierarchy::{effective_methods, EffectiveMethod};
use super::managed_name::format_managed_method_name;
use super::warnings::{messages, WarningList};
use crate::error::{AttributeError, Result};
use crate::model::TypeId;
use crate::reflection::{
    AsyncStateMachineAttribute, ConditionAttribute, CssIterationAttribute,
    CssProjectStructureAttribute, DeploymentItemAttribute, DescriptionAttribute,
    DoNotParallelizeAttribute, MemberHandle, OwnerAttribute, PriorityAttribute,
    TestCategoryAttribute, TestMethodAttribute, TestPropertyAttribute, WorkItemAttribute,
};

const OWNER_TRAIT: &str = "Owner";
const PRIORITY_TRAIT: &str = "Priority";

/// Produces the test descriptors of a single type.
pub struct TypeEnumerator<'a> {
    context: &'a DiscoveryContext,
    type_id: TypeId,
}

impl<'a> TypeEnumerator<'a> {
    pub fn new(context: &'a DiscoveryContext, type_id: TypeId) -> Self {
        Self { context, type_id }
    }

    /// `Ok(None)` when the type is not a test class at all, as opposed to a
    /// test class without tests.
    pub fn enumerate(&self, warnings: &mut WarningList) -> Result<Option<Vec<TestMethodDescriptor>>> {
        let ctx = self.context;
        if !ctx.type_validator.is_valid_test_class(self.type_id, warnings)? {
            return Ok(None);
        }

        let universe = &ctx.universe;
        let ty = universe.type_def(self.type_id);
        let mut tests = Vec::new();

        for effective in effective_methods(universe, self.type_id)? {
            let same_assembly = universe.type_def(effective.declared_on).assembly == ty.assembly;
            if !same_assembly
                && !ctx
                    .settings
                    .enable_base_class_test_methods_from_other_assemblies
            {
                trace!(
                    method = %universe.method_display_name(effective.method),
                    "skipping base class method from another assembly"
                );
                continue;
            }

            if !ctx
                .method_validator
                .is_valid_test_method(effective.method, effective.declared_on, warnings)
            {
                continue;
            }

            match self.build_descriptor(&effective, warnings) {
                Ok(descriptor) => tests.push(descriptor),
                Err(error) => warnings.push(messages::method_metadata_failure(
                    &universe.method_display_name(effective.method),
                    &error.to_string(),
                )),
            }
        }

        debug!(type_name = %ty.full_name, tests = tests.len(), "enumerated test class");
        Ok(Some(tests))
    }

    fn build_descriptor(
        &self,
        effective: &EffectiveMethod,
        warnings: &mut WarningList,
    ) -> std::result::Result<TestMethodDescriptor, AttributeError> {
        let ctx = self.context;
        let universe = &ctx.universe;
        let resolver = &ctx.resolver;
        let ty = universe.type_def(self.type_id);
        let method = universe.method(effective.method);

        let method_member = MemberHandle::Method(effective.method);
        let type_member = MemberHandle::Type(self.type_id);
        let assembly_member = MemberHandle::Assembly(ty.assembly);

        let display_name = resolver
            .get_first_attribute_or_default::<TestMethodAttribute>(method_member, false)?
            .and_then(|a| a.display_name)
            .unwrap_or_else(|| method.name.clone());

        let async_type_name = resolver
            .get_first_attribute_or_default::<AsyncStateMachineAttribute>(method_member, false)?
            .map(|a| a.state_machine_type);

        let owner = effective.owner();
        let declaring_class_full_name =
            (owner != self.type_id).then(|| universe.type_def(owner).full_name.clone());
        // Both name the slot owner, so the pair always identifies one type.
        let owner_assembly = universe.type_def(owner).assembly;
        let declaring_assembly_name = (owner_assembly != ty.assembly)
            .then(|| universe.assembly(owner_assembly).path.display().to_string());

        let test_method = TestMethod {
            name: method.name.clone(),
            full_class_name: ty.full_name.clone(),
            assembly: universe.assembly(ty.assembly).path.display().to_string(),
            declaring_class_full_name,
            declaring_assembly_name,
            arity: 0,
            parameter_types: method.parameters.clone(),
            is_async: async_type_name.is_some(),
            async_type_name,
            managed_method_name: format_managed_method_name(&method.name, 0, &method.parameters),
        };

        let mut categories: Vec<String> = Vec::new();
        for member in [method_member, type_member, assembly_member] {
            for attribute in resolver.get_attributes::<TestCategoryAttribute>(member, true)? {
                for category in attribute.categories {
                    if !categories.contains(&category) {
                        categories.push(category);
                    }
                }
            }
        }

        let mut traits = Vec::new();
        for member in [method_member, type_member] {
            traits.extend(
                resolver
                    .get_attributes::<TestPropertyAttribute>(member, true)?
                    .into_iter()
                    .map(|p| Trait::new(p.name, p.value)),
            );
        }
        if let Some(owner) =
            resolver.get_first_attribute_or_default::<OwnerAttribute>(method_member, true)?
        {
            traits.push(Trait::new(OWNER_TRAIT, owner.owner));
        }
        let priority = resolver
            .get_first_attribute_or_default::<PriorityAttribute>(method_member, true)?
            .map(|p| p.priority);
        if let Some(priority) = priority {
            traits.push(Trait::new(PRIORITY_TRAIT, priority.to_string()));
        }

        let ignore = combine(
            self.ignore_decision(method_member)?,
            self.ignore_decision(type_member)?,
        );

        let do_not_parallelize = resolver
            .is_attribute_defined::<DoNotParallelizeAttribute>(method_member, true)
            || resolver.is_attribute_defined::<DoNotParallelizeAttribute>(type_member, true);

        let mut deployment_items = Vec::new();
        for member in [type_member, method_member] {
            for item in resolver.get_attributes::<DeploymentItemAttribute>(member, true)? {
                if item.path.trim().is_empty() {
                    warnings.push(messages::invalid_deployment_item(
                        &universe.method_display_name(effective.method),
                    ));
                    continue;
                }
                deployment_items.push(DeploymentItem {
                    source: item.path,
                    target: item.output_directory,
                });
            }
        }

        let work_item_ids: Vec<String> = resolver
            .get_attributes::<WorkItemAttribute>(method_member, true)?
            .into_iter()
            .map(|w| w.id.to_string())
            .collect();

        Ok(TestMethodDescriptor {
            test_method,
            display_name,
            categories,
            traits,
            priority,
            description: resolver
                .get_first_attribute_or_default::<DescriptionAttribute>(method_member, true)?
                .map(|d| d.description),
            work_item_ids: (!work_item_ids.is_empty()).then_some(work_item_ids),
            css_iteration: resolver
                .get_first_attribute_or_default::<CssIterationAttribute>(method_member, true)?
                .map(|c| c.uri),
            css_project_structure: resolver
                .get_first_attribute_or_default::<CssProjectStructureAttribute>(
                    method_member,
                    true,
                )?
                .map(|c| c.structure),
            deployment_items: (!deployment_items.is_empty()).then_some(deployment_items),
            do_not_parallelize,
            ignored: ignore.ignored,
            ignore_message: ignore.message,
        })
    }

    fn ignore_decision(
        &self,
        member: MemberHandle,
    ) -> std::result::Result<IgnoreDecision, AttributeError> {
        let conditions = self
            .context
            .resolver
            .get_attributes::<ConditionAttribute>(member, true)?;
        Ok(evaluate_conditions(&conditions))
    }
}
