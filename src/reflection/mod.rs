//! Raw attribute retrieval over the metadata model, and the typed attribute
//! kinds decoded from it.

mod kinds;

pub use kinds::{
    AsyncStateMachineAttribute, AttributeKind, ConditionAttribute, ConditionMode,
    CssIterationAttribute, CssProjectStructureAttribute, DeploymentItemAttribute,
    DescriptionAttribute, DoNotParallelizeAttribute, OwnerAttribute, PriorityAttribute,
    TestCategoryAttribute, TestClassAttribute, TestMethodAttribute, TestPropertyAttribute,
    WorkItemAttribute,
};

use std::sync::Arc;

use crate::error::ReflectionError;
use crate::model::{AssemblyId, AttributeData, MethodId, TypeId, TypeUniverse};

/// Anything attributes can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberHandle {
    Assembly(AssemblyId),
    Type(TypeId),
    Method(MethodId),
}

pub trait ReflectionOperations: Send + Sync {
    fn get_custom_attributes(
        &self,
        member: MemberHandle,
        inherit: bool,
    ) -> Result<Vec<AttributeData>, ReflectionError>;

    fn member_name(&self, member: MemberHandle) -> String;
}

pub struct MetadataReflection {
    universe: Arc<TypeUniverse>,
}

impl MetadataReflection {
    pub fn new(universe: Arc<TypeUniverse>) -> Self {
        Self { universe }
    }
}

impl ReflectionOperations for MetadataReflection {
    fn get_custom_attributes(
        &self,
        member: MemberHandle,
        inherit: bool,
    ) -> Result<Vec<AttributeData>, ReflectionError> {
        let universe = &self.universe;
        let collected = match member {
            MemberHandle::Assembly(id) => universe.assembly(id).attributes.clone(),
            MemberHandle::Type(id) => {
                let mut attributes = universe.type_def(id).attributes.clone();
                if inherit {
                    for base in universe.ancestors(id)?.into_iter().skip(1) {
                        attributes.extend(
                            universe
                                .type_def(base)
                                .attributes
                                .iter()
                                .filter(|a| a.inherited)
                                .cloned(),
                        );
                    }
                }
                attributes
            }
            MemberHandle::Method(id) => {
                let mut attributes = universe.method(id).attributes.clone();
                if inherit {
                    for base in universe.overridden_chain(id)? {
                        attributes.extend(
                            universe
                                .method(base)
                                .attributes
                                .iter()
                                .filter(|a| a.inherited)
                                .cloned(),
                        );
                    }
                }
                attributes
            }
        };

        if let Some(broken) = collected.iter().find(|a| a.error.is_some()) {
            return Err(ReflectionError::attribute_construction(
                &broken.type_name,
                self.member_name(member),
                broken.error.clone().unwrap_or_default(),
            ));
        }

        Ok(collected)
    }

    fn member_name(&self, member: MemberHandle) -> String {
        match member {
            MemberHandle::Assembly(id) => self.universe.assembly(id).name.clone(),
            MemberHandle::Type(id) => self.universe.type_def(id).full_name.clone(),
            MemberHandle::Method(id) => self.universe.method_display_name(id),
        }
    }
}
