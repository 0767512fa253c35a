use std::sync::Arc;
use tracing::{trace, warn};

use super::cache::{AttributeCache, AttributeSet};
use crate::error::AttributeError;
use crate::reflection::{AttributeKind, MemberHandle, ReflectionOperations};

/// Cached, typed attribute lookups on top of a [`ReflectionOperations`] provider.
pub struct AttributeResolver {
    reflection: Arc<dyn ReflectionOperations>,
    cache: AttributeCache,
}

impl AttributeResolver {
    pub fn new(reflection: Arc<dyn ReflectionOperations>) -> Self {
        Self {
            reflection,
            cache: AttributeCache::new(),
        }
    }

    pub fn member_name(&self, member: MemberHandle) -> String {
        self.reflection.member_name(member)
    }

    /// Raw attribute array for a member. A provider failure is logged and
    /// treated as "no attributes".
    pub fn attributes(&self, member: MemberHandle, inherit: bool) -> AttributeSet {
        if let Some(hit) = self.cache.get(member, inherit) {
            return hit;
        }

        let resolved: AttributeSet = match self.reflection.get_custom_attributes(member, inherit)
        {
            Ok(attributes) => Arc::from(attributes),
            Err(error) => {
                warn!(
                    member = %self.reflection.member_name(member),
                    inherit,
                    %error,
                    "failed to read attributes, treating as none"
                );
                Arc::from(Vec::new())
            }
        };

        trace!(?member, inherit, count = resolved.len(), "populated attribute cache");
        self.cache.insert(member, inherit, resolved.clone());
        resolved
    }

    /// All attributes of kind `T` or derived from it, in lookup order.
    pub fn get_attributes<T: AttributeKind>(
        &self,
        member: MemberHandle,
        inherit: bool,
    ) -> Result<Vec<T>, AttributeError> {
        self.attributes(member, inherit)
            .iter()
            .filter(|a| a.is_or_derives_from(T::TYPE_NAME))
            .map(T::from_data)
            .collect()
    }

    pub fn is_attribute_defined<T: AttributeKind>(
        &self,
        member: MemberHandle,
        inherit: bool,
    ) -> bool {
        self.attributes(member, inherit)
            .iter()
            .any(|a| a.is_or_derives_from(T::TYPE_NAME))
    }

    pub fn get_first_attribute_or_default<T: AttributeKind>(
        &self,
        member: MemberHandle,
        inherit: bool,
    ) -> Result<Option<T>, AttributeError> {
        self.attributes(member, inherit)
            .iter()
            .find(|a| a.is_or_derives_from(T::TYPE_NAME))
            .map(T::from_data)
            .transpose()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
