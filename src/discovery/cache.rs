use dashmap::DashMap;
use std::sync::Arc;

use crate::model::AttributeData;
use crate::reflection::MemberHandle;

pub type AttributeSet = Arc<[AttributeData]>;

/// Resolved attribute arrays keyed by member, one partition per `inherit` value.
///
/// Entries are never invalidated during a discovery pass. Two threads racing on
/// the same key compute the same value, so the later insert simply wins.
#[derive(Debug, Default)]
pub struct AttributeCache {
    inherited: DashMap<MemberHandle, AttributeSet>,
    non_inherited: DashMap<MemberHandle, AttributeSet>,
}

impl AttributeCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition(&self, inherit: bool) -> &DashMap<MemberHandle, AttributeSet> {
        if inherit {
            &self.inherited
        } else {
            &self.non_inherited
        }
    }

    pub fn get(&self, member: MemberHandle, inherit: bool) -> Option<AttributeSet> {
        self.partition(inherit)
            .get(&member)
            .map(|entry| entry.value().clone())
    }

    pub fn insert(&self, member: MemberHandle, inherit: bool, attributes: AttributeSet) {
        self.partition(inherit).insert(member, attributes);
    }

    pub fn len(&self) -> usize {
        self.inherited.len() + self.non_inherited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Only meant for isolating tests from each other.
    pub fn clear(&self) {
        self.inherited.clear();
        self.non_inherited.clear();
    }
}
