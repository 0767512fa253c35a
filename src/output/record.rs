use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::discovery::TestMethodDescriptor;
use crate::settings::TestIdGenerationStrategy;

/// Framework-neutral test case handed to a runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    pub id: String,
    pub fully_qualified_name: String,
    pub display_name: String,
    pub source: String,
    pub managed_type: String,
    pub managed_method: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub traits: BTreeMap<String, Vec<String>>,
    pub ignored: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub priority: Option<i32>,
}

impl TestCaseRecord {
    pub fn from_descriptor(
        descriptor: &TestMethodDescriptor,
        strategy: TestIdGenerationStrategy,
    ) -> Self {
        let method = &descriptor.test_method;
        let fully_qualified_name = descriptor.fully_qualified_name();

        let id = match strategy {
            TestIdGenerationStrategy::Legacy => fully_qualified_name.clone(),
            TestIdGenerationStrategy::DisplayName => {
                format!("{fully_qualified_name}:{}", descriptor.display_name)
            }
            TestIdGenerationStrategy::FullyQualified => format!(
                "{}::{fully_qualified_name}({})",
                method.assembly,
                method.parameter_types.join(",")
            ),
        };

        let mut traits: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for t in &descriptor.traits {
            traits.entry(t.name.clone()).or_default().push(t.value.clone());
        }

        Self {
            id,
            fully_qualified_name,
            display_name: descriptor.display_name.clone(),
            source: method.assembly.clone(),
            managed_type: method.full_class_name.clone(),
            managed_method: method.managed_method_name.clone(),
            categories: descriptor.categories.clone(),
            traits,
            ignored: descriptor.ignored,
            priority: descriptor.priority,
        }
    }
}
