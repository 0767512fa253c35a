use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    pub name: String,
    pub value: String,
}

impl Trait {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentItem {
    pub source: String,
    pub target: String,
}

/// Identity of one discovered test method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMethod {
    pub name: String,
    pub full_class_name: String,
    pub assembly: String,
    /// Set only when the runnable method comes from a class other than the
    /// one being enumerated.
    pub declaring_class_full_name: Option<String>,
    /// Path of the declaring assembly, set only for methods inherited across
    /// assemblies.
    pub declaring_assembly_name: Option<String>,
    pub arity: u32,
    pub parameter_types: Vec<String>,
    pub is_async: bool,
    pub async_type_name: Option<String>,
    pub managed_method_name: String,
}

/// A discovered test case with all metadata read from its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMethodDescriptor {
    pub test_method: TestMethod,
    pub display_name: String,
    pub categories: Vec<String>,
    pub traits: Vec<Trait>,
    pub priority: Option<i32>,
    pub description: Option<String>,
    pub work_item_ids: Option<Vec<String>>,
    pub css_iteration: Option<String>,
    pub css_project_structure: Option<String>,
    pub deployment_items: Option<Vec<DeploymentItem>>,
    pub do_not_parallelize: bool,
    pub ignored: bool,
    pub ignore_message: Option<String>,
}

impl TestMethodDescriptor {
    /// `Class.Method`, the composite hosts build test-case names from.
    pub fn fully_qualified_name(&self) -> String {
        format!(
            "{}.{}",
            self.test_method.full_class_name, self.test_method.name
        )
    }
}
