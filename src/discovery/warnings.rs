use serde::{Deserialize, Serialize};

/// Ordered, append-only diagnostics gathered during discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarningList(Vec<String>);

impl WarningList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: impl Into<String>) {
        self.0.push(warning.into());
    }

    pub fn extend(&mut self, other: WarningList) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for WarningList {
    fn from(warnings: Vec<String>) -> Self {
        Self(warnings)
    }
}

/// Warning texts shared by the validators and enumerators.
pub mod messages {
    pub fn non_public_test_class(type_name: &str) -> String {
        format!("UTA001: TestClass attribute defined on non-public class {type_name}")
    }

    pub fn generic_non_abstract_test_class(type_name: &str) -> String {
        format!(
            "UTA002: Test class {type_name} is a generic type definition and is not abstract. \
             Generic test classes must be abstract."
        )
    }

    pub fn invalid_test_context(type_name: &str) -> String {
        format!(
            "UTA031: class {type_name} does not have valid TestContext property. TestContext \
             must be of type TestContext, must be non-static, public and must not be read-only."
        )
    }

    pub fn generic_test_method(type_name: &str, method_name: &str) -> String {
        format!("UTA007: Method {type_name}.{method_name} is generic; generic test methods are not supported.")
    }

    pub fn method_metadata_failure(method: &str, error: &str) -> String {
        format!("Failed to read metadata of test method {method}: {error}")
    }

    pub fn invalid_deployment_item(method: &str) -> String {
        format!("Deployment item on {method} has an empty source path and was skipped.")
    }

    pub fn type_enumeration_failure(type_name: &str, assembly: &str, error: &str) -> String {
        format!(
            "Exception occurred while enumerating type {type_name} from assembly {assembly}: {error}"
        )
    }

    pub fn type_load_summary(assembly: &str) -> String {
        format!("Some types in assembly {assembly} could not be loaded; discovered tests may be incomplete.")
    }

    pub fn assembly_discovery_failure(assembly: &str, reason: &str) -> String {
        format!("Assembly discovery failure for {assembly}: {reason}")
    }
}
