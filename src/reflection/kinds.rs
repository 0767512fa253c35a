use serde::{Deserialize, Serialize};

use crate::error::AttributeError;
use crate::model::{AttributeData, AttributeValue};

/// A typed view of attributes of one type and everything derived from it.
pub trait AttributeKind: Sized {
    const TYPE_NAME: &'static str;

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError>;
}

/// `null` reads as an absent argument.
fn optional_str(data: &AttributeData, position: usize, name: &str) -> Option<String> {
    data.arg(position, name)
        .filter(|v| !v.is_null())
        .map(AttributeValue::render)
}

fn required_str(
    data: &AttributeData,
    position: usize,
    name: &str,
) -> Result<String, AttributeError> {
    if let Some(AttributeValue::Other(_)) = data.arg(position, name) {
        return Err(AttributeError::invalid_argument(
            &data.type_name,
            name,
            "expected a scalar value",
        ));
    }
    optional_str(data, position, name)
        .ok_or_else(|| AttributeError::missing_argument(&data.type_name, name))
}

fn required_int(
    data: &AttributeData,
    position: usize,
    name: &str,
) -> Result<i64, AttributeError> {
    let value = data
        .arg(position, name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| AttributeError::missing_argument(&data.type_name, name))?;
    value.as_int().ok_or_else(|| {
        AttributeError::invalid_argument(&data.type_name, name, "expected an integer")
    })
}

macro_rules! marker_attribute {
    ($name:ident, $type_name:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name;

        impl AttributeKind for $name {
            const TYPE_NAME: &'static str = $type_name;

            fn from_data(_data: &AttributeData) -> Result<Self, AttributeError> {
                Ok(Self)
            }
        }
    };
}

marker_attribute!(TestClassAttribute, "TestClass");
marker_attribute!(DoNotParallelizeAttribute, "DoNotParallelize");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMethodAttribute {
    pub display_name: Option<String>,
}

impl AttributeKind for TestMethodAttribute {
    const TYPE_NAME: &'static str = "TestMethod";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        Ok(Self {
            display_name: optional_str(data, 0, "DisplayName").filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCategoryAttribute {
    pub categories: Vec<String>,
}

impl AttributeKind for TestCategoryAttribute {
    const TYPE_NAME: &'static str = "TestCategory";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        let mut categories = Vec::new();
        for value in &data.args {
            match value {
                AttributeValue::List(items) => {
                    categories.extend(items.iter().map(AttributeValue::render))
                }
                other => categories.push(other.render()),
            }
        }
        if categories.is_empty() {
            return Err(AttributeError::missing_argument(
                &data.type_name,
                "testCategory",
            ));
        }
        Ok(Self { categories })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPropertyAttribute {
    pub name: String,
    pub value: String,
}

impl AttributeKind for TestPropertyAttribute {
    const TYPE_NAME: &'static str = "TestProperty";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        Ok(Self {
            name: required_str(data, 0, "Name")?,
            value: optional_str(data, 1, "Value").unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerAttribute {
    pub owner: String,
}

impl AttributeKind for OwnerAttribute {
    const TYPE_NAME: &'static str = "Owner";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        Ok(Self {
            owner: required_str(data, 0, "Owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityAttribute {
    pub priority: i32,
}

impl AttributeKind for PriorityAttribute {
    const TYPE_NAME: &'static str = "Priority";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        let raw = required_int(data, 0, "Priority")?;
        let priority = i32::try_from(raw).map_err(|_| {
            AttributeError::invalid_argument(&data.type_name, "Priority", "out of range")
        })?;
        Ok(Self { priority })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionAttribute {
    pub description: String,
}

impl AttributeKind for DescriptionAttribute {
    const TYPE_NAME: &'static str = "Description";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        Ok(Self {
            description: required_str(data, 0, "Description")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemAttribute {
    pub id: i64,
}

impl AttributeKind for WorkItemAttribute {
    const TYPE_NAME: &'static str = "WorkItem";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        Ok(Self {
            id: required_int(data, 0, "Id")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssIterationAttribute {
    pub uri: String,
}

impl AttributeKind for CssIterationAttribute {
    const TYPE_NAME: &'static str = "CssIteration";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        Ok(Self {
            uri: required_str(data, 0, "CssIteration")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssProjectStructureAttribute {
    pub structure: String,
}

impl AttributeKind for CssProjectStructureAttribute {
    const TYPE_NAME: &'static str = "CssProjectStructure";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        Ok(Self {
            structure: required_str(data, 0, "CssProjectStructure")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentItemAttribute {
    pub path: String,
    pub output_directory: String,
}

impl AttributeKind for DeploymentItemAttribute {
    const TYPE_NAME: &'static str = "DeploymentItem";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        Ok(Self {
            path: optional_str(data, 0, "Path").unwrap_or_default(),
            output_directory: optional_str(data, 1, "OutputDirectory").unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncStateMachineAttribute {
    pub state_machine_type: String,
}

impl AttributeKind for AsyncStateMachineAttribute {
    const TYPE_NAME: &'static str = "AsyncStateMachine";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        Ok(Self {
            state_machine_type: required_str(data, 0, "StateMachineType")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionMode {
    Include,
    Exclude,
}

/// Any include/exclude condition, `Ignore` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionAttribute {
    pub group: String,
    pub mode: ConditionMode,
    pub condition_met: bool,
    pub message: Option<String>,
}

impl ConditionAttribute {
    pub fn should_run(&self) -> bool {
        match self.mode {
            ConditionMode::Include => self.condition_met,
            ConditionMode::Exclude => !self.condition_met,
        }
    }
}

impl AttributeKind for ConditionAttribute {
    const TYPE_NAME: &'static str = "ConditionBase";

    fn from_data(data: &AttributeData) -> Result<Self, AttributeError> {
        if data.is_or_derives_from("Ignore") {
            return Ok(Self {
                group: "Ignore".to_string(),
                mode: ConditionMode::Include,
                condition_met: false,
                message: optional_str(data, 0, "IgnoreMessage").filter(|m| !m.is_empty()),
            });
        }

        let mode = match data.named.get("Mode").and_then(AttributeValue::as_str) {
            None | Some("include") => ConditionMode::Include,
            Some("exclude") => ConditionMode::Exclude,
            Some(other) => {
                return Err(AttributeError::invalid_argument(
                    &data.type_name,
                    "Mode",
                    format!("unknown condition mode '{other}'"),
                ))
            }
        };
        let condition_met = data
            .named
            .get("ConditionMet")
            .ok_or_else(|| AttributeError::missing_argument(&data.type_name, "ConditionMet"))?
            .as_bool()
            .ok_or_else(|| {
                AttributeError::invalid_argument(&data.type_name, "ConditionMet", "expected a bool")
            })?;

        Ok(Self {
            group: data
                .named
                .get("GroupName")
                .map(AttributeValue::render)
                .unwrap_or_else(|| data.type_name.clone()),
            mode,
            condition_met,
            message: data.named.get("IgnoreMessage").map(AttributeValue::render),
        })
    }
}
