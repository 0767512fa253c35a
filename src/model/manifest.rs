use serde::{Deserialize, Serialize};

use super::attributes::AttributeData;

pub const VOID_TYPE: &str = "System.Void";

const AWAITABLE_TYPES: &[&str] = &[
    "System.Threading.Tasks.Task",
    "System.Threading.Tasks.ValueTask",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Struct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
    Protected,
    ProtectedInternal,
    PrivateProtected,
}

impl Visibility {
    /// Public always qualifies, internal only when internals are discoverable.
    pub fn is_discoverable(self, discover_internals: bool) -> bool {
        match self {
            Self::Public => true,
            Self::Internal => discover_internals,
            _ => false,
        }
    }
}

/// How a method relates to same-signature declarations in base types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodSlot {
    #[default]
    Plain,
    New,
    Virtual,
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default = "default_return_type")]
    pub return_type: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub slot: MethodSlot,
    #[serde(default)]
    pub generic_definition: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
}

fn default_return_type() -> String {
    VOID_TYPE.to_string()
}

impl MethodDef {
    pub fn returns_void(&self) -> bool {
        self.return_type == VOID_TYPE || self.return_type == "void"
    }

    pub fn returns_awaitable(&self) -> bool {
        AWAITABLE_TYPES.contains(&self.return_type.as_str())
    }

    pub fn signature(&self) -> MethodSignature {
        MethodSignature {
            name: self.name.clone(),
            parameters: self.parameters.clone(),
        }
    }
}

/// Name plus parameter shape; the unit of hiding and overriding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: String,
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorDef {
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub setter: Option<AccessorDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub full_name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub generic_definition: bool,
    #[serde(default)]
    pub declaring_type: Option<String>,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

/// On-disk description of one compiled assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyManifest {
    pub name: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub types: Vec<TypeSpec>,
}

impl AssemblyManifest {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
