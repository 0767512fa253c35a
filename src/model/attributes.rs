use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute types the framework itself declares as derived from another one.
const BUILTIN_DERIVATIONS: &[(&str, &[&str])] = &[
    ("DataTestMethod", &["TestMethod"]),
    ("Ignore", &["ConditionBase"]),
    ("OSCondition", &["ConditionBase"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Floats and integers outside the `i64` range.
    Number(serde_json::Number),
    Str(String),
    List(Vec<AttributeValue>),
    /// Any other shape, kept as-is so the manifest still loads.
    Other(serde_json::Value),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Renders scalars the way they are shown in traits and ids.
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Str(s) => s.clone(),
            Self::Other(v) => v.to_string(),
            Self::List(items) => items
                .iter()
                .map(AttributeValue::render)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// One attribute application as recorded in an assembly manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeData {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_types: Vec<String>,
    #[serde(default = "default_inherited")]
    pub inherited: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<AttributeValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub named: BTreeMap<String, AttributeValue>,
    /// Set when constructing this attribute fails at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn default_inherited() -> bool {
    true
}

impl AttributeData {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            base_types: Vec::new(),
            inherited: true,
            args: Vec::new(),
            named: BTreeMap::new(),
            error: None,
        }
    }

    pub fn with_arg(mut self, value: AttributeValue) -> Self {
        self.args.push(value);
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.named.insert(name.into(), value);
        self
    }

    /// True when this attribute is `type_name` or derives from it.
    pub fn is_or_derives_from(&self, type_name: &str) -> bool {
        if self.type_name == type_name || self.base_types.iter().any(|b| b == type_name) {
            return true;
        }
        self.builtin_bases()
            .iter()
            .chain(self.base_types.iter().flat_map(|b| builtin_bases_of(b)))
            .any(|b| *b == type_name)
    }

    fn builtin_bases(&self) -> &'static [&'static str] {
        builtin_bases_of(&self.type_name)
    }

    /// Positional argument first, then the named argument.
    pub fn arg(&self, position: usize, name: &str) -> Option<&AttributeValue> {
        self.args.get(position).or_else(|| self.named.get(name))
    }
}

fn builtin_bases_of(type_name: &str) -> &'static [&'static str] {
    BUILTIN_DERIVATIONS
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, bases)| *bases)
        .unwrap_or(&[])
}
