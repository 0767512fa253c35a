use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use crate::error::SettingsError;

pub const DEFAULT_TEST_FRAMEWORK_ASSEMBLY: &str = "Microsoft.VisualStudio.TestPlatform.TestFramework";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestIdGenerationStrategy {
    Legacy,
    DisplayName,
    #[default]
    FullyQualified,
}

/// Read-only snapshot of the knobs discovery honours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    pub discover_internals: bool,
    pub enable_base_class_test_methods_from_other_assemblies: bool,
    pub test_id_generation_strategy: TestIdGenerationStrategy,
    pub test_framework_assembly: String,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            discover_internals: false,
            enable_base_class_test_methods_from_other_assemblies: true,
            test_id_generation_strategy: TestIdGenerationStrategy::default(),
            test_framework_assembly: DEFAULT_TEST_FRAMEWORK_ASSEMBLY.to_string(),
        }
    }
}

impl DiscoverySettings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        trace!(path = %path.display(), "loading discovery settings");

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::read_error(path, e.to_string()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let settings: Self = match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| SettingsError::parse_error(path, e.to_string()))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| SettingsError::parse_error(path, e.to_string()))?,
            _ => return Err(SettingsError::unsupported_format(extension)),
        };

        debug!(?settings, "loaded discovery settings");
        Ok(settings)
    }
}
