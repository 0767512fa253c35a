use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use super::context::DiscoveryContext;
use super::descriptor::TestMethodDescriptor;
use super::loader::{AssemblyLoader, LoadedAssembly};
use super::type_enumerator::TypeEnumerator;
use super::warnings::{messages, WarningList};
use crate::error::AssemblyLoadError;
use crate::model::TypeId;
use crate::settings::DiscoverySettings;

/// What the isolation boundary receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationRequest {
    pub assembly_path: PathBuf,
    pub settings: DiscoverySettings,
}

/// What comes back across the isolation boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationResponse {
    pub tests: Vec<TestMethodDescriptor>,
    pub warnings: WarningList,
}

/// Walks every type of an assembly, isolating failures per type.
pub struct AssemblyEnumerator {
    loader: Arc<dyn AssemblyLoader>,
    settings: DiscoverySettings,
}

impl AssemblyEnumerator {
    pub fn new(loader: Arc<dyn AssemblyLoader>, settings: DiscoverySettings) -> Self {
        Self { loader, settings }
    }

    pub fn enumerate_assembly(
        &self,
        assembly_path: &Path,
        warnings: &mut WarningList,
    ) -> Result<Vec<TestMethodDescriptor>, AssemblyLoadError> {
        let assembly = self.loader.load_assembly(assembly_path, false)?;
        let types = self.loadable_types(&assembly, warnings);
        let context = DiscoveryContext::new(assembly.universe().clone(), self.settings.clone());
        let assembly_name = assembly.path().display().to_string();

        let mut tests = Vec::new();
        for type_id in types {
            match TypeEnumerator::new(&context, type_id).enumerate(warnings) {
                Ok(Some(found)) => tests.extend(found),
                Ok(None) => {}
                Err(error) => {
                    let type_name = &context.universe.type_def(type_id).full_name;
                    warn!(%type_name, %error, "type enumeration failed");
                    warnings.push(messages::type_enumeration_failure(
                        type_name,
                        &assembly_name,
                        &error.to_string(),
                    ));
                }
            }
        }

        debug!(
            assembly = %assembly_name,
            tests = tests.len(),
            warnings = warnings.len(),
            "enumerated assembly"
        );
        Ok(tests)
    }

    pub fn handle(&self, request: &EnumerationRequest) -> Result<EnumerationResponse, AssemblyLoadError> {
        let mut warnings = WarningList::new();
        let tests = self.enumerate_assembly(&request.assembly_path, &mut warnings)?;
        Ok(EnumerationResponse { tests, warnings })
    }

    /// Salvages the types that did load and reports each distinct load failure once.
    fn loadable_types(&self, assembly: &LoadedAssembly, warnings: &mut WarningList) -> Vec<TypeId> {
        match self.loader.get_types(assembly) {
            Ok(types) => types,
            Err(failure) => {
                warnings.push(messages::type_load_summary(&assembly.path().display().to_string()));
                let mut reported: Vec<&str> = Vec::new();
                for error in &failure.errors {
                    if !reported.contains(&error.message.as_str()) {
                        reported.push(&error.message);
                        warnings.push(error.message.clone());
                    }
                }
                failure.loaded
            }
        }
    }
}
