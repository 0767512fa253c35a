use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::assembly_enumerator::EnumerationRequest;
use super::descriptor::TestMethodDescriptor;
use super::filter::{AssemblyReferenceValidator, ManifestReferenceValidator};
use super::host::{InProcessHost, IsolationHost};
use super::loader::{AssemblyLoader, ManifestLoader};
use super::warnings::{messages, WarningList};
use crate::settings::DiscoverySettings;

/// Entry point for a single assembly: checks it is worth enumerating, then
/// hands it to the isolation host.
pub struct AssemblyEnumeratorWrapper {
    loader: Arc<dyn AssemblyLoader>,
    reference_validator: Arc<dyn AssemblyReferenceValidator>,
    host: Arc<dyn IsolationHost>,
}

impl AssemblyEnumeratorWrapper {
    pub fn new(
        loader: Arc<dyn AssemblyLoader>,
        reference_validator: Arc<dyn AssemblyReferenceValidator>,
        host: Arc<dyn IsolationHost>,
    ) -> Self {
        Self {
            loader,
            reference_validator,
            host,
        }
    }

    /// Manifest loader, manifest reference check and an in-process host.
    pub fn in_process() -> Self {
        let loader: Arc<dyn AssemblyLoader> = Arc::new(ManifestLoader::new());
        Self::new(
            loader.clone(),
            Arc::new(ManifestReferenceValidator),
            Arc::new(InProcessHost::new(loader)),
        )
    }

    pub fn with_host(host: Arc<dyn IsolationHost>) -> Self {
        Self::new(
            Arc::new(ManifestLoader::new()),
            Arc::new(ManifestReferenceValidator),
            host,
        )
    }

    /// Returns `None` when the assembly yields no test list at all; the
    /// reason, if it is worth reporting, lands in `warnings`.
    pub fn get_tests(
        &self,
        assembly_path: &str,
        settings: &DiscoverySettings,
        warnings: &mut WarningList,
    ) -> Option<Vec<TestMethodDescriptor>> {
        if assembly_path.trim().is_empty() {
            warn!("assembly path is empty");
            warnings.push(messages::assembly_discovery_failure(
                assembly_path,
                "assembly path is empty",
            ));
            return None;
        }

        let full_path = self.loader.get_full_file_path(Path::new(assembly_path));
        if !self.loader.does_file_exist(&full_path) {
            warn!(path = %full_path.display(), "assembly file does not exist");
            warnings.push(messages::assembly_discovery_failure(
                assembly_path,
                &format!("file {} does not exist", full_path.display()),
            ));
            return None;
        }

        match self
            .reference_validator
            .is_assembly_referenced(&settings.test_framework_assembly, &full_path)
        {
            Ok(true) => {}
            Ok(false) => {
                debug!(path = %full_path.display(), "assembly does not reference the test framework");
                return None;
            }
            Err(error) if error.is_not_loadable() => {
                info!(path = %full_path.display(), %error, "assembly is not loadable");
                warnings.push(messages::assembly_discovery_failure(
                    assembly_path,
                    &error.to_string(),
                ));
                return None;
            }
            Err(error) => {
                warn!(path = %full_path.display(), %error, "reference check failed");
                warnings.push(messages::assembly_discovery_failure(
                    assembly_path,
                    &error.to_string(),
                ));
                return None;
            }
        }

        let request = EnumerationRequest {
            assembly_path: full_path,
            settings: settings.clone(),
        };
        match self.host.enumerate(&request) {
            Ok(response) => {
                warnings.extend(response.warnings);
                Some(response.tests)
            }
            Err(error) => {
                if error.is_not_loadable() {
                    info!(path = %request.assembly_path.display(), %error, "assembly is not loadable");
                } else {
                    warn!(path = %request.assembly_path.display(), %error, "assembly enumeration failed");
                }
                warnings.push(messages::assembly_discovery_failure(
                    assembly_path,
                    &error.to_string(),
                ));
                None
            }
        }
    }
}
