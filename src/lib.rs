/// Test Discovery
///
/// Finds unit tests in compiled assemblies described by metadata manifests:
/// validates test classes and methods, resolves attributes through
/// inheritance, and reports framework-neutral test cases with warnings.
pub mod cli;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod reflection;
pub mod settings;

pub use discovery::{AssemblyEnumeratorWrapper, TestMethodDescriptor, WarningList};
pub use error::{Error, Result};
pub use settings::DiscoverySettings;
