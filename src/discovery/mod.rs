//! Test discovery over loaded assembly metadata.
//!
//! The wrapper checks an assembly is worth looking at, the assembly
//! enumerator walks its types, and the type enumerator turns each valid
//! test method into a [`TestMethodDescriptor`].

pub mod assembly_enumerator;
pub mod cache;
pub mod conditions;
pub mod context;
pub mod descriptor;
pub mod filter;
pub mod hierarchy;
pub mod host;
pub mod loader;
pub mod managed_name;
pub mod method_validator;
pub mod resolver;
pub mod type_enumerator;
pub mod type_validator;
pub mod utils;
pub mod warnings;
pub mod wrapper;

pub use assembly_enumerator::{AssemblyEnumerator, EnumerationRequest, EnumerationResponse};
pub use context::DiscoveryContext;
pub use descriptor::{DeploymentItem, TestMethod, TestMethodDescriptor, Trait};
pub use filter::{AssemblyReferenceValidator, ManifestReferenceValidator};
pub use host::{serve_worker, HostError, InProcessHost, IsolationHost, ProcessHost};
pub use loader::{AssemblyLoader, LoadedAssembly, ManifestLoader};
pub use managed_name::{format_managed_method_name, parse_managed_method_name, ParsedMethodName};
pub use method_validator::MethodValidator;
pub use resolver::AttributeResolver;
pub use type_enumerator::TypeEnumerator;
pub use type_validator::TypeValidator;
pub use warnings::WarningList;
pub use wrapper::AssemblyEnumeratorWrapper;
