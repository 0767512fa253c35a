use std::sync::Arc;

use super::method_validator::MethodValidator;
use super::resolver::AttributeResolver;
use super::type_validator::TypeValidator;
use crate::model::TypeUniverse;
use crate::reflection::{MetadataReflection, ReflectionOperations};
use crate::settings::DiscoverySettings;

/// Everything a discovery pass over one loaded assembly shares between types.
pub struct DiscoveryContext {
    pub universe: Arc<TypeUniverse>,
    pub resolver: Arc<AttributeResolver>,
    pub type_validator: TypeValidator,
    pub method_validator: MethodValidator,
    pub settings: DiscoverySettings,
}

impl DiscoveryContext {
    pub fn new(universe: Arc<TypeUniverse>, settings: DiscoverySettings) -> Self {
        let reflection = Arc::new(MetadataReflection::new(universe.clone()));
        Self::with_reflection(universe, reflection, settings)
    }

    pub fn with_reflection(
        universe: Arc<TypeUniverse>,
        reflection: Arc<dyn ReflectionOperations>,
        settings: DiscoverySettings,
    ) -> Self {
        let resolver = Arc::new(AttributeResolver::new(reflection));
        Self {
            type_validator: TypeValidator::new(
                universe.clone(),
                resolver.clone(),
                settings.discover_internals,
            ),
            method_validator: MethodValidator::new(
                universe.clone(),
                resolver.clone(),
                settings.discover_internals,
            ),
            universe,
            resolver,
            settings,
        }
    }
}
