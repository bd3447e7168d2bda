//! Effect registry: effect id → definition.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::env::EffectId;
use crate::error::{DogmaError, ErrorSeverity};

use super::EffectDefinition;

/// Errors raised by [`EffectRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("effect {0} is not registered")]
    UnknownEffect(EffectId),

    #[error("effect {0} is already registered")]
    DuplicateEffect(EffectId),
}

impl DogmaError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // A type referencing a missing effect means the static data and
            // the registered handlers do not belong together.
            RegistryError::UnknownEffect(_) => ErrorSeverity::Fatal,
            RegistryError::DuplicateEffect(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::UnknownEffect(_) => "REGISTRY_UNKNOWN_EFFECT",
            RegistryError::DuplicateEffect(_) => "REGISTRY_DUPLICATE_EFFECT",
        }
    }
}

/// Registry of every effect the engine can run.
///
/// Populated once at load time (declarative effects from data files and
/// code-defined handlers) and shared read-only afterwards.
#[derive(Default)]
pub struct EffectRegistry {
    effects: HashMap<EffectId, EffectDefinition>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition. Ids are unique.
    pub fn register(&mut self, definition: EffectDefinition) -> Result<(), RegistryError> {
        if self.effects.contains_key(&definition.id) {
            return Err(RegistryError::DuplicateEffect(definition.id));
        }
        debug!(
            target: "dogma::effect",
            effect = %definition.id,
            name = %definition.name,
            category = %definition.category,
            "registered effect"
        );
        self.effects.insert(definition.id, definition);
        Ok(())
    }

    /// Resolves an effect id.
    pub fn lookup(&self, id: EffectId) -> Result<&EffectDefinition, RegistryError> {
        self.effects.get(&id).ok_or(RegistryError::UnknownEffect(id))
    }

    pub fn contains(&self, id: EffectId) -> bool {
        self.effects.contains_key(&id)
    }

    /// Finds an effect by name.
    pub fn find(&self, name: &str) -> Option<&EffectDefinition> {
        self.effects.values().find(|effect| effect.name == name)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<EffectId> {
        let mut ids: Vec<_> = self.effects.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("effects", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectCategory;

    #[test]
    fn lookup_and_duplicates() {
        let mut registry = EffectRegistry::new();
        registry
            .register(EffectDefinition::declarative(
                EffectId(1),
                "online",
                EffectCategory::Online,
                Vec::new(),
            ))
            .unwrap();

        assert_eq!(registry.lookup(EffectId(1)).unwrap().name, "online");
        assert_eq!(
            registry.lookup(EffectId(2)).unwrap_err(),
            RegistryError::UnknownEffect(EffectId(2))
        );

        let duplicate = registry.register(EffectDefinition::declarative(
            EffectId(1),
            "again",
            EffectCategory::Passive,
            Vec::new(),
        ));
        assert_eq!(duplicate, Err(RegistryError::DuplicateEffect(EffectId(1))));
        assert_eq!(registry.find("online").map(|e| e.id), Some(EffectId(1)));
    }

    #[test]
    fn unknown_effect_is_fatal() {
        let error = RegistryError::UnknownEffect(EffectId(9));
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
        assert_eq!(error.error_code(), "REGISTRY_UNKNOWN_EFFECT");
    }
}
