//! Content factory for building the engine inputs from data files.

use std::path::{Path, PathBuf};

use dogma_core::{
    AttributesSnapshot, DogmaConfig, EffectRegistry, StaticSnapshot, TypesSnapshot,
};
use tracing::info;

use crate::builtin::register_builtins;
use crate::loaders::{
    AttributeLoader, ConfigLoader, EffectLoader, FitDescription, FitLoader, LoadResult,
    TypeLoader,
};

/// Content factory that loads all dogma content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── dogma.toml
/// ├── types.ron
/// ├── attributes.ron
/// ├── effects.ron
/// └── fits/
///     └── proteus_skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `dogma.toml`; defaults when absent.
    pub fn load_config(&self) -> LoadResult<DogmaConfig> {
        let path = self.data_dir.join("dogma.toml");
        if !path.exists() {
            return Ok(DogmaConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the type hierarchy from `types.ron`.
    pub fn load_types(&self) -> LoadResult<TypesSnapshot> {
        TypeLoader::load(&self.data_dir.join("types.ron"))
    }

    /// Load attribute definitions from `attributes.ron`.
    pub fn load_attributes(&self) -> LoadResult<AttributesSnapshot> {
        AttributeLoader::load(&self.data_dir.join("attributes.ron"))
    }

    /// Load types and attributes into one snapshot.
    pub fn load_static(&self) -> LoadResult<StaticSnapshot> {
        let snapshot = StaticSnapshot::new(self.load_types()?, self.load_attributes()?);
        info!(
            target: "dogma::content",
            types = snapshot.types.len(),
            attributes = snapshot.attributes.len(),
            "static data loaded"
        );
        Ok(snapshot)
    }

    /// Build the effect registry: code-defined effects plus `effects.ron`.
    pub fn load_registry(&self) -> LoadResult<EffectRegistry> {
        let mut registry = EffectRegistry::new();
        register_builtins(&mut registry)
            .map_err(|e| anyhow::anyhow!("Failed to register builtin effects: {}", e))?;

        let path = self.data_dir.join("effects.ron");
        for definition in EffectLoader::load(&path)? {
            let name = definition.name.clone();
            registry
                .register(definition)
                .map_err(|e| anyhow::anyhow!("Effect '{}' in {}: {}", name, path.display(), e))?;
        }
        Ok(registry)
    }

    /// Checks that every effect id referenced by a type is registered.
    ///
    /// The engine rejects such types when they are fitted; this reports them
    /// all up front instead.
    pub fn check_effects(types: &TypesSnapshot, registry: &EffectRegistry) -> LoadResult<()> {
        let missing: Vec<String> = types
            .iter()
            .flat_map(|definition| {
                definition
                    .effects
                    .iter()
                    .filter(|effect| !registry.contains(**effect))
                    .map(move |effect| format!("{} ({})", definition.name, effect))
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Types reference unregistered effects: {}", missing.join(", "))
        }
    }

    /// Load a fit description; relative paths resolve against `fits/`.
    pub fn load_fit(&self, path: impl AsRef<Path>) -> LoadResult<FitDescription> {
        let path = path.as_ref();
        let candidate = self.data_dir.join("fits").join(path);
        if path.is_relative() && candidate.exists() {
            FitLoader::load(&candidate)
        } else {
            FitLoader::load(path)
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
