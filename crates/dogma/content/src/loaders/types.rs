//! Type hierarchy loader.

use std::path::Path;

use dogma_core::{
    CategoryDefinition, GroupDefinition, TypeDefinition, TypeOracle, TypesSnapshot,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Type catalog structure for RON files: categories, groups and types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeCatalog {
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
    pub types: Vec<TypeDefinition>,
}

/// Loader for the type hierarchy from RON files.
pub struct TypeLoader;

impl TypeLoader {
    /// Load the type catalog from a RON file.
    ///
    /// Every group must belong to a listed category and every type to a
    /// listed group; names must be unique since code handlers look types up
    /// by name.
    pub fn load(path: &Path) -> LoadResult<TypesSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TypesSnapshot> {
        let catalog: TypeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse type catalog RON: {}", e))?;

        let mut snapshot = TypesSnapshot::new();
        for category in catalog.categories {
            snapshot.insert_category(category);
        }
        for group in catalog.groups {
            if snapshot.category(group.category).is_none() {
                anyhow::bail!(
                    "Group '{}' references unknown category {}",
                    group.name,
                    group.category
                );
            }
            snapshot.insert_group(group);
        }
        for definition in catalog.types {
            if snapshot.group(definition.group).is_none() {
                anyhow::bail!(
                    "Type '{}' references unknown group {}",
                    definition.name,
                    definition.group
                );
            }
            if snapshot.definition(definition.id).is_some() {
                anyhow::bail!("Duplicate type id {}", definition.id);
            }
            if snapshot.type_by_name(&definition.name).is_some() {
                anyhow::bail!("Duplicate type name '{}'", definition.name);
            }
            snapshot.insert_type(definition);
        }

        Ok(snapshot)
    }
}
