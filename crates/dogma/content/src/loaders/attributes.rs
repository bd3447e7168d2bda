//! Attribute definition loader.

use std::path::Path;

use dogma_core::{AttributeDefinition, AttributeOracle, AttributesSnapshot};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Attribute catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeCatalog {
    pub attributes: Vec<AttributeDefinition>,
}

/// Loader for attribute definitions from RON files.
pub struct AttributeLoader;

impl AttributeLoader {
    /// Load attribute definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<AttributesSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AttributesSnapshot> {
        let catalog: AttributeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse attribute catalog RON: {}", e))?;

        let mut snapshot = AttributesSnapshot::new();
        for definition in catalog.attributes {
            if snapshot.attribute(definition.id).is_some() {
                anyhow::bail!("Duplicate attribute id {}", definition.id);
            }
            snapshot.insert(definition);
        }

        // caps must point at a defined attribute
        for definition in snapshot.iter() {
            if let Some(max) = definition.max_attribute {
                if snapshot.attribute(max).is_none() {
                    anyhow::bail!(
                        "Attribute '{}' is capped by undefined attribute {}",
                        definition.name,
                        max
                    );
                }
            }
        }

        Ok(snapshot)
    }
}
