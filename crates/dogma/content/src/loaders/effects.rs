//! Declarative effect catalog loader.

use std::path::Path;

use dogma_core::{EffectCategory, EffectDefinition, EffectId, ModifierTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One effect whose behavior is fully described by modifier templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectRecord {
    pub id: EffectId,
    pub name: String,
    pub category: EffectCategory,
    #[serde(default)]
    pub modifiers: Vec<ModifierTemplate>,
}

impl From<EffectRecord> for EffectDefinition {
    fn from(record: EffectRecord) -> Self {
        EffectDefinition::declarative(record.id, record.name, record.category, record.modifiers)
    }
}

/// Effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCatalog {
    pub effects: Vec<EffectRecord>,
}

/// Loader for declarative effects from RON files.
pub struct EffectLoader;

impl EffectLoader {
    /// Load effect definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<EffectDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EffectDefinition>> {
        let catalog: EffectCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON: {}", e))?;

        Ok(catalog.effects.into_iter().map(EffectDefinition::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogma_core::{EffectHandlerKind, Operation, Stacking, Target};

    #[test]
    fn parses_modifier_templates() {
        let effects = EffectLoader::parse(
            r#"(
                effects: [
                    (
                        id: 4002,
                        name: "hybridWeaponDamageMultiply",
                        category: Online,
                        modifiers: [
                            (
                                target: Filtered(domain: Modules, filter: Group(74)),
                                attribute: 64,
                                operation: PostMul,
                                value: Attr(item: SelfItem, attribute: 292),
                                stacking: Penalized(group: "default"),
                            ),
                        ],
                    ),
                    (id: 16, name: "online", category: Online),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(effects.len(), 2);
        let EffectHandlerKind::Modifiers(templates) = &effects[0].handler else {
            panic!("declarative effect expected");
        };
        assert_eq!(templates[0].operation, Operation::PostMul);
        assert!(matches!(templates[0].target, Target::Filtered { .. }));
        assert_eq!(templates[0].stacking, Stacking::penalized());
        assert!(matches!(&effects[1].handler, EffectHandlerKind::Modifiers(t) if t.is_empty()));
    }
}
