//! Fit description loader.
//!
//! A fit description names types instead of ids so that hand-written fits
//! stay readable:
//!
//! ```text
//! (
//!     ship: Some("Proteus"),
//!     skills: {"Gallente Defensive Systems": 4},
//!     items: [
//!         (type_name: "Proteus Defensive - Warfare Processor", kind: Subsystem),
//!         (type_name: "125mm Railgun I", state: Active, charge: Some("Antimatter Charge S")),
//!     ],
//! )
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use dogma_core::{DogmaEngine, FitCommand, ItemId, ItemKind, ItemState, TypeId, TypeOracle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

fn default_kind() -> ItemKind {
    ItemKind::Module
}

fn default_state() -> ItemState {
    ItemState::Online
}

/// One fitted item and the charge loaded into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitItem {
    pub type_name: String,
    #[serde(default = "default_kind")]
    pub kind: ItemKind,
    #[serde(default = "default_state")]
    pub state: ItemState,
    #[serde(default)]
    pub charge: Option<String>,
}

/// Hull, trained skills and fitted items of one fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitDescription {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ship: Option<String>,
    #[serde(default)]
    pub skills: BTreeMap<String, u8>,
    #[serde(default)]
    pub items: Vec<FitItem>,
}

impl FitDescription {
    /// Executes the commands building this fit, skills first.
    ///
    /// Returns every created item labelled with its type name, in fit order.
    pub fn apply(&self, engine: &mut DogmaEngine<'_>) -> LoadResult<Vec<(String, ItemId)>> {
        let mut fitted = Vec::new();

        for (skill, level) in &self.skills {
            let skill_id = Self::resolve(engine, skill)?;
            Self::execute(
                engine,
                skill,
                FitCommand::SetSkillLevel {
                    skill: skill_id,
                    level: *level,
                },
            )?;
        }

        if let Some(ship) = &self.ship {
            let type_id = Self::resolve(engine, ship)?;
            if let Some(id) = Self::execute(engine, ship, FitCommand::SetShip { type_id })? {
                fitted.push((ship.clone(), id));
            }
        }

        for item in &self.items {
            let type_id = Self::resolve(engine, &item.type_name)?;
            let command = FitCommand::AddItem {
                type_id,
                kind: item.kind,
                state: item.state,
            };
            let Some(module) = Self::execute(engine, &item.type_name, command)? else {
                continue;
            };
            fitted.push((item.type_name.clone(), module));

            if let Some(charge) = &item.charge {
                let type_id = Self::resolve(engine, charge)?;
                if let Some(id) =
                    Self::execute(engine, charge, FitCommand::LoadCharge { module, type_id })?
                {
                    fitted.push((charge.clone(), id));
                }
            }
        }

        debug!(
            target: "dogma::content",
            fit = self.name.as_deref().unwrap_or("unnamed"),
            items = fitted.len(),
            "fit applied"
        );
        Ok(fitted)
    }

    fn resolve(engine: &DogmaEngine<'_>, name: &str) -> LoadResult<TypeId> {
        engine
            .env()
            .types()
            .type_by_name(name)
            .map(|definition| definition.id)
            .ok_or_else(|| anyhow::anyhow!("Unknown type '{}' in fit description", name))
    }

    fn execute(
        engine: &mut DogmaEngine<'_>,
        name: &str,
        command: FitCommand,
    ) -> LoadResult<Option<ItemId>> {
        let delta = engine
            .execute(command)
            .map_err(|e| anyhow::anyhow!("Failed to fit '{}': {}", name, e))?;
        Ok(delta.added)
    }
}

/// Loader for fit descriptions from RON files.
pub struct FitLoader;

impl FitLoader {
    pub fn load(path: &Path) -> LoadResult<FitDescription> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<FitDescription> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse fit description RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_defaults() {
        let fit = FitLoader::parse(
            r#"(
                ship: Some("Proteus"),
                items: [(type_name: "Skirmish Command Burst I")],
            )"#,
        )
        .unwrap();

        assert_eq!(fit.ship.as_deref(), Some("Proteus"));
        assert!(fit.skills.is_empty());
        assert_eq!(fit.items[0].kind, ItemKind::Module);
        assert_eq!(fit.items[0].state, ItemState::Online);
        assert_eq!(fit.items[0].charge, None);
    }
}
