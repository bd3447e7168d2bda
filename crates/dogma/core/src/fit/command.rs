use crate::env::TypeId;

use super::item::{ItemId, ItemKind, ItemState};

/// A mutation of the fit.
///
/// Commands are the only way computed attributes become stale; the engine
/// validates each one before touching the fit, so a rejected command leaves
/// both the fit and the attribute cache unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitCommand {
    /// Fits a hull, replacing the current one (and keeping fitted items).
    SetShip { type_id: TypeId },

    /// Fits a module, subsystem, drone or implant.
    AddItem {
        type_id: TypeId,
        kind: ItemKind,
        state: ItemState,
    },

    /// Removes an item; a module's loaded charge goes with it.
    RemoveItem { item: ItemId },

    /// Changes the operating state of a module or drone.
    SetState { item: ItemId, state: ItemState },

    /// Trains (or with level 0, forgets) a skill.
    SetSkillLevel { skill: TypeId, level: u8 },

    /// Loads a charge into a module, replacing any charge already loaded.
    LoadCharge { module: ItemId, type_id: TypeId },

    /// Unloads the charge of a module, if any.
    UnloadCharge { module: ItemId },
}

impl FitCommand {
    pub fn module(type_id: TypeId, state: ItemState) -> Self {
        FitCommand::AddItem {
            type_id,
            kind: ItemKind::Module,
            state,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitCommand::SetShip { .. } => "set_ship",
            FitCommand::AddItem { .. } => "add_item",
            FitCommand::RemoveItem { .. } => "remove_item",
            FitCommand::SetState { .. } => "set_state",
            FitCommand::SetSkillLevel { .. } => "set_skill_level",
            FitCommand::LoadCharge { .. } => "load_charge",
            FitCommand::UnloadCharge { .. } => "unload_charge",
        }
    }
}
