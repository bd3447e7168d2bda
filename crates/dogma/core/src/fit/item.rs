use std::fmt;

use crate::env::{CategoryId, GroupId, RequiredSkills, Slot, TypeId};

/// Fit-local identifier of an item instance.
///
/// Ids are never reused within one fit, so modifier and cache entries keyed by
/// a removed item can never alias a newly added one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Operating state of an item. Ordered: every state implies the ones below it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemState {
    Offline,
    #[default]
    Online,
    Active,
    Overloaded,
}

/// Role of an item inside the fit.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    Ship,
    Module,
    Subsystem,
    Drone,
    Charge,
    Implant,
    Skill,
}

impl ItemKind {
    /// Kinds that enter a fit through `FitCommand::AddItem`.
    pub const fn is_fittable(self) -> bool {
        matches!(
            self,
            ItemKind::Module | ItemKind::Subsystem | ItemKind::Drone | ItemKind::Implant
        )
    }

    /// Kinds whose state can be toggled by the user.
    pub const fn is_toggleable(self) -> bool {
        matches!(self, ItemKind::Module | ItemKind::Drone)
    }
}

/// An item instance participating in a fit.
///
/// Group, category, slot and skill requirements are copied from static data
/// when the item is created so that filters can be matched without consulting
/// the oracles again.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub type_id: TypeId,
    pub group: GroupId,
    pub category: CategoryId,
    pub kind: ItemKind,
    pub state: ItemState,
    pub slot: Option<Slot>,
    pub required_skills: RequiredSkills,
    /// Module a charge is loaded into.
    pub container: Option<ItemId>,
}

impl Item {
    pub fn requires_skill(&self, skill: TypeId) -> bool {
        self.required_skills.iter().any(|req| req.skill == skill)
    }

    pub fn is_charge(&self) -> bool {
        self.kind == ItemKind::Charge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_are_ordered() {
        assert!(ItemState::Offline < ItemState::Online);
        assert!(ItemState::Online < ItemState::Active);
        assert!(ItemState::Active < ItemState::Overloaded);
    }

    #[test]
    fn state_parses_from_snake_case() {
        assert_eq!("overloaded".parse::<ItemState>().unwrap(), ItemState::Overloaded);
        assert_eq!(ItemState::Active.to_string(), "active");
    }

    #[test]
    fn kind_capabilities() {
        assert!(ItemKind::Module.is_fittable());
        assert!(!ItemKind::Charge.is_fittable());
        assert!(ItemKind::Drone.is_toggleable());
        assert!(!ItemKind::Implant.is_toggleable());
    }
}
