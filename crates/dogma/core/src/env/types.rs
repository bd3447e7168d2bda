use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::DogmaConfig;

use super::ids::{AttributeId, CategoryId, EffectId, GroupId, TypeId};

/// Read access to the type → group → category hierarchy.
pub trait TypeOracle: Send + Sync {
    fn definition(&self, id: TypeId) -> Option<&TypeDefinition>;

    fn group(&self, id: GroupId) -> Option<&GroupDefinition>;

    fn category(&self, id: CategoryId) -> Option<&CategoryDefinition>;

    /// Looks a type up by its display name. Used by code-defined effect
    /// handlers that refer to skills by name.
    fn type_by_name(&self, name: &str) -> Option<&TypeDefinition>;

    /// Resolves the category of a type through its group.
    fn category_of(&self, id: TypeId) -> Option<CategoryId> {
        let group = self.definition(id)?.group;
        self.group(group).map(|group| group.category)
    }
}

/// Fitting slot a module type occupies.
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
pub enum Slot {
    High,
    Mid,
    Low,
    Rig,
    Subsystem,
}

/// Skill prerequisite declared by a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequiredSkill {
    pub skill: TypeId,
    pub level: u8,
}

pub type RequiredSkills = ArrayVec<RequiredSkill, { DogmaConfig::MAX_REQUIRED_SKILLS }>;

/// Static definition of an item type.
///
/// Attribute values listed here are the base values of every item instance of
/// the type; the engine never mutates them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDefinition {
    pub id: TypeId,
    pub name: String,
    pub group: GroupId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: BTreeMap<AttributeId, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_skills: RequiredSkills,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slot: Option<Slot>,
}

impl TypeDefinition {
    pub fn new(id: TypeId, name: impl Into<String>, group: GroupId) -> Self {
        Self {
            id,
            name: name.into(),
            group,
            attributes: BTreeMap::new(),
            effects: Vec::new(),
            required_skills: ArrayVec::new(),
            slot: None,
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeId, value: f64) -> Self {
        self.attributes.insert(attribute, value);
        self
    }

    pub fn with_effect(mut self, effect: EffectId) -> Self {
        self.effects.push(effect);
        self
    }

    /// Adds a skill requirement. Requirements beyond the supported maximum
    /// are ignored.
    pub fn with_required_skill(mut self, skill: TypeId, level: u8) -> Self {
        let _ = self.required_skills.try_push(RequiredSkill { skill, level });
        self
    }

    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn base_value(&self, attribute: AttributeId) -> Option<f64> {
        self.attributes.get(&attribute).copied()
    }

    pub fn requires_skill(&self, skill: TypeId) -> bool {
        self.required_skills.iter().any(|req| req.skill == skill)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupDefinition {
    pub id: GroupId,
    pub name: String,
    pub category: CategoryId,
}

impl GroupDefinition {
    pub fn new(id: GroupId, name: impl Into<String>, category: CategoryId) -> Self {
        Self {
            id,
            name: name.into(),
            category,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryDefinition {
    pub id: CategoryId,
    pub name: String,
}

impl CategoryDefinition {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
