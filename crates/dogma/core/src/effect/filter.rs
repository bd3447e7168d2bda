use std::ops;

use crate::env::{CategoryId, GroupId, TypeId};
use crate::fit::{Item, ItemKind};

/// Coarse item collection a filtered modifier iterates over.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Domain {
    Ship,
    /// Modules and subsystems.
    Modules,
    Charges,
    Drones,
    Implants,
    Skills,
    /// Everything except the character's skills.
    Fitted,
}

impl Domain {
    pub fn contains(self, item: &Item) -> bool {
        match self {
            Domain::Ship => item.kind == ItemKind::Ship,
            Domain::Modules => matches!(item.kind, ItemKind::Module | ItemKind::Subsystem),
            Domain::Charges => item.kind == ItemKind::Charge,
            Domain::Drones => item.kind == ItemKind::Drone,
            Domain::Implants => item.kind == ItemKind::Implant,
            Domain::Skills => item.kind == ItemKind::Skill,
            Domain::Fitted => item.kind != ItemKind::Skill,
        }
    }
}

/// Closed set of item predicates used by filtered modifiers.
///
/// Predicates only look at data copied onto the [`Item`] from static data, so
/// the set of targets of a filtered modifier depends on the fit's structure
/// and never on computed attribute values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Filter {
    #[default]
    All,
    RequiresSkill(TypeId),
    Group(GroupId),
    Category(CategoryId),
    Type(TypeId),
    /// The charge loaded into the source item.
    OwnCharge,
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn requires_skill(skill: TypeId) -> Self {
        Filter::RequiresSkill(skill)
    }

    /// Tests `item` against the filter. `source` is the item whose effect
    /// declared it.
    pub fn matches(&self, item: &Item, source: &Item) -> bool {
        match self {
            Filter::All => true,
            Filter::RequiresSkill(skill) => item.requires_skill(*skill),
            Filter::Group(group) => item.group == *group,
            Filter::Category(category) => item.category == *category,
            Filter::Type(type_id) => item.type_id == *type_id,
            Filter::OwnCharge => item.container == Some(source.id),
            Filter::And(filters) => filters.iter().all(|f| f.matches(item, source)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(item, source)),
            Filter::Not(inner) => !inner.matches(item, source),
        }
    }

    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            filter => Filter::And(vec![filter, other]),
        }
    }

    pub fn or(self, other: Filter) -> Self {
        match self {
            Filter::Or(mut filters) => {
                filters.push(other);
                Filter::Or(filters)
            }
            filter => Filter::Or(vec![filter, other]),
        }
    }
}

impl ops::Not for Filter {
    type Output = Filter;

    fn not(self) -> Self::Output {
        Filter::Not(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::RequiredSkill;
    use crate::fit::{ItemId, ItemState};

    const SKIRMISH: TypeId = TypeId(3350);

    fn item(id: u32, kind: ItemKind, group: u32) -> Item {
        Item {
            id: ItemId(id),
            type_id: TypeId(100 + id),
            group: GroupId(group),
            category: CategoryId(7),
            kind,
            state: ItemState::Online,
            slot: None,
            required_skills: Default::default(),
            container: None,
        }
    }

    #[test]
    fn domains_partition_by_kind() {
        let subsystem = item(1, ItemKind::Subsystem, 1);
        let skill = item(2, ItemKind::Skill, 1);
        assert!(Domain::Modules.contains(&subsystem));
        assert!(Domain::Fitted.contains(&subsystem));
        assert!(!Domain::Fitted.contains(&skill));
        assert!(Domain::Skills.contains(&skill));
    }

    #[test]
    fn requires_skill_and_combinators() {
        let source = item(1, ItemKind::Subsystem, 1);
        let mut burst = item(2, ItemKind::Module, 5);
        burst.required_skills.push(RequiredSkill {
            skill: SKIRMISH,
            level: 1,
        });
        let plain = item(3, ItemKind::Module, 5);

        let filter = Filter::requires_skill(SKIRMISH);
        assert!(filter.matches(&burst, &source));
        assert!(!filter.matches(&plain, &source));

        let grouped = Filter::Group(GroupId(5)).and(!Filter::requires_skill(SKIRMISH));
        assert!(!grouped.matches(&burst, &source));
        assert!(grouped.matches(&plain, &source));

        let either = Filter::Type(TypeId(103)).or(Filter::requires_skill(SKIRMISH));
        assert!(either.matches(&burst, &source));
        assert!(either.matches(&plain, &source));
    }

    #[test]
    fn own_charge_matches_loaded_charge_only() {
        let launcher = item(1, ItemKind::Module, 1);
        let mut charge = item(2, ItemKind::Charge, 2);
        charge.container = Some(launcher.id);
        let other = item(3, ItemKind::Module, 1);

        assert!(Filter::OwnCharge.matches(&charge, &launcher));
        assert!(!Filter::OwnCharge.matches(&charge, &other));
    }
}
