use std::collections::BTreeMap;

use crate::env::TypeId;

/// The pilot of a fit: trained skill levels.
///
/// Skills the character has not trained report level 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    skills: BTreeMap<TypeId, u8>,
}

impl Character {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skill_level(&self, skill: TypeId) -> u8 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    pub fn skills(&self) -> impl Iterator<Item = (TypeId, u8)> + '_ {
        self.skills.iter().map(|(&skill, &level)| (skill, level))
    }

    /// Sets a skill level; level 0 forgets the skill. Returns the previous level.
    pub(crate) fn set_skill_level(&mut self, skill: TypeId, level: u8) -> u8 {
        let previous = if level == 0 {
            self.skills.remove(&skill)
        } else {
            self.skills.insert(skill, level)
        };
        previous.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untrained_skill_is_level_zero() {
        let character = Character::new();
        assert_eq!(character.skill_level(TypeId(3300)), 0);
    }

    #[test]
    fn set_and_forget() {
        let mut character = Character::new();
        assert_eq!(character.set_skill_level(TypeId(1), 4), 0);
        assert_eq!(character.set_skill_level(TypeId(1), 5), 4);
        assert_eq!(character.set_skill_level(TypeId(1), 0), 5);
        assert_eq!(character.skills().count(), 0);
    }
}
