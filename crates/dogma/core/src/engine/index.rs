use std::collections::{BTreeMap, BTreeSet};

use crate::modifier::Modifier;

use super::store::AttrKey;

/// Collected modifiers grouped by the attribute they target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierIndex {
    by_target: BTreeMap<AttrKey, Vec<Modifier>>,
}

impl ModifierIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modifiers(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        let mut by_target: BTreeMap<AttrKey, Vec<Modifier>> = BTreeMap::new();
        for modifier in modifiers {
            by_target
                .entry(AttrKey::new(modifier.target, modifier.attribute))
                .or_default()
                .push(modifier);
        }
        for modifiers in by_target.values_mut() {
            modifiers.sort_by_key(|modifier| (modifier.source, modifier.effect));
        }
        Self { by_target }
    }

    pub fn targeting(&self, key: AttrKey) -> &[Modifier] {
        self.by_target.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Targets whose modifier list differs between `self` and `other`.
    pub fn changed_targets(&self, other: &ModifierIndex) -> BTreeSet<AttrKey> {
        let keys: BTreeSet<AttrKey> = self
            .by_target
            .keys()
            .chain(other.by_target.keys())
            .copied()
            .collect();
        keys.into_iter()
            .filter(|key| self.targeting(*key) != other.targeting(*key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.by_target.values().flatten()
    }
}
