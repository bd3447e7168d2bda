//! Non-fatal findings collected while evaluating attributes.

use std::collections::BTreeSet;

use crate::env::EffectId;
use crate::fit::ItemId;

use super::store::AttrKey;

/// A circular dependency between attributes.
///
/// The path is rotated so that it starts at its smallest key; the same cycle
/// entered from different nodes is reported once.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleReport {
    pub path: Vec<AttrKey>,
}

impl CycleReport {
    pub fn new(path: &[AttrKey]) -> Self {
        let start = path
            .iter()
            .enumerate()
            .min_by_key(|(_, key)| **key)
            .map_or(0, |(index, _)| index);
        let mut path = path.to_vec();
        path.rotate_left(start);
        Self { path }
    }

    pub fn contains(&self, key: AttrKey) -> bool {
        self.path.contains(&key)
    }
}

/// A modifier skipped because it divides by zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DivisionByZero {
    pub target: AttrKey,
    pub source: ItemId,
    pub effect: EffectId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    cycles: BTreeSet<CycleReport>,
    divisions_by_zero: BTreeSet<DivisionByZero>,
    /// Attributes whose evaluation hit the depth limit.
    depth_exceeded: BTreeSet<AttrKey>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cycle; returns false if it was already known.
    pub fn record_cycle(&mut self, report: CycleReport) -> bool {
        self.cycles.insert(report)
    }

    pub fn record_division_by_zero(&mut self, entry: DivisionByZero) -> bool {
        self.divisions_by_zero.insert(entry)
    }

    pub fn record_depth_exceeded(&mut self, key: AttrKey) -> bool {
        self.depth_exceeded.insert(key)
    }

    pub fn cycles(&self) -> impl Iterator<Item = &CycleReport> {
        self.cycles.iter()
    }

    pub fn divisions_by_zero(&self) -> impl Iterator<Item = &DivisionByZero> {
        self.divisions_by_zero.iter()
    }

    pub fn depth_exceeded(&self) -> impl Iterator<Item = &AttrKey> {
        self.depth_exceeded.iter()
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
            && self.divisions_by_zero.is_empty()
            && self.depth_exceeded.is_empty()
    }

    pub fn clear(&mut self) {
        self.cycles.clear();
        self.divisions_by_zero.clear();
        self.depth_exceeded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::AttributeId;

    fn key(item: u32) -> AttrKey {
        AttrKey::new(ItemId(item), AttributeId(1))
    }

    #[test]
    fn cycle_paths_are_canonical() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.record_cycle(CycleReport::new(&[key(2), key(3), key(1)])));
        assert!(!diagnostics.record_cycle(CycleReport::new(&[key(1), key(2), key(3)])));
        let report = diagnostics.cycles().next().unwrap();
        assert_eq!(report.path, vec![key(1), key(2), key(3)]);
    }
}
