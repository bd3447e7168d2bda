use std::collections::BTreeSet;

use bitflags::bitflags;

use crate::fit::ItemId;

use super::store::AttrKey;

bitflags! {
    /// Tracks which parts of a fit a command changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ChangeFlags: u8 {
        const SHIP      = 1 << 0;
        const ITEMS     = 1 << 1;
        const STATE     = 1 << 2;
        const SKILLS    = 1 << 3;
        const CHARGES   = 1 << 4;
        /// The collected modifier set differs from the previous one.
        const MODIFIERS = 1 << 5;
    }
}

/// Summary of one executed [`crate::fit::FitCommand`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitDelta {
    pub flags: ChangeFlags,
    /// Item created by the command (hull, module, charge or skill item).
    pub added: Option<ItemId>,
    pub removed: Vec<ItemId>,
    /// Attributes whose cached value was dropped.
    pub invalidated: BTreeSet<AttrKey>,
}

impl FitDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.invalidated.is_empty()
    }

    pub fn touches(&self, key: AttrKey) -> bool {
        self.invalidated.contains(&key)
    }
}
