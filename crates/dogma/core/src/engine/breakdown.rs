use std::fmt;

use crate::env::{AttributeId, EffectId};
use crate::fit::ItemId;
use crate::modifier::Operation;

/// One modifier as it was applied to an attribute.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakdownEntry {
    pub source: ItemId,
    pub effect: EffectId,
    pub operation: Operation,
    /// Evaluated modifier value.
    pub raw: f64,
    /// Stacking multiplier applied (1.0 when not penalized).
    pub multiplier: f64,
    /// False when the modifier was overridden or skipped.
    pub applied: bool,
    pub penalty_group: Option<String>,
}

impl BreakdownEntry {
    pub fn is_penalized(&self) -> bool {
        self.multiplier < 1.0
    }
}

/// "Affected by" view of one attribute: its base, every modifier acting on
/// it, and the final value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeBreakdown {
    pub item: ItemId,
    pub attribute: AttributeId,
    pub base: f64,
    pub value: f64,
    pub entries: Vec<BreakdownEntry>,
}

impl AttributeBreakdown {
    pub fn is_modified(&self) -> bool {
        self.entries.iter().any(|entry| entry.applied)
    }

    /// Entries contributed by `source`.
    pub fn from_source(&self, source: ItemId) -> impl Iterator<Item = &BreakdownEntry> {
        self.entries.iter().filter(move |entry| entry.source == source)
    }
}

impl fmt::Display for AttributeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}: {} -> {}",
            self.item, self.attribute, self.base, self.value
        )?;
        for entry in &self.entries {
            write!(
                f,
                "  {} {} {} ({})",
                entry.source, entry.operation, entry.raw, entry.effect
            )?;
            if entry.is_penalized() {
                write!(f, " x{:.4}", entry.multiplier)?;
            }
            if !entry.applied {
                f.write_str(" [not applied]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
