//! Modifiers: what effects produce and how they combine.
//!
//! Effects do not write attribute values. They emit [`ModifierTemplate`]s that
//! the effect context binds to concrete items, producing [`Modifier`]s. The
//! engine evaluates their values lazily and folds them per target attribute
//! with [`applier::combine`], consulting [`stacking`] for penalized groups.
pub mod applier;
mod expr;
mod operation;
pub mod stacking;

pub use applier::{AppliedTerm, AttributeRules, Combined, Contribution};
pub use expr::{BoundExpr, ItemRef, Operand, ValueExpr};
pub use operation::{Operation, OrderClass};
pub use stacking::PenaltyCurve;

use crate::effect::{Domain, Filter};
use crate::env::{AttributeId, EffectId};
use crate::fit::ItemId;

/// Stacking behavior of a modifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stacking {
    /// Always applied at full strength.
    #[default]
    Immune,
    /// Attenuated by rank among modifiers of the same group.
    Penalized { group: String },
}

impl Stacking {
    pub const DEFAULT_GROUP: &'static str = "default";

    /// Penalized in the shared default group.
    pub fn penalized() -> Self {
        Stacking::Penalized {
            group: Self::DEFAULT_GROUP.to_owned(),
        }
    }

    pub fn group(&self) -> Option<&str> {
        match self {
            Stacking::Immune => None,
            Stacking::Penalized { group } => Some(group),
        }
    }
}

/// Items a template targets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// A single item relative to the source.
    Item(ItemRef),
    /// Every item of `domain` matching `filter`.
    Filtered { domain: Domain, filter: Filter },
}

/// Unbound modifier, as declared by an effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierTemplate {
    pub target: Target,
    pub attribute: AttributeId,
    pub operation: Operation,
    pub value: ValueExpr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacking: Stacking,
}

impl ModifierTemplate {
    pub fn new(
        target: Target,
        attribute: AttributeId,
        operation: Operation,
        value: ValueExpr,
    ) -> Self {
        Self {
            target,
            attribute,
            operation,
            value,
            stacking: Stacking::Immune,
        }
    }

    pub fn penalized(mut self) -> Self {
        self.stacking = Stacking::penalized();
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.stacking = Stacking::Penalized {
            group: group.into(),
        };
        self
    }
}

/// A modifier bound to concrete items of one fit.
#[derive(Clone, Debug, PartialEq)]
pub struct Modifier {
    pub source: ItemId,
    pub effect: EffectId,
    pub target: ItemId,
    pub attribute: AttributeId,
    pub operation: Operation,
    pub value: BoundExpr,
    pub stacking: Stacking,
}

impl Modifier {
    /// Pairs the modifier with its evaluated value for the applier.
    pub fn contribution(&self, raw: f64) -> Contribution<'_> {
        Contribution {
            source: self.source,
            effect: self.effect,
            operation: self.operation,
            raw,
            penalty_group: self.stacking.group(),
        }
    }
}
