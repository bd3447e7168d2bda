//! Effects: named units of game logic attached to item types.
//!
//! An effect has a category, which decides in which item states it runs, and
//! one handler. Handlers are either declarative (a list of
//! [`ModifierTemplate`]s loaded from data) or code implementing
//! [`EffectHandler`]. Both only act through the [`EffectContext`].
mod context;
mod filter;
mod registry;

pub use context::EffectContext;
pub use filter::{Domain, Filter};
pub use registry::{EffectRegistry, RegistryError};

use std::fmt;
use std::sync::Arc;

use crate::env::EffectId;
use crate::fit::{Fit, Item, ItemState};
use crate::modifier::ModifierTemplate;

/// When an effect runs.
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
pub enum EffectCategory {
    /// Always runs, even on offline items.
    Passive,
    Online,
    Active,
    Overload,
}

impl EffectCategory {
    /// Lowest item state in which the effect runs.
    pub const fn required_state(self) -> ItemState {
        match self {
            EffectCategory::Passive => ItemState::Offline,
            EffectCategory::Online => ItemState::Online,
            EffectCategory::Active => ItemState::Active,
            EffectCategory::Overload => ItemState::Overloaded,
        }
    }

    pub fn runs_in(self, state: ItemState) -> bool {
        state >= self.required_state()
    }
}

/// Code-defined effect logic.
pub trait EffectHandler: Send + Sync {
    fn apply(&self, fit: &Fit, item: &Item, ctx: &mut EffectContext<'_>);
}

impl<F> EffectHandler for F
where
    F: Fn(&Fit, &Item, &mut EffectContext<'_>) + Send + Sync,
{
    fn apply(&self, fit: &Fit, item: &Item, ctx: &mut EffectContext<'_>) {
        self(fit, item, ctx)
    }
}

#[derive(Clone)]
pub enum EffectHandlerKind {
    Modifiers(Vec<ModifierTemplate>),
    Custom(Arc<dyn EffectHandler>),
}

impl fmt::Debug for EffectHandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectHandlerKind::Modifiers(templates) => {
                f.debug_tuple("Modifiers").field(templates).finish()
            }
            EffectHandlerKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Shared, immutable effect definition.
#[derive(Clone, Debug)]
pub struct EffectDefinition {
    pub id: EffectId,
    pub name: String,
    pub category: EffectCategory,
    pub handler: EffectHandlerKind,
}

impl EffectDefinition {
    pub fn declarative(
        id: EffectId,
        name: impl Into<String>,
        category: EffectCategory,
        modifiers: Vec<ModifierTemplate>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            handler: EffectHandlerKind::Modifiers(modifiers),
        }
    }

    pub fn custom<H>(
        id: EffectId,
        name: impl Into<String>,
        category: EffectCategory,
        handler: H,
    ) -> Self
    where
        H: EffectHandler + 'static,
    {
        Self {
            id,
            name: name.into(),
            category,
            handler: EffectHandlerKind::Custom(Arc::new(handler)),
        }
    }

    /// Runs the handler for `item`.
    pub fn run(&self, fit: &Fit, item: &Item, ctx: &mut EffectContext<'_>) {
        match &self.handler {
            EffectHandlerKind::Modifiers(templates) => {
                for template in templates {
                    ctx.emit(template.clone());
                }
            }
            EffectHandlerKind::Custom(handler) => handler.apply(fit, item, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_gate_on_state() {
        assert!(EffectCategory::Passive.runs_in(ItemState::Offline));
        assert!(!EffectCategory::Online.runs_in(ItemState::Offline));
        assert!(EffectCategory::Active.runs_in(ItemState::Overloaded));
        assert!(!EffectCategory::Overload.runs_in(ItemState::Active));
    }
}
