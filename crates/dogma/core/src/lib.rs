//! Attribute and effect evaluation for ship fits.
//!
//! `dogma-core` computes the modified attributes of every item in a fit:
//! effects attached to item types emit modifiers, modifiers are folded per
//! target attribute in a fixed order with stacking penalties, and the results
//! are cached in a dependency graph that is invalidated precisely when the fit
//! changes. All mutation flows through [`engine::DogmaEngine::execute`]; static
//! data is read through the oracles in [`env`].
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod fit;
pub mod modifier;

pub use config::DogmaConfig;
pub use effect::{
    Domain, EffectCategory, EffectContext, EffectDefinition, EffectHandler, EffectHandlerKind,
    EffectRegistry, Filter, RegistryError,
};
pub use engine::{
    AttrKey, AttributeBreakdown, BreakdownEntry, ChangeFlags, CycleReport, Diagnostics,
    DivisionByZero, DogmaEngine, FitDelta,
};
pub use env::{
    AttributeDefinition, AttributeId, AttributeOracle, AttributesSnapshot, CategoryDefinition,
    CategoryId, DogmaEnv, EffectId, Env, GroupDefinition, GroupId, OracleError, RequiredSkill,
    Rounding, Slot, StaticSnapshot, TypeDefinition, TypeId, TypeOracle, TypesSnapshot, Unit,
};
pub use error::{DogmaError, ErrorContext, ErrorSeverity};
pub use fit::{Character, Fit, FitCommand, FitError, Item, ItemId, ItemKind, ItemState};
pub use modifier::{
    ItemRef, Modifier, ModifierTemplate, Operation, OrderClass, PenaltyCurve, Stacking, Target,
    ValueExpr,
};
