//! Traits describing read-only static data.
//!
//! Oracles expose type definitions (with their group/category hierarchy and
//! base attribute values) and attribute definitions. The [`Env`] aggregate
//! bundles them with the effect registry so the engine can reach everything it
//! needs without hard coupling to concrete implementations.
mod attributes;
mod error;
mod ids;
mod snapshot;
mod types;

pub use attributes::{AttributeDefinition, AttributeOracle, Rounding, Unit};
pub use error::OracleError;
pub use ids::{AttributeId, CategoryId, EffectId, GroupId, TypeId};
pub use snapshot::{AttributesSnapshot, StaticSnapshot, TypesSnapshot};
pub use types::{
    CategoryDefinition, GroupDefinition, RequiredSkill, RequiredSkills, Slot, TypeDefinition,
    TypeOracle,
};

use crate::effect::EffectRegistry;

/// Aggregates the read-only collaborators required by the engine.
pub struct Env<'a, T, A>
where
    T: TypeOracle + ?Sized,
    A: AttributeOracle + ?Sized,
{
    types: &'a T,
    attributes: &'a A,
    effects: &'a EffectRegistry,
}

// Manual impls: derive would require `T: Clone`, which unsized oracles are not.
impl<T, A> Clone for Env<'_, T, A>
where
    T: TypeOracle + ?Sized,
    A: AttributeOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for Env<'_, T, A>
where
    T: TypeOracle + ?Sized,
    A: AttributeOracle + ?Sized,
{
}

pub type DogmaEnv<'a> = Env<'a, dyn TypeOracle + 'a, dyn AttributeOracle + 'a>;

impl<'a, T, A> Env<'a, T, A>
where
    T: TypeOracle + ?Sized,
    A: AttributeOracle + ?Sized,
{
    pub fn new(types: &'a T, attributes: &'a A, effects: &'a EffectRegistry) -> Self {
        Self {
            types,
            attributes,
            effects,
        }
    }

    pub fn types(&self) -> &'a T {
        self.types
    }

    pub fn attributes(&self) -> &'a A {
        self.attributes
    }

    pub fn effects(&self) -> &'a EffectRegistry {
        self.effects
    }

    /// Base value of `attribute` on instances of `type_id`.
    ///
    /// Falls back to the attribute definition's default, then to `fallback`
    /// when the attribute is not defined at all.
    pub fn base_value(&self, type_id: TypeId, attribute: AttributeId, fallback: f64) -> f64 {
        self.types
            .definition(type_id)
            .and_then(|definition| definition.base_value(attribute))
            .or_else(|| {
                self.attributes
                    .attribute(attribute)
                    .map(|definition| definition.default_value)
            })
            .unwrap_or(fallback)
    }
}

impl<'a> DogmaEnv<'a> {
    /// Builds an environment backed by one in-memory snapshot.
    pub fn from_snapshot(snapshot: &'a StaticSnapshot, effects: &'a EffectRegistry) -> Self {
        Self::new(snapshot, snapshot, effects)
    }
}

impl<'a, T, A> Env<'a, T, A>
where
    T: TypeOracle + 'a,
    A: AttributeOracle + 'a,
{
    /// Converts this environment into the trait-object based [`DogmaEnv`].
    pub fn into_dogma_env(self) -> DogmaEnv<'a> {
        let types: &'a dyn TypeOracle = self.types;
        let attributes: &'a dyn AttributeOracle = self.attributes;
        Env::new(types, attributes, self.effects)
    }
}
