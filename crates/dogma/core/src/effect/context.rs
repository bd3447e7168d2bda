//! The interface effect handlers talk to.

use tracing::warn;

use crate::env::{AttributeId, DogmaEnv, EffectId, TypeId};
use crate::fit::{Fit, Item, ItemId, ItemState};
use crate::modifier::{BoundExpr, ItemRef, Modifier, ModifierTemplate, Operation, Target, ValueExpr};

use super::{Domain, Filter};

/// Transient handle passed to an effect handler while it runs.
///
/// Handlers read the fit through it and emit modifiers into it. References in
/// emitted templates are resolved against the item running the effect, so a
/// handler never needs to know item ids.
pub struct EffectContext<'a> {
    env: DogmaEnv<'a>,
    fit: &'a Fit,
    source: &'a Item,
    effect: EffectId,
    default_value: f64,
    modifiers: Vec<Modifier>,
}

impl<'a> EffectContext<'a> {
    pub fn new(
        env: DogmaEnv<'a>,
        fit: &'a Fit,
        source: &'a Item,
        effect: EffectId,
        default_value: f64,
    ) -> Self {
        Self {
            env,
            fit,
            source,
            effect,
            default_value,
            modifiers: Vec::new(),
        }
    }

    pub fn env(&self) -> DogmaEnv<'a> {
        self.env
    }

    pub fn source(&self) -> &'a Item {
        self.source
    }

    pub fn effect(&self) -> EffectId {
        self.effect
    }

    // ===== queries =====

    /// Trained level of `skill` (0 when untrained).
    ///
    /// The level is read once. Prefer [`ValueExpr::skill_level`] inside a
    /// modifier value so the attribute is tracked as depending on the skill.
    pub fn skill_level(&self, skill: TypeId) -> u8 {
        self.fit.skill_level(skill)
    }

    /// Looks a type up by name, e.g. a skill referenced by a code handler.
    pub fn type_named(&self, name: &str) -> Option<TypeId> {
        self.env.types().type_by_name(name).map(|definition| definition.id)
    }

    pub fn attribute_named(&self, name: &str) -> Option<AttributeId> {
        self.env
            .attributes()
            .attribute_by_name(name)
            .map(|definition| definition.id)
    }

    pub fn item_state(&self, item: ItemId) -> Option<ItemState> {
        self.fit.item(item).map(|item| item.state)
    }

    /// Unmodified value of an attribute.
    pub fn base_attr(&self, item: ItemId, attribute: AttributeId) -> f64 {
        self.fit.item(item).map_or(self.default_value, |item| {
            self.env.base_value(item.type_id, attribute, self.default_value)
        })
    }

    /// Resolves a relative reference to an item of the fit.
    pub fn resolve(&self, reference: ItemRef) -> Option<ItemId> {
        match reference {
            ItemRef::SelfItem => Some(self.source.id),
            ItemRef::Ship => self.fit.ship(),
            ItemRef::Charge => self.fit.charge_of(self.source.id),
            ItemRef::Container => self.source.container,
        }
    }

    // ===== modifier helpers =====

    /// Post-percentage boost of `attribute` on every item of `domain`
    /// matching `filter`.
    pub fn filtered_item_boost(
        &mut self,
        domain: Domain,
        filter: Filter,
        attribute: AttributeId,
        value: impl Into<ValueExpr>,
    ) {
        self.emit(ModifierTemplate::new(
            Target::Filtered { domain, filter },
            attribute,
            Operation::PostPercent,
            value.into(),
        ));
    }

    /// Additive increase of `attribute` on every matching item.
    pub fn filtered_item_increase(
        &mut self,
        domain: Domain,
        filter: Filter,
        attribute: AttributeId,
        value: impl Into<ValueExpr>,
    ) {
        self.emit(ModifierTemplate::new(
            Target::Filtered { domain, filter },
            attribute,
            Operation::ModAdd,
            value.into(),
        ));
    }

    pub fn item_boost(
        &mut self,
        target: ItemRef,
        attribute: AttributeId,
        value: impl Into<ValueExpr>,
    ) {
        self.emit_single(target, attribute, Operation::PostPercent, value.into());
    }

    pub fn item_increase(
        &mut self,
        target: ItemRef,
        attribute: AttributeId,
        value: impl Into<ValueExpr>,
    ) {
        self.emit_single(target, attribute, Operation::ModAdd, value.into());
    }

    pub fn item_multiply(
        &mut self,
        target: ItemRef,
        attribute: AttributeId,
        value: impl Into<ValueExpr>,
    ) {
        self.emit_single(target, attribute, Operation::PostMul, value.into());
    }

    /// Forces `attribute` to `value`, overriding every other modifier.
    pub fn item_force(
        &mut self,
        target: ItemRef,
        attribute: AttributeId,
        value: impl Into<ValueExpr>,
    ) {
        self.emit_single(target, attribute, Operation::PostAssign, value.into());
    }

    fn emit_single(
        &mut self,
        target: ItemRef,
        attribute: AttributeId,
        operation: Operation,
        value: ValueExpr,
    ) {
        self.emit(ModifierTemplate::new(
            Target::Item(target),
            attribute,
            operation,
            value,
        ));
    }

    /// Binds a template to the fit and records the resulting modifiers.
    ///
    /// Templates whose references cannot be resolved (a charge reference on a
    /// module without a charge, a hull reference without a hull) emit nothing.
    pub fn emit(&mut self, template: ModifierTemplate) {
        let fit = self.fit;
        let source = self.source;
        let Some(value) = template
            .value
            .bind(&|reference: &ItemRef| self.resolve(*reference))
        else {
            warn!(
                target: "dogma::effect",
                effect = %self.effect,
                source = %source.id,
                "modifier value references an item the fit does not have"
            );
            return;
        };

        let targets: Vec<ItemId> = match &template.target {
            Target::Item(reference) => self.resolve(*reference).into_iter().collect(),
            Target::Filtered { domain, filter } => fit
                .items_in(*domain)
                .filter(|item| filter.matches(item, source))
                .map(|item| item.id)
                .collect(),
        };

        for target in targets {
            self.push(target, &template, value.clone());
        }
    }

    fn push(&mut self, target: ItemId, template: &ModifierTemplate, value: BoundExpr) {
        self.modifiers.push(Modifier {
            source: self.source.id,
            effect: self.effect,
            target,
            attribute: template.attribute,
            operation: template.operation,
            value,
            stacking: template.stacking.clone(),
        });
    }

    /// Modifiers emitted so far.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn into_modifiers(self) -> Vec<Modifier> {
        self.modifiers
    }
}
