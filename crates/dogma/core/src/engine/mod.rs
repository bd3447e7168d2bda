//! Fit mutation and attribute recalculation.
//!
//! The [`DogmaEngine`] owns the fit and the attribute store. Every mutation
//! flows through [`DogmaEngine::execute`]:
//!
//! validate → apply to the fit → recollect modifiers → invalidate changed targets
//!
//! Reads ([`DogmaEngine::get`]) are lazy: only the attributes a caller asks
//! for, and what they depend on, are ever computed.

mod breakdown;
mod delta;
mod diagnostics;
mod eval;
mod index;
mod store;

pub use breakdown::{AttributeBreakdown, BreakdownEntry};
pub use delta::{ChangeFlags, FitDelta};
pub use diagnostics::{CycleReport, Diagnostics, DivisionByZero};
pub use index::ModifierIndex;
pub use store::{AttrKey, AttributeStore, NodeKey, NodeState};

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::DogmaConfig;
use crate::effect::EffectContext;
use crate::env::{AttributeId, DogmaEnv, OracleError, TypeDefinition, TypeId};
use crate::fit::{Fit, FitCommand, FitError, Item, ItemId, ItemKind, ItemState};
use crate::modifier::{Modifier, PenaltyCurve};

use eval::Evaluator;

/// Attribute engine for one fit.
pub struct DogmaEngine<'a> {
    env: DogmaEnv<'a>,
    config: DogmaConfig,
    curve: PenaltyCurve,
    fit: Fit,
    store: AttributeStore,
    modifiers: ModifierIndex,
    diagnostics: Diagnostics,
}

impl<'a> DogmaEngine<'a> {
    /// Creates an engine with an empty fit.
    pub fn new(env: DogmaEnv<'a>) -> Self {
        Self::with_config(env, DogmaConfig::default())
    }

    pub fn with_config(env: DogmaEnv<'a>, config: DogmaConfig) -> Self {
        Self {
            env,
            curve: PenaltyCurve::from_config(&config),
            config,
            fit: Fit::new(),
            store: AttributeStore::new(),
            modifiers: ModifierIndex::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn env(&self) -> DogmaEnv<'a> {
        self.env
    }

    pub fn config(&self) -> &DogmaConfig {
        &self.config
    }

    pub fn fit(&self) -> &Fit {
        &self.fit
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn clear_diagnostics(&mut self) {
        self.diagnostics.clear();
    }

    /// Modifiers currently in effect.
    pub fn modifiers(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter()
    }

    // ===== reads =====

    /// Computed value of an attribute, evaluated lazily.
    pub fn get(&mut self, item: ItemId, attribute: AttributeId) -> Result<f64, FitError> {
        self.ensure_item(item)?;
        Ok(self.evaluator().get(AttrKey::new(item, attribute)))
    }

    /// Unmodified value of an attribute.
    pub fn get_base(&self, item: ItemId, attribute: AttributeId) -> Result<f64, FitError> {
        let item = self.fit.item(item).ok_or(FitError::ItemNotFound(item))?;
        Ok(self
            .env
            .base_value(item.type_id, attribute, self.config.default_attribute_value))
    }

    /// Attributes of `item` worth displaying: those its type defines and
    /// those targeted by a modifier.
    pub fn attribute_ids(&self, item: ItemId) -> Result<BTreeSet<AttributeId>, FitError> {
        let instance = self.fit.item(item).ok_or(FitError::ItemNotFound(item))?;
        let mut ids: BTreeSet<AttributeId> = self
            .env
            .types()
            .definition(instance.type_id)
            .map(|definition| definition.attributes.keys().copied().collect())
            .unwrap_or_default();
        ids.extend(
            self.modifiers
                .iter()
                .filter(|modifier| modifier.target == item)
                .map(|modifier| modifier.attribute),
        );
        Ok(ids)
    }

    /// Every modifier acting on an attribute, with the penalties applied.
    pub fn breakdown(
        &mut self,
        item: ItemId,
        attribute: AttributeId,
    ) -> Result<AttributeBreakdown, FitError> {
        self.ensure_item(item)?;
        let key = AttrKey::new(item, attribute);
        let computation = self.evaluator().explain(key);

        let entries = computation
            .combined
            .terms
            .iter()
            .map(|term| {
                let contribution = &computation.contributions[term.index];
                BreakdownEntry {
                    source: contribution.source,
                    effect: contribution.effect,
                    operation: contribution.operation,
                    raw: contribution.raw,
                    multiplier: term.multiplier,
                    applied: term.applied,
                    penalty_group: contribution.penalty_group.map(str::to_owned),
                }
            })
            .collect();

        Ok(AttributeBreakdown {
            item,
            attribute,
            base: computation.base,
            value: computation.combined.value,
            entries,
        })
    }

    /// Drops the cached value of an attribute and of everything computed
    /// from it. Returns the attributes that held a cached value.
    pub fn invalidate(&mut self, item: ItemId, attribute: AttributeId) -> BTreeSet<AttrKey> {
        self.store
            .invalidate(NodeKey::Attr(AttrKey::new(item, attribute)))
    }

    pub fn is_dirty(&self, item: ItemId, attribute: AttributeId) -> bool {
        self.store.is_dirty(AttrKey::new(item, attribute))
    }

    /// Number of evaluated attributes waiting for recomputation.
    pub fn dirty_count(&self) -> usize {
        self.store.dirty_count()
    }

    fn evaluator(&mut self) -> Evaluator<'_, 'a> {
        Evaluator {
            env: self.env,
            config: &self.config,
            curve: &self.curve,
            fit: &self.fit,
            modifiers: &self.modifiers,
            store: &mut self.store,
            diagnostics: &mut self.diagnostics,
            stack: Vec::new(),
        }
    }

    fn ensure_item(&self, item: ItemId) -> Result<(), FitError> {
        if self.fit.contains(item) {
            Ok(())
        } else {
            Err(FitError::ItemNotFound(item))
        }
    }

    // ===== mutation =====

    /// Executes a fit command.
    ///
    /// Commands are validated before the fit is touched: on error, the fit
    /// and every cached value are left unchanged.
    pub fn execute(&mut self, command: FitCommand) -> Result<FitDelta, FitError> {
        debug!(
            target: "dogma::engine",
            command = command.as_str(),
            "executing fit command"
        );

        let mut delta = FitDelta::new();
        let mut skill_changed = None;

        match command {
            FitCommand::SetShip { type_id } => {
                let ship = self.instantiate(type_id, ItemKind::Ship, ItemState::Online, None)?;
                if let Some(old) = self.fit.ship() {
                    delta.removed.extend(self.fit.remove(old));
                }
                delta.added = Some(ship.id);
                delta.flags |= ChangeFlags::SHIP;
                self.fit.insert(ship);
            }
            FitCommand::AddItem {
                type_id,
                kind,
                state,
            } => {
                if !kind.is_fittable() {
                    return Err(FitError::UnsupportedKind { type_id, kind });
                }
                let item = self.instantiate(type_id, kind, state, None)?;
                delta.added = Some(item.id);
                delta.flags |= ChangeFlags::ITEMS;
                self.fit.insert(item);
            }
            FitCommand::RemoveItem { item } => {
                let target = self.fit.item(item).ok_or(FitError::ItemNotFound(item))?;
                if target.kind == ItemKind::Skill {
                    return Err(FitError::UnsupportedKind {
                        type_id: target.type_id,
                        kind: target.kind,
                    });
                }
                delta.flags |= match target.kind {
                    ItemKind::Ship => ChangeFlags::SHIP,
                    ItemKind::Charge => ChangeFlags::CHARGES,
                    _ => ChangeFlags::ITEMS,
                };
                delta.removed = self.fit.remove(item);
            }
            FitCommand::SetState { item, state } => {
                let target = self.fit.item(item).ok_or(FitError::ItemNotFound(item))?;
                if !target.kind.is_toggleable() {
                    return Err(FitError::UnsupportedKind {
                        type_id: target.type_id,
                        kind: target.kind,
                    });
                }
                let definition = self.definition(target.type_id)?;
                let max = self.max_state(definition);
                if state > max {
                    return Err(FitError::UnsupportedState {
                        type_id: target.type_id,
                        state,
                        max,
                    });
                }
                if target.state == state {
                    return Ok(delta);
                }
                if let Some(target) = self.fit.item_mut(item) {
                    target.state = state;
                }
                delta.flags |= ChangeFlags::STATE;
            }
            FitCommand::SetSkillLevel { skill, level } => {
                if level > DogmaConfig::MAX_SKILL_LEVEL {
                    return Err(FitError::InvalidSkillLevel { skill, level });
                }
                self.definition(skill)?;
                if self.env.types().category_of(skill) != Some(self.config.skill_category) {
                    return Err(FitError::NotASkill(skill));
                }
                let previous = self.fit.skill_level(skill);
                if previous == level {
                    return Ok(delta);
                }

                let skill_item = if previous == 0 {
                    Some(self.instantiate(skill, ItemKind::Skill, ItemState::Online, None)?)
                } else {
                    None
                };
                self.fit.character_mut().set_skill_level(skill, level);
                if level == 0 {
                    if let Some(id) = self.fit.skill_item(skill) {
                        delta.removed.extend(self.fit.remove(id));
                    }
                }
                if let Some(item) = skill_item {
                    delta.added = Some(item.id);
                    self.fit.insert(item);
                }
                delta.flags |= ChangeFlags::SKILLS;
                skill_changed = Some(skill);
            }
            FitCommand::LoadCharge { module, type_id } => {
                self.charge_container(module)?;
                let charge =
                    self.instantiate(type_id, ItemKind::Charge, ItemState::Online, Some(module))?;
                if let Some(old) = self.fit.charge_of(module) {
                    delta.removed.extend(self.fit.remove(old));
                }
                delta.added = Some(charge.id);
                delta.flags |= ChangeFlags::CHARGES;
                self.fit.insert(charge);
            }
            FitCommand::UnloadCharge { module } => {
                self.charge_container(module)?;
                match self.fit.charge_of(module) {
                    Some(charge) => {
                        delta.removed.extend(self.fit.remove(charge));
                        delta.flags |= ChangeFlags::CHARGES;
                    }
                    None => return Ok(delta),
                }
            }
        }

        for removed in &delta.removed {
            for key in self.store.keys_of(*removed) {
                delta.invalidated.extend(self.store.invalidate(NodeKey::Attr(key)));
            }
            self.store.purge_item(*removed);
        }
        if let Some(skill) = skill_changed {
            delta
                .invalidated
                .extend(self.store.invalidate(NodeKey::Skill(skill)));
        }
        self.recollect(&mut delta);
        delta.invalidated.retain(|key| self.fit.contains(key.item));

        debug!(
            target: "dogma::engine",
            flags = ?delta.flags,
            invalidated = delta.invalidated.len(),
            modifiers = self.modifiers.len(),
            "fit command applied"
        );
        Ok(delta)
    }

    /// Reruns every applicable effect and invalidates the targets whose
    /// modifier list changed.
    fn recollect(&mut self, delta: &mut FitDelta) {
        let next = self.collect();
        let changed = self.modifiers.changed_targets(&next);
        self.modifiers = next;
        if changed.is_empty() {
            return;
        }

        delta.flags |= ChangeFlags::MODIFIERS;
        for key in changed {
            if self.fit.contains(key.item) {
                delta.invalidated.extend(self.store.invalidate(NodeKey::Attr(key)));
            }
        }
    }

    fn collect(&self) -> ModifierIndex {
        let env = self.env;
        let mut modifiers = Vec::new();

        for item in self.fit.items() {
            let Some(definition) = env.types().definition(item.type_id) else {
                warn!(
                    target: "dogma::engine",
                    item = %item.id,
                    type_id = %item.type_id,
                    "item type missing from static data"
                );
                continue;
            };
            let state = self.effective_state(item);

            for effect_id in &definition.effects {
                let effect = match env.effects().lookup(*effect_id) {
                    Ok(effect) => effect,
                    Err(error) => {
                        warn!(
                            target: "dogma::engine",
                            item = %item.id,
                            error = %error,
                            "skipping effect"
                        );
                        continue;
                    }
                };
                if !effect.category.runs_in(state) {
                    continue;
                }
                let mut ctx = EffectContext::new(
                    env,
                    &self.fit,
                    item,
                    effect.id,
                    self.config.default_attribute_value,
                );
                effect.run(&self.fit, item, &mut ctx);
                modifiers.extend(ctx.into_modifiers());
            }
        }

        ModifierIndex::from_modifiers(modifiers)
    }

    /// Charges run their effects in the state of the module holding them.
    fn effective_state(&self, item: &Item) -> ItemState {
        match item.container.and_then(|container| self.fit.item(container)) {
            Some(container) if item.is_charge() => container.state,
            _ => item.state,
        }
    }

    fn definition(&self, type_id: TypeId) -> Result<&'a TypeDefinition, FitError> {
        Ok(self
            .env
            .types()
            .definition(type_id)
            .ok_or(OracleError::TypeNotFound(type_id))?)
    }

    /// Highest state a type supports, derived from its effect categories.
    fn max_state(&self, definition: &TypeDefinition) -> ItemState {
        definition
            .effects
            .iter()
            .filter_map(|effect| self.env.effects().lookup(*effect).ok())
            .map(|effect| effect.category.required_state())
            .max()
            .map_or(ItemState::Online, |state| state.max(ItemState::Online))
    }

    fn charge_container(&self, module: ItemId) -> Result<(), FitError> {
        let container = self.fit.item(module).ok_or(FitError::ItemNotFound(module))?;
        if container.kind == ItemKind::Module {
            Ok(())
        } else {
            Err(FitError::InvalidChargeContainer(module))
        }
    }

    /// Validates a type against static data and builds a new item of it.
    ///
    /// Every effect the type declares must be registered: an unknown id means
    /// the static data and the registry do not belong together.
    fn instantiate(
        &mut self,
        type_id: TypeId,
        kind: ItemKind,
        state: ItemState,
        container: Option<ItemId>,
    ) -> Result<Item, FitError> {
        let types = self.env.types();
        let definition = self.definition(type_id)?;
        let group = types
            .group(definition.group)
            .ok_or(OracleError::GroupNotFound {
                type_id,
                group: definition.group,
            })?;
        for effect in &definition.effects {
            self.env.effects().lookup(*effect)?;
        }

        let max = if kind.is_toggleable() {
            self.max_state(definition)
        } else {
            ItemState::Online
        };
        if state > max {
            return Err(FitError::UnsupportedState {
                type_id,
                state,
                max,
            });
        }

        Ok(Item {
            id: self.fit.allocate_id(),
            type_id,
            group: definition.group,
            category: group.category,
            kind,
            state,
            slot: definition.slot,
            required_skills: definition.required_skills.clone(),
            container,
        })
    }
}
