//! Fit aggregate: the character, the hull, and everything fitted to it.
//!
//! The fit is plain data. Every mutation goes through
//! [`crate::engine::DogmaEngine::execute`], which validates the
//! [`FitCommand`] against static data, applies it here, and then invalidates
//! the computed attributes that the change touches.

mod character;
mod command;
mod error;
mod item;

pub use character::Character;
pub use command::FitCommand;
pub use error::FitError;
pub use item::{Item, ItemId, ItemKind, ItemState};

use std::collections::BTreeMap;

use crate::effect::Domain;
use crate::env::TypeId;

#[derive(Clone, Debug, Default)]
pub struct Fit {
    character: Character,
    ship: Option<ItemId>,
    items: BTreeMap<ItemId, Item>,
    next_id: u32,
}

impl Fit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Trained level of `skill`, 0 when untrained.
    pub fn skill_level(&self, skill: TypeId) -> u8 {
        self.character.skill_level(skill)
    }

    pub fn ship(&self) -> Option<ItemId> {
        self.ship
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// All items in id order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items belonging to `domain`, in id order.
    pub fn items_in(&self, domain: Domain) -> impl Iterator<Item = &Item> {
        self.items.values().filter(move |item| domain.contains(item))
    }

    /// Charge currently loaded into `module`.
    pub fn charge_of(&self, module: ItemId) -> Option<ItemId> {
        self.items
            .values()
            .find(|item| item.container == Some(module))
            .map(|item| item.id)
    }

    /// Skill item representing `skill`, present while the skill is trained.
    pub fn skill_item(&self, skill: TypeId) -> Option<ItemId> {
        self.items
            .values()
            .find(|item| item.kind == ItemKind::Skill && item.type_id == skill)
            .map(|item| item.id)
    }

    // ===== mutation (engine only) =====

    pub(crate) fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn insert(&mut self, item: Item) {
        if item.kind == ItemKind::Ship {
            self.ship = Some(item.id);
        }
        self.items.insert(item.id, item);
    }

    /// Removes an item together with the charge loaded into it.
    /// Returns the ids actually removed.
    pub(crate) fn remove(&mut self, id: ItemId) -> Vec<ItemId> {
        let mut removed = Vec::new();
        if let Some(charge) = self.charge_of(id) {
            self.items.remove(&charge);
            removed.push(charge);
        }
        if self.items.remove(&id).is_some() {
            removed.push(id);
        }
        if self.ship == Some(id) {
            self.ship = None;
        }
        removed
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub(crate) fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }
}
