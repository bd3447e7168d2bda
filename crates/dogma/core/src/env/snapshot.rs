//! In-memory oracle implementations.
//!
//! The static-data loader fills a [`StaticSnapshot`] once before evaluation
//! begins; the engine then only reads from it.

use std::collections::{BTreeMap, HashMap};

use super::attributes::{AttributeDefinition, AttributeOracle};
use super::ids::{AttributeId, CategoryId, GroupId, TypeId};
use super::types::{CategoryDefinition, GroupDefinition, TypeDefinition, TypeOracle};

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Snapshot of the type hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypesSnapshot {
    types: BTreeMap<TypeId, TypeDefinition>,
    groups: BTreeMap<GroupId, GroupDefinition>,
    categories: BTreeMap<CategoryId, CategoryDefinition>,
    names: HashMap<String, TypeId>,
}

impl TypesSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a type, replacing any previous definition with the same id.
    pub fn insert_type(&mut self, definition: TypeDefinition) {
        if let Some(previous) = self.types.get(&definition.id) {
            self.names.remove(&previous.name);
        }
        self.names.insert(definition.name.clone(), definition.id);
        self.types.insert(definition.id, definition);
    }

    pub fn insert_group(&mut self, group: GroupDefinition) {
        self.groups.insert(group.id, group);
    }

    pub fn insert_category(&mut self, category: CategoryDefinition) {
        self.categories.insert(category.id, category);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }
}

impl TypeOracle for TypesSnapshot {
    fn definition(&self, id: TypeId) -> Option<&TypeDefinition> {
        self.types.get(&id)
    }

    fn group(&self, id: GroupId) -> Option<&GroupDefinition> {
        self.groups.get(&id)
    }

    fn category(&self, id: CategoryId) -> Option<&CategoryDefinition> {
        self.categories.get(&id)
    }

    fn type_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.names.get(name).and_then(|id| self.types.get(id))
    }
}

/// Snapshot of attribute definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributesSnapshot {
    attributes: BTreeMap<AttributeId, AttributeDefinition>,
    names: HashMap<String, AttributeId>,
}

impl AttributesSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: AttributeDefinition) {
        if let Some(previous) = self.attributes.get(&definition.id) {
            self.names.remove(&previous.name);
        }
        self.names.insert(definition.name.clone(), definition.id);
        self.attributes.insert(definition.id, definition);
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.attributes.values()
    }
}

impl AttributeOracle for AttributesSnapshot {
    fn attribute(&self, id: AttributeId) -> Option<&AttributeDefinition> {
        self.attributes.get(&id)
    }

    fn attribute_by_name(&self, name: &str) -> Option<&AttributeDefinition> {
        self.names.get(name).and_then(|id| self.attributes.get(id))
    }
}

/// Complete static data set: types plus attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticSnapshot {
    pub types: TypesSnapshot,
    pub attributes: AttributesSnapshot,
}

impl StaticSnapshot {
    pub fn new(types: TypesSnapshot, attributes: AttributesSnapshot) -> Self {
        Self { types, attributes }
    }

    pub fn with_category(mut self, category: CategoryDefinition) -> Self {
        self.types.insert_category(category);
        self
    }

    pub fn with_group(mut self, group: GroupDefinition) -> Self {
        self.types.insert_group(group);
        self
    }

    pub fn with_type(mut self, definition: TypeDefinition) -> Self {
        self.types.insert_type(definition);
        self
    }

    pub fn with_attribute(mut self, definition: AttributeDefinition) -> Self {
        self.attributes.insert(definition);
        self
    }
}

impl TypeOracle for StaticSnapshot {
    fn definition(&self, id: TypeId) -> Option<&TypeDefinition> {
        self.types.definition(id)
    }

    fn group(&self, id: GroupId) -> Option<&GroupDefinition> {
        self.types.group(id)
    }

    fn category(&self, id: CategoryId) -> Option<&CategoryDefinition> {
        self.types.category(id)
    }

    fn type_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.type_by_name(name)
    }
}

impl AttributeOracle for StaticSnapshot {
    fn attribute(&self, id: AttributeId) -> Option<&AttributeDefinition> {
        self.attributes.attribute(id)
    }

    fn attribute_by_name(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.attribute_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StaticSnapshot {
        StaticSnapshot::default()
            .with_category(CategoryDefinition::new(CategoryId(7), "Module"))
            .with_group(GroupDefinition::new(GroupId(53), "Energy Weapon", CategoryId(7)))
            .with_type(TypeDefinition::new(TypeId(3001), "Small Focused Beam", GroupId(53)))
            .with_attribute(AttributeDefinition::new(AttributeId(51), "speed").low_is_good())
    }

    #[test]
    fn category_resolves_through_group() {
        let data = sample();
        assert_eq!(data.category_of(TypeId(3001)), Some(CategoryId(7)));
        assert_eq!(data.category_of(TypeId(9)), None);
    }

    #[test]
    fn lookups_by_name() {
        let data = sample();
        assert_eq!(
            data.type_by_name("Small Focused Beam").map(|t| t.id),
            Some(TypeId(3001))
        );
        assert_eq!(
            data.attribute_by_name("speed").map(|a| a.id),
            Some(AttributeId(51))
        );
        assert!(data.type_by_name("missing").is_none());
    }

    #[test]
    fn replacing_a_type_drops_its_old_name() {
        let mut types = TypesSnapshot::new();
        types.insert_type(TypeDefinition::new(TypeId(1), "Old", GroupId(1)));
        types.insert_type(TypeDefinition::new(TypeId(1), "New", GroupId(1)));
        assert!(types.type_by_name("Old").is_none());
        assert_eq!(types.len(), 1);
    }
}
