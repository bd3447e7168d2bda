//! Lazily evaluated modifier values.
//!
//! A modifier value is an expression instead of a number so that whatever it
//! reads (another item's modified attribute, a skill level) becomes an edge in
//! the dependency graph when the engine evaluates it.

use std::ops;

use crate::env::{AttributeId, TypeId};
use crate::fit::ItemId;

/// Item reference relative to the item whose effect is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemRef {
    /// The item carrying the effect.
    SelfItem,
    /// The fit's hull.
    Ship,
    /// The charge loaded into the item carrying the effect.
    Charge,
    /// The module the charge carrying the effect is loaded into.
    Container,
}

/// Input an expression reads while being evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Attribute(ItemId, AttributeId),
    SkillLevel(TypeId),
}

/// Value expression over constants, item attributes and skill levels.
///
/// `R` is the item reference type: [`ItemRef`] inside effect templates,
/// [`ItemId`] once bound to a concrete fit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueExpr<R = ItemRef> {
    Const(f64),
    /// Modified value of an attribute.
    Attr { item: R, attribute: AttributeId },
    /// Trained level of a skill (0 when untrained).
    SkillLevel(TypeId),
    Add(Box<ValueExpr<R>>, Box<ValueExpr<R>>),
    Mul(Box<ValueExpr<R>>, Box<ValueExpr<R>>),
    Neg(Box<ValueExpr<R>>),
}

/// Expression bound to items of one fit.
pub type BoundExpr = ValueExpr<ItemId>;

impl ValueExpr<ItemRef> {
    /// Modified value of an attribute on the item running the effect.
    pub fn own_attr(attribute: AttributeId) -> Self {
        ValueExpr::Attr {
            item: ItemRef::SelfItem,
            attribute,
        }
    }
}

impl<R> ValueExpr<R> {
    pub fn constant(value: f64) -> Self {
        ValueExpr::Const(value)
    }

    pub fn attr(item: R, attribute: AttributeId) -> Self {
        ValueExpr::Attr { item, attribute }
    }

    pub fn skill_level(skill: TypeId) -> Self {
        ValueExpr::SkillLevel(skill)
    }

    /// Binds every item reference. Returns `None` when a reference cannot be
    /// resolved, e.g. a charge reference on a module without a charge.
    pub fn bind<T, F>(&self, resolve: &F) -> Option<ValueExpr<T>>
    where
        F: Fn(&R) -> Option<T>,
    {
        Some(match self {
            ValueExpr::Const(value) => ValueExpr::Const(*value),
            ValueExpr::Attr { item, attribute } => ValueExpr::Attr {
                item: resolve(item)?,
                attribute: *attribute,
            },
            ValueExpr::SkillLevel(skill) => ValueExpr::SkillLevel(*skill),
            ValueExpr::Add(lhs, rhs) => {
                ValueExpr::Add(Box::new(lhs.bind(resolve)?), Box::new(rhs.bind(resolve)?))
            }
            ValueExpr::Mul(lhs, rhs) => {
                ValueExpr::Mul(Box::new(lhs.bind(resolve)?), Box::new(rhs.bind(resolve)?))
            }
            ValueExpr::Neg(inner) => ValueExpr::Neg(Box::new(inner.bind(resolve)?)),
        })
    }
}

impl BoundExpr {
    /// Evaluates the expression, asking `read` for every operand.
    pub fn evaluate<F>(&self, read: &mut F) -> f64
    where
        F: FnMut(Operand) -> f64,
    {
        match self {
            ValueExpr::Const(value) => *value,
            ValueExpr::Attr { item, attribute } => read(Operand::Attribute(*item, *attribute)),
            ValueExpr::SkillLevel(skill) => read(Operand::SkillLevel(*skill)),
            ValueExpr::Add(lhs, rhs) => lhs.evaluate(read) + rhs.evaluate(read),
            ValueExpr::Mul(lhs, rhs) => lhs.evaluate(read) * rhs.evaluate(read),
            ValueExpr::Neg(inner) => -inner.evaluate(read),
        }
    }
}

impl<R> From<f64> for ValueExpr<R> {
    fn from(value: f64) -> Self {
        ValueExpr::Const(value)
    }
}

impl<R> ops::Add for ValueExpr<R> {
    type Output = ValueExpr<R>;

    fn add(self, rhs: Self) -> Self::Output {
        ValueExpr::Add(Box::new(self), Box::new(rhs))
    }
}

impl<R> ops::Mul for ValueExpr<R> {
    type Output = ValueExpr<R>;

    fn mul(self, rhs: Self) -> Self::Output {
        ValueExpr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl<R> ops::Mul<f64> for ValueExpr<R> {
    type Output = ValueExpr<R>;

    fn mul(self, rhs: f64) -> Self::Output {
        self * ValueExpr::Const(rhs)
    }
}

impl<R> ops::Neg for ValueExpr<R> {
    type Output = ValueExpr<R>;

    fn neg(self) -> Self::Output {
        ValueExpr::Neg(Box::new(self))
    }
}
