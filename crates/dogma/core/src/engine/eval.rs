//! Lazy, memoized attribute evaluation.
//!
//! Evaluation starts at the attribute a caller reads and recurses into every
//! attribute its modifiers read. Each read records a dependency edge in the
//! store.
//!
//! # Cycles
//!
//! Reading a node that is already on the evaluation stack yields that node's
//! base value and records a [`CycleReport`]. Every frame from the re-entered
//! node up to the top of the stack computed its value from that placeholder,
//! so none of them is memoized: the cycle is re-resolved from whichever node a
//! caller reads, and the value of a node never depends on what was read before
//! it. The stack index of the re-entered node is carried back down as the
//! "taint" of the evaluation.

use tracing::{trace, warn};

use crate::config::DogmaConfig;
use crate::env::DogmaEnv;
use crate::fit::Fit;
use crate::modifier::{AttributeRules, Combined, Contribution, Operand, PenaltyCurve, applier};

use super::diagnostics::{CycleReport, Diagnostics, DivisionByZero};
use super::index::ModifierIndex;
use super::store::{AttrKey, AttributeStore, NodeKey, NodeState};

/// Lowest stack index whose value was computed from a cycle placeholder.
pub(crate) type Taint = Option<usize>;

fn merge(taint: &mut Taint, other: Taint) {
    *taint = match (*taint, other) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
}

/// Everything that went into one attribute value.
pub(crate) struct Computation<'e> {
    pub base: f64,
    pub combined: Combined,
    pub contributions: Vec<Contribution<'e>>,
}

/// Borrowed view of the engine used for one read.
pub(crate) struct Evaluator<'e, 'a> {
    pub env: DogmaEnv<'a>,
    pub config: &'e DogmaConfig,
    pub curve: &'e PenaltyCurve,
    pub fit: &'e Fit,
    pub modifiers: &'e ModifierIndex,
    pub store: &'e mut AttributeStore,
    pub diagnostics: &'e mut Diagnostics,
    pub stack: Vec<AttrKey>,
}

impl<'e, 'a> Evaluator<'e, 'a> {
    pub fn get(&mut self, key: AttrKey) -> f64 {
        self.evaluate(key).0
    }

    /// Unmodified value: type data, then attribute default, then the
    /// configured fallback.
    pub fn base(&self, key: AttrKey) -> f64 {
        let fallback = self.config.default_attribute_value;
        self.fit.item(key.item).map_or(fallback, |item| {
            self.env.base_value(item.type_id, key.attribute, fallback)
        })
    }

    fn evaluate(&mut self, key: AttrKey) -> (f64, Taint) {
        match self.store.state(key) {
            NodeState::Clean(value) => return (value, None),
            NodeState::Evaluating => return self.break_cycle(key),
            NodeState::Dirty => {}
        }

        let depth = self.stack.len();
        if depth >= self.config.max_eval_depth {
            if self.diagnostics.record_depth_exceeded(key) {
                warn!(
                    target: "dogma::eval",
                    key = %key,
                    max_depth = self.config.max_eval_depth,
                    "evaluation depth exceeded, using base value"
                );
            }
            return (self.base(key), Some(0));
        }

        let (computation, taint) = self.run(key);
        (computation.combined.value, taint)
    }

    /// Evaluates `key` as a top-level read and returns the computation its
    /// value came from, cached or not.
    pub fn explain(&mut self, key: AttrKey) -> Computation<'e> {
        self.run(key).0
    }

    fn run(&mut self, key: AttrKey) -> (Computation<'e>, Taint) {
        let depth = self.stack.len();
        self.store.begin(key);
        self.stack.push(key);
        let mut taint = None;
        let computation = self.compute(key, &mut taint);
        self.stack.pop();

        let value = computation.combined.value;
        let memoize = !taint.is_some_and(|index| index <= depth);
        self.store.finish(key, value, memoize);
        trace!(target: "dogma::eval", key = %key, value, memoize, "evaluated attribute");

        (computation, taint.filter(|index| *index < depth))
    }

    fn break_cycle(&mut self, key: AttrKey) -> (f64, Taint) {
        let base = self.base(key);
        let Some(position) = self.stack.iter().position(|entry| *entry == key) else {
            return (base, None);
        };

        if self
            .diagnostics
            .record_cycle(CycleReport::new(&self.stack[position..]))
        {
            warn!(
                target: "dogma::eval",
                key = %key,
                length = self.stack.len() - position,
                "circular attribute dependency, using base value"
            );
        }
        (base, Some(position))
    }

    /// Evaluates the modifiers targeting `key` and folds them onto its base.
    fn compute(&mut self, key: AttrKey, taint: &mut Taint) -> Computation<'e> {
        let base = self.base(key);
        let definition = self.env.attributes().attribute(key.attribute);
        let rules = AttributeRules::from_definition(definition);

        let cap = definition
            .and_then(|definition| definition.max_attribute)
            .map(|max_attribute| {
                self.read(key, Operand::Attribute(key.item, max_attribute), taint)
            });

        let index: &'e ModifierIndex = self.modifiers;
        let modifiers = index.targeting(key);
        let mut contributions = Vec::with_capacity(modifiers.len());
        for modifier in modifiers {
            let raw = modifier
                .value
                .evaluate(&mut |operand| self.read(key, operand, taint));
            contributions.push(modifier.contribution(raw));
        }

        let combined = applier::combine(base, &contributions, rules, cap, self.curve);
        for skipped in combined.skipped() {
            let entry = DivisionByZero {
                target: key,
                source: contributions[skipped].source,
                effect: contributions[skipped].effect,
            };
            if self.diagnostics.record_division_by_zero(entry) {
                warn!(
                    target: "dogma::eval",
                    key = %key,
                    source = %entry.source,
                    effect = %entry.effect,
                    "division by zero, modifier skipped"
                );
            }
        }

        Computation {
            base,
            combined,
            contributions,
        }
    }

    fn read(&mut self, dependent: AttrKey, operand: Operand, taint: &mut Taint) -> f64 {
        match operand {
            Operand::Attribute(item, attribute) => {
                let input = AttrKey::new(item, attribute);
                self.store.record_dependency(dependent, NodeKey::Attr(input));
                let (value, input_taint) = self.evaluate(input);
                merge(taint, input_taint);
                value
            }
            Operand::SkillLevel(skill) => {
                self.store.record_dependency(dependent, NodeKey::Skill(skill));
                f64::from(self.fit.skill_level(skill))
            }
        }
    }
}
