//! Combination of modifier contributions into a computed attribute value.
//!
//! This module implements the order-class stack:
//! PreAssign → PreMultiply → Additive → PostMultiply → PostAssign → Cap → Rounding
//!
//! Within a class, contributions are sorted before they are folded so the
//! result is bit-identical whatever order the modifiers were collected in.

use std::collections::BTreeMap;

use crate::env::{AttributeDefinition, EffectId, Rounding};
use crate::fit::ItemId;

use super::operation::{OrderClass, Operation};
use super::stacking::{PenaltyCurve, rank_group};

/// One evaluated modifier acting on the attribute being computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contribution<'a> {
    pub source: ItemId,
    pub effect: EffectId,
    pub operation: Operation,
    /// Evaluated value before normalization.
    pub raw: f64,
    /// Stacking group name, `None` for penalty-immune modifiers.
    pub penalty_group: Option<&'a str>,
}

/// Per-attribute rules taken from the attribute definition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttributeRules {
    pub high_is_good: bool,
    pub stackable: bool,
    pub rounding: Rounding,
}

impl AttributeRules {
    pub fn from_definition(definition: Option<&AttributeDefinition>) -> Self {
        definition.map_or_else(Self::default, |definition| Self {
            high_is_good: definition.high_is_good,
            stackable: definition.stackable,
            rounding: definition.rounding,
        })
    }
}

impl Default for AttributeRules {
    fn default() -> Self {
        Self {
            high_is_good: true,
            stackable: true,
            rounding: Rounding::None,
        }
    }
}

/// How a single contribution ended up being applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppliedTerm {
    /// Index into the contribution slice passed to [`combine`].
    pub index: usize,
    /// Normalized delta, `None` when the contribution was skipped.
    pub delta: Option<f64>,
    /// Stacking multiplier (1.0 when not penalized).
    pub multiplier: f64,
    /// False for skipped contributions and overridden assignments.
    pub applied: bool,
}

/// Result of folding all contributions onto a base value.
#[derive(Clone, Debug, PartialEq)]
pub struct Combined {
    pub value: f64,
    pub terms: Vec<AppliedTerm>,
}

impl Combined {
    /// Contributions skipped because they divide by zero.
    pub fn skipped(&self) -> impl Iterator<Item = usize> + '_ {
        self.terms
            .iter()
            .filter(|term| term.delta.is_none())
            .map(|term| term.index)
    }
}

/// Folds `contributions` onto `base`.
///
/// `cap` is the already computed value of the attribute's `max_attribute`,
/// if it has one.
pub fn combine(
    base: f64,
    contributions: &[Contribution<'_>],
    rules: AttributeRules,
    cap: Option<f64>,
    curve: &PenaltyCurve,
) -> Combined {
    let mut value = base;
    let mut terms = Vec::with_capacity(contributions.len());

    for class in OrderClass::ALL {
        let mut members = Vec::new();
        for (index, contribution) in contributions.iter().enumerate() {
            if contribution.operation.order_class() != class {
                continue;
            }
            match contribution.operation.normalize(contribution.raw) {
                Some(delta) => members.push((index, delta)),
                None => terms.push(AppliedTerm {
                    index,
                    delta: None,
                    multiplier: 1.0,
                    applied: false,
                }),
            }
        }
        if members.is_empty() {
            continue;
        }

        if class.is_assignment() {
            value = assign(&members, rules.high_is_good, &mut terms);
        } else {
            let scaled = scale(&members, contributions, rules.stackable, curve, &mut terms);
            value = fold(value, class, scaled);
        }
    }

    if let Some(cap) = cap {
        value = value.min(cap);
    }
    terms.sort_by_key(|term| term.index);

    Combined {
        value: rules.rounding.apply(value),
        terms,
    }
}

/// Picks the winning assignment: the highest when high values are good,
/// otherwise the lowest.
fn assign(members: &[(usize, f64)], high_is_good: bool, terms: &mut Vec<AppliedTerm>) -> f64 {
    let winner = members
        .iter()
        .copied()
        .reduce(|best, candidate| {
            let better = if high_is_good {
                candidate.1.total_cmp(&best.1).is_gt()
            } else {
                candidate.1.total_cmp(&best.1).is_lt()
            };
            if better { candidate } else { best }
        })
        .unwrap_or(members[0]);

    terms.extend(members.iter().map(|&(index, delta)| AppliedTerm {
        index,
        delta: Some(delta),
        multiplier: 1.0,
        applied: index == winner.0,
    }));
    winner.1
}

/// Applies stacking penalties and returns the effective delta of every member.
fn scale(
    members: &[(usize, f64)],
    contributions: &[Contribution<'_>],
    stackable: bool,
    curve: &PenaltyCurve,
    terms: &mut Vec<AppliedTerm>,
) -> Vec<f64> {
    let mut scaled = Vec::with_capacity(members.len());
    // (group, negative) → members
    let mut groups: BTreeMap<(&str, bool), Vec<(usize, f64)>> = BTreeMap::new();

    for &(index, delta) in members {
        let group = contributions[index]
            .penalty_group
            .filter(|_| stackable && contributions[index].operation.is_penalizable());
        match group {
            Some(group) => groups
                .entry((group, delta < 0.0))
                .or_default()
                .push((index, delta)),
            None => {
                scaled.push(delta);
                terms.push(AppliedTerm {
                    index,
                    delta: Some(delta),
                    multiplier: 1.0,
                    applied: true,
                });
            }
        }
    }

    for mut group in groups.into_values() {
        let multipliers = rank_group(curve, &mut group, |&(_, delta)| delta);
        for (&(index, delta), multiplier) in group.iter().zip(multipliers) {
            scaled.push(delta * multiplier);
            terms.push(AppliedTerm {
                index,
                delta: Some(delta),
                multiplier,
                applied: true,
            });
        }
    }

    scaled
}

fn fold(value: f64, class: OrderClass, mut scaled: Vec<f64>) -> f64 {
    scaled.sort_by(f64::total_cmp);
    if class.is_multiplicative() {
        value * scaled.iter().map(|delta| 1.0 + delta).product::<f64>()
    } else {
        value + scaled.iter().sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn contribution(operation: Operation, raw: f64) -> Contribution<'static> {
        Contribution {
            source: ItemId(1),
            effect: EffectId(1),
            operation,
            raw,
            penalty_group: None,
        }
    }

    fn penalized(operation: Operation, raw: f64) -> Contribution<'static> {
        Contribution {
            penalty_group: Some("default"),
            ..contribution(operation, raw)
        }
    }

    fn combine_default(base: f64, contributions: &[Contribution<'_>]) -> f64 {
        combine(
            base,
            contributions,
            AttributeRules::default(),
            None,
            &PenaltyCurve::default(),
        )
        .value
    }

    #[test]
    fn no_contributions_keep_base() {
        assert_eq!(combine_default(42.0, &[]), 42.0);
    }

    #[test]
    fn order_classes_apply_in_sequence() {
        let contributions = [
            contribution(Operation::PostPercent, 50.0),
            contribution(Operation::ModAdd, 10.0),
            contribution(Operation::PreMul, 2.0),
        ];
        // (10 * 2 + 10) * 1.5
        assert_eq!(combine_default(10.0, &contributions), 45.0);
    }

    #[test]
    fn post_assignment_overrides_everything() {
        let contributions = [
            contribution(Operation::PostAssign, 7.0),
            contribution(Operation::ModAdd, 100.0),
            contribution(Operation::PreAssign, 1.0),
        ];
        assert_eq!(combine_default(10.0, &contributions), 7.0);
    }

    #[test]
    fn competing_assignments_follow_high_is_good() {
        let contributions = [
            contribution(Operation::PostAssign, 3.0),
            contribution(Operation::PostAssign, 5.0),
        ];
        let curve = PenaltyCurve::default();
        let high = combine(0.0, &contributions, AttributeRules::default(), None, &curve);
        assert_eq!(high.value, 5.0);
        assert!(high.terms[1].applied && !high.terms[0].applied);

        let low_rules = AttributeRules {
            high_is_good: false,
            ..AttributeRules::default()
        };
        let low = combine(0.0, &contributions, low_rules, None, &curve);
        assert_eq!(low.value, 3.0);
    }

    #[test]
    fn division_by_zero_is_skipped() {
        let contributions = [
            contribution(Operation::PostDiv, 0.0),
            contribution(Operation::PostDiv, 2.0),
        ];
        let combined = combine(
            10.0,
            &contributions,
            AttributeRules::default(),
            None,
            &PenaltyCurve::default(),
        );
        assert_eq!(combined.value, 5.0);
        assert_eq!(combined.skipped().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn penalized_percentages_are_attenuated() {
        let curve = PenaltyCurve::default();
        let contributions = [
            penalized(Operation::PostPercent, 10.0),
            penalized(Operation::PostPercent, 10.0),
        ];
        let expected = 100.0 * 1.1 * (1.0 + 0.1 * curve.multiplier(1));
        let value = combine_default(100.0, &contributions);
        assert!((value - expected).abs() < 1e-9);
        assert!(value < 121.0);
    }

    #[test]
    fn signs_are_penalized_separately() {
        let contributions = [
            penalized(Operation::PostPercent, 10.0),
            penalized(Operation::PostPercent, -10.0),
        ];
        // each sign group has a single member at rank 0
        let expected = 100.0 * 1.1 * 0.9;
        assert!((combine_default(100.0, &contributions) - expected).abs() < 1e-9);
    }

    #[test]
    fn non_stackable_attribute_ignores_penalty() {
        let rules = AttributeRules {
            stackable: false,
            ..AttributeRules::default()
        };
        let contributions = [
            penalized(Operation::PostPercent, 10.0),
            penalized(Operation::PostPercent, 10.0),
        ];
        let combined = combine(100.0, &contributions, rules, None, &PenaltyCurve::default());
        assert!((combined.value - 121.0).abs() < 1e-9);
    }

    #[test]
    fn cap_then_rounding() {
        let rules = AttributeRules {
            rounding: Rounding::Integer,
            ..AttributeRules::default()
        };
        let contributions = [contribution(Operation::ModAdd, 0.6)];
        let curve = PenaltyCurve::default();
        assert_eq!(combine(10.0, &contributions, rules, None, &curve).value, 11.0);
        assert_eq!(combine(10.0, &contributions, rules, Some(10.2), &curve).value, 10.0);
    }

    proptest! {
        #[test]
        fn insertion_order_is_irrelevant(
            raws in prop::collection::vec((0usize..10, -50.0f64..50.0, any::<bool>()), 0..12),
            base in -1000.0f64..1000.0,
        ) {
            let ops = [
                Operation::PreAssign, Operation::PreMul, Operation::PreDiv,
                Operation::PrePercent, Operation::ModAdd, Operation::ModSub,
                Operation::PostMul, Operation::PostDiv, Operation::PostPercent,
                Operation::PostAssign,
            ];
            let forward: Vec<Contribution<'_>> = raws
                .iter()
                .map(|&(op, raw, stacked)| {
                    let c = contribution(ops[op], raw);
                    if stacked { Contribution { penalty_group: Some("g"), ..c } } else { c }
                })
                .collect();
            let mut backward = forward.clone();
            backward.reverse();

            let a = combine_default(base, &forward);
            let b = combine_default(base, &backward);
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }

        #[test]
        fn stacked_total_between_strongest_and_sum(
            mut deltas in prop::collection::vec(0.01f64..100.0, 2..10),
        ) {
            let contributions: Vec<Contribution<'_>> = deltas
                .iter()
                .map(|&raw| penalized(Operation::ModAdd, raw))
                .collect();
            let total = combine_default(0.0, &contributions);

            deltas.sort_by(|a, b| b.total_cmp(a));
            let strongest = deltas[0];
            prop_assert!(total > strongest);
            prop_assert!(total < deltas.len() as f64 * strongest);
        }
    }
}
