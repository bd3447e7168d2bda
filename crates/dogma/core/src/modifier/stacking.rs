//! Diminishing returns for modifiers sharing a stacking group.
//!
//! The per-rank multiplier follows a gaussian falloff that converges toward a
//! small positive floor:
//!
//! ```text
//! multiplier(rank) = floor + (1 - floor) * exp(-(rank / falloff)^2)
//! ```
//!
//! Rank 0 (the strongest contribution of a group) is always applied at full
//! strength. Once the gaussian term no longer changes the sum in `f64`, each
//! further rank steps one representable value below the previous one, so the
//! sequence stays strictly decreasing and positive.

use crate::config::DogmaConfig;

/// Coefficients of the stacking penalty curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PenaltyCurve {
    falloff: f64,
    floor: f64,
}

impl PenaltyCurve {
    pub fn new(falloff: f64, floor: f64) -> Self {
        Self {
            falloff: if falloff > 0.0 {
                falloff
            } else {
                DogmaConfig::DEFAULT_STACKING_FALLOFF
            },
            floor: DogmaConfig::clamp_floor(floor),
        }
    }

    pub fn from_config(config: &DogmaConfig) -> Self {
        Self::new(config.stacking_falloff, config.stacking_floor)
    }

    pub fn falloff(&self) -> f64 {
        self.falloff
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Multiplier applied to the contribution at `rank` (0-based).
    pub fn multiplier(&self, rank: usize) -> f64 {
        self.multipliers(rank + 1).last().unwrap_or(1.0)
    }

    /// Multipliers for the first `n` ranks.
    pub fn multipliers(&self, n: usize) -> impl Iterator<Item = f64> + '_ {
        (0..n).scan(f64::INFINITY, |previous, rank| {
            let value = self.gaussian(rank).min(next_below(*previous));
            *previous = value;
            Some(value)
        })
    }

    fn gaussian(&self, rank: usize) -> f64 {
        if rank == 0 {
            return 1.0;
        }
        let x = rank as f64 / self.falloff;
        self.floor + (1.0 - self.floor) * (-(x * x)).exp()
    }
}

/// Largest `f64` below a positive finite `value`; infinity maps to itself.
fn next_below(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        f64::from_bits(value.to_bits() - 1)
    } else {
        value
    }
}

impl Default for PenaltyCurve {
    fn default() -> Self {
        Self::from_config(&DogmaConfig::default())
    }
}

/// Sorts the members of one stacking group by descending magnitude of their
/// delta (ties by value) and returns the rank multiplier of each position.
pub fn rank_group<T, F>(curve: &PenaltyCurve, group: &mut [T], delta: F) -> Vec<f64>
where
    F: Fn(&T) -> f64,
{
    group.sort_by(|a, b| {
        let (a, b) = (delta(a), delta(b));
        b.abs().total_cmp(&a.abs()).then(a.total_cmp(&b))
    });
    curve.multipliers(group.len()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strongest_rank_is_unpenalized() {
        let curve = PenaltyCurve::default();
        assert_eq!(curve.multiplier(0), 1.0);
    }

    #[test]
    fn known_multipliers() {
        let curve = PenaltyCurve::default();
        // exp(-(1/2.67)^2) ≈ 0.8691, exp(-(2/2.67)^2) ≈ 0.5706
        assert!((curve.multiplier(1) - 0.8692).abs() < 1e-3);
        assert!((curve.multiplier(2) - 0.5710).abs() < 1e-3);
        assert!((curve.multiplier(3) - 0.2837).abs() < 1e-3);
    }

    #[test]
    fn converges_to_floor() {
        let curve = PenaltyCurve::default();
        let deep = curve.multiplier(64);
        assert!(deep > 0.0);
        assert!((deep - curve.floor()).abs() < 1e-9);
    }

    #[test]
    fn deep_ranks_keep_decreasing() {
        // the gaussian term is lost against the floor from rank 19 on
        let curve = PenaltyCurve::default();
        let values: Vec<f64> = curve.multipliers(25).collect();
        for (rank, pair) in values.windows(2).enumerate() {
            assert!(pair[1] < pair[0], "rank {} not below rank {}", rank + 1, rank);
        }
        assert_eq!(curve.multiplier(24), values[24]);
    }

    #[test]
    fn zero_floor_is_raised_to_minimum() {
        let curve = PenaltyCurve::new(2.67, 0.0);
        assert_eq!(curve.floor(), DogmaConfig::MIN_STACKING_FLOOR);
        assert!(curve.multiplier(80) > 0.0);

        let curve = PenaltyCurve::from_config(&DogmaConfig::default().with_stacking(2.67, 0.0));
        assert!(curve.multiplier(80) > 0.0);
    }

    #[test]
    fn rank_group_orders_by_magnitude() {
        let curve = PenaltyCurve::default();
        let mut deltas = [0.1, -0.3, 0.2, 0.3];
        let multipliers = rank_group(&curve, &mut deltas, |d| *d);
        assert_eq!(deltas, [-0.3, 0.3, 0.2, 0.1]);
        assert_eq!(multipliers.len(), 4);
        assert_eq!(multipliers[0], 1.0);
    }

    proptest! {
        #[test]
        fn multipliers_strictly_decrease(
            falloff in 2.0f64..6.0,
            floor in 0.0f64..0.5,
            n in 2usize..64,
        ) {
            let curve = PenaltyCurve::new(falloff, floor);
            let values: Vec<f64> = curve.multipliers(n).collect();
            for pair in values.windows(2) {
                prop_assert!(pair[1] < pair[0]);
                prop_assert!(pair[1] > 0.0);
            }
        }
    }
}
