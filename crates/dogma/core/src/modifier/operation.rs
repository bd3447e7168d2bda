//! Modifier operations and the order classes they are applied in.

/// Ordered buckets a modifier falls into. Buckets are applied in declaration
/// order; assignments override, the other buckets combine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum OrderClass {
    PreAssign = 0,
    PreMultiply = 1,
    Additive = 2,
    PostMultiply = 3,
    PostAssign = 4,
}

impl OrderClass {
    pub const ALL: [OrderClass; 5] = [
        OrderClass::PreAssign,
        OrderClass::PreMultiply,
        OrderClass::Additive,
        OrderClass::PostMultiply,
        OrderClass::PostAssign,
    ];

    pub const fn is_assignment(self) -> bool {
        matches!(self, OrderClass::PreAssign | OrderClass::PostAssign)
    }

    pub const fn is_multiplicative(self) -> bool {
        matches!(self, OrderClass::PreMultiply | OrderClass::PostMultiply)
    }
}

/// Operation a modifier performs on its target attribute.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Operation {
    PreAssign,
    PreMul,
    PreDiv,
    PrePercent,
    ModAdd,
    ModSub,
    PostMul,
    PostDiv,
    PostPercent,
    PostAssign,
}

impl Operation {
    pub const fn order_class(self) -> OrderClass {
        match self {
            Operation::PreAssign => OrderClass::PreAssign,
            Operation::PreMul | Operation::PreDiv | Operation::PrePercent => {
                OrderClass::PreMultiply
            }
            Operation::ModAdd | Operation::ModSub => OrderClass::Additive,
            Operation::PostMul | Operation::PostDiv | Operation::PostPercent => {
                OrderClass::PostMultiply
            }
            Operation::PostAssign => OrderClass::PostAssign,
        }
    }

    /// Assignments override and therefore never take a stacking penalty.
    pub const fn is_penalizable(self) -> bool {
        !self.order_class().is_assignment()
    }

    /// Converts a raw modifier value into the delta its order class combines.
    ///
    /// - multiplicative classes: `factor = 1 + delta`
    /// - additive class: the signed amount
    /// - assignments: the assigned value
    ///
    /// Returns `None` for a division by zero.
    pub fn normalize(self, raw: f64) -> Option<f64> {
        match self {
            Operation::PreAssign | Operation::PostAssign | Operation::ModAdd => Some(raw),
            Operation::ModSub => Some(-raw),
            Operation::PreMul | Operation::PostMul => Some(raw - 1.0),
            Operation::PreDiv | Operation::PostDiv => {
                if raw == 0.0 {
                    None
                } else {
                    Some(1.0 / raw - 1.0)
                }
            }
            Operation::PrePercent | Operation::PostPercent => Some(raw / 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_follow_application_order() {
        assert!(Operation::PreAssign.order_class() < Operation::PreMul.order_class());
        assert!(Operation::PrePercent.order_class() < Operation::ModAdd.order_class());
        assert!(Operation::ModSub.order_class() < Operation::PostPercent.order_class());
        assert!(Operation::PostDiv.order_class() < Operation::PostAssign.order_class());
    }

    #[test]
    fn normalize_to_deltas() {
        assert_eq!(Operation::PostPercent.normalize(20.0), Some(0.2));
        assert_eq!(Operation::PreMul.normalize(1.5), Some(0.5));
        assert_eq!(Operation::PostDiv.normalize(2.0), Some(-0.5));
        assert_eq!(Operation::ModSub.normalize(3.0), Some(-3.0));
        assert_eq!(Operation::PreDiv.normalize(0.0), None);
    }

    #[test]
    fn assignments_are_not_penalizable() {
        assert!(!Operation::PreAssign.is_penalizable());
        assert!(!Operation::PostAssign.is_penalizable());
        assert!(Operation::PostPercent.is_penalizable());
    }
}
