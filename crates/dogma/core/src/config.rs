use crate::env::CategoryId;

/// Engine configuration constants and tunable parameters.
///
/// Stacking coefficients are game-data constants rather than engine logic, so
/// they are carried here and can be overridden from a TOML file by the content
/// loader.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DogmaConfig {
    /// Falloff of the stacking penalty curve `exp(-(rank / falloff)^2)`.
    pub stacking_falloff: f64,

    /// Lower limit the stacking multiplier converges toward. Must be in `(0, 1)`.
    pub stacking_floor: f64,

    /// Maximum nesting of attribute evaluations before the engine breaks the
    /// chain the same way it breaks a cycle.
    pub max_eval_depth: usize,

    /// Value of an attribute that neither the type nor the attribute
    /// definition provides.
    pub default_attribute_value: f64,

    /// Category whose types can be trained with `SetSkillLevel`.
    pub skill_category: CategoryId,
}

impl DogmaConfig {
    // ===== compile-time limits =====
    /// Maximum trained level of a skill.
    pub const MAX_SKILL_LEVEL: u8 = 5;
    /// Maximum number of skill requirements a type can declare.
    pub const MAX_REQUIRED_SKILLS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STACKING_FALLOFF: f64 = 2.67;
    pub const DEFAULT_STACKING_FLOOR: f64 = 0.001;
    /// Smallest floor accepted; a zero floor would let deep ranks vanish.
    pub const MIN_STACKING_FLOOR: f64 = 1e-6;
    pub const MAX_STACKING_FLOOR: f64 = 0.999;
    pub const DEFAULT_MAX_EVAL_DEPTH: usize = 256;
    pub const DEFAULT_ATTRIBUTE_VALUE: f64 = 0.0;
    pub const DEFAULT_SKILL_CATEGORY: CategoryId = CategoryId(16);

    pub fn new() -> Self {
        Self {
            stacking_falloff: Self::DEFAULT_STACKING_FALLOFF,
            stacking_floor: Self::DEFAULT_STACKING_FLOOR,
            max_eval_depth: Self::DEFAULT_MAX_EVAL_DEPTH,
            default_attribute_value: Self::DEFAULT_ATTRIBUTE_VALUE,
            skill_category: Self::DEFAULT_SKILL_CATEGORY,
        }
    }

    pub fn with_stacking(mut self, falloff: f64, floor: f64) -> Self {
        self.stacking_falloff = falloff;
        self.stacking_floor = Self::clamp_floor(floor);
        self
    }

    /// Clamps a stacking floor into `[MIN_STACKING_FLOOR, MAX_STACKING_FLOOR]`.
    pub fn clamp_floor(floor: f64) -> f64 {
        if floor.is_nan() {
            Self::DEFAULT_STACKING_FLOOR
        } else {
            floor.clamp(Self::MIN_STACKING_FLOOR, Self::MAX_STACKING_FLOOR)
        }
    }

    pub fn with_max_eval_depth(mut self, max_eval_depth: usize) -> Self {
        self.max_eval_depth = max_eval_depth.max(1);
        self
    }

    pub fn with_default_attribute_value(mut self, value: f64) -> Self {
        self.default_attribute_value = value;
        self
    }

    pub fn with_skill_category(mut self, category: CategoryId) -> Self {
        self.skill_category = category;
        self
    }
}

impl Default for DogmaConfig {
    fn default() -> Self {
        Self::new()
    }
}
