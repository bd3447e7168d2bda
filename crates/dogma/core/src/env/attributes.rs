use super::ids::AttributeId;

/// Read access to attribute definitions.
pub trait AttributeOracle: Send + Sync {
    fn attribute(&self, id: AttributeId) -> Option<&AttributeDefinition>;

    fn attribute_by_name(&self, name: &str) -> Option<&AttributeDefinition>;
}

/// Display unit of an attribute.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Unit {
    #[default]
    Unitless,
    Multiplier,
    Percent,
    Milliseconds,
    Meters,
    Count,
}

impl Unit {
    pub const fn suffix(&self) -> &'static str {
        match self {
            Unit::Unitless | Unit::Count => "",
            Unit::Multiplier => "x",
            Unit::Percent => "%",
            Unit::Milliseconds => " ms",
            Unit::Meters => " m",
        }
    }
}

/// Rounding applied to the final computed value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    #[default]
    None,
    Integer,
    Decimals(u8),
}

impl Rounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::None => value,
            Rounding::Integer => value.round(),
            Rounding::Decimals(places) => {
                let scale = 10f64.powi(i32::from(places));
                (value * scale).round() / scale
            }
        }
    }
}

/// Static definition of an attribute.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeDefinition {
    pub id: AttributeId,
    pub name: String,

    /// Value used when an item's type does not list the attribute.
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_value: f64,

    /// Whether larger values are better. Decides which assignment wins when
    /// several force the attribute at once.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub high_is_good: bool,

    /// Non-stackable attributes take penalized modifiers at full strength.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub stackable: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: Unit,

    #[cfg_attr(feature = "serde", serde(default))]
    pub rounding: Rounding,

    /// Attribute of the same item that caps the computed value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_attribute: Option<AttributeId>,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl AttributeDefinition {
    pub fn new(id: AttributeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            default_value: 0.0,
            high_is_good: true,
            stackable: true,
            unit: Unit::Unitless,
            rounding: Rounding::None,
            max_attribute: None,
        }
    }

    pub fn with_default(mut self, value: f64) -> Self {
        self.default_value = value;
        self
    }

    pub fn low_is_good(mut self) -> Self {
        self.high_is_good = false;
        self
    }

    pub fn non_stackable(mut self) -> Self {
        self.stackable = false;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn capped_by(mut self, max_attribute: AttributeId) -> Self {
        self.max_attribute = Some(max_attribute);
        self
    }
}
