use std::fmt;

macro_rules! static_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

static_id!(
    /// Static type identifier (a hull, a module, a skill, ...).
    TypeId,
    "type:"
);

static_id!(
    /// Group a type belongs to.
    GroupId,
    "group:"
);

static_id!(
    /// Category a group belongs to.
    CategoryId,
    "category:"
);

static_id!(
    /// Attribute identifier shared by every item that defines the attribute.
    AttributeId,
    "attr:"
);

static_id!(
    /// Effect identifier resolved through the effect registry.
    EffectId,
    "effect:"
);
