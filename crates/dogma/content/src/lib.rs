//! Static data and effect catalogs for the dogma engine.
//!
//! This crate turns data files into the read-only inputs of `dogma-core`:
//! - Type hierarchy and base attribute values (RON)
//! - Attribute definitions (RON)
//! - Declarative effect catalogs (RON)
//! - Engine configuration (TOML)
//! - Fit descriptions (RON)
//!
//! Effects that cannot be expressed as modifier templates are written in code
//! in [`builtin`] and registered next to the loaded catalog.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::{builtin_effects, register_builtins};

#[cfg(feature = "loaders")]
pub use loaders::{
    AttributeLoader, ConfigLoader, ContentFactory, EffectLoader, EffectRecord, FitDescription,
    FitItem, FitLoader, TypeLoader,
};
