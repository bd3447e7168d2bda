//! Content loaders for reading dogma data from files.
//!
//! Each loader converts one RON/TOML file into the in-memory types of
//! `dogma-core`. [`ContentFactory`] ties them to a data directory.

pub mod attributes;
pub mod config;
pub mod effects;
pub mod factory;
pub mod fit;
pub mod types;

pub use attributes::AttributeLoader;
pub use config::ConfigLoader;
pub use effects::{EffectLoader, EffectRecord};
pub use factory::ContentFactory;
pub use fit::{FitDescription, FitItem, FitLoader};
pub use types::TypeLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
