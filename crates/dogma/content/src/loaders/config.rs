//! Engine configuration loader.

use std::path::Path;

use dogma_core::DogmaConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<DogmaConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<DogmaConfig> {
        let config: DogmaConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dogma config TOML: {}", e))?;

        if config.stacking_falloff.is_nan() || config.stacking_falloff <= 0.0 {
            anyhow::bail!(
                "stacking_falloff must be positive, got {}",
                config.stacking_falloff
            );
        }
        if config.stacking_floor.is_nan()
            || config.stacking_floor <= 0.0
            || config.stacking_floor >= 1.0
        {
            anyhow::bail!(
                "stacking_floor must be in (0, 1), got {}",
                config.stacking_floor
            );
        }
        if config.max_eval_depth == 0 {
            anyhow::bail!("max_eval_depth must be at least 1");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("stacking_falloff = 3.0\n").unwrap();
        assert_eq!(config.stacking_falloff, 3.0);
        assert_eq!(config.stacking_floor, DogmaConfig::DEFAULT_STACKING_FLOOR);
        assert_eq!(config.max_eval_depth, DogmaConfig::DEFAULT_MAX_EVAL_DEPTH);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(ConfigLoader::parse("stacking_floor = 1.5\n").is_err());
        assert!(ConfigLoader::parse("stacking_floor = 0.0\n").is_err());
        assert!(ConfigLoader::parse("stacking_floor = -0.1\n").is_err());
        assert!(ConfigLoader::parse("stacking_falloff = 0.0\n").is_err());
        assert!(ConfigLoader::parse("max_eval_depth = 0\n").is_err());
    }
}
