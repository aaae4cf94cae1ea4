//! Configuration for running several independent worlds.

use serde::{Deserialize, Serialize};

use super::{ConfigError, WorldConfig};

/// A batch of worlds sharing one parameter set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Parameters shared by every world.
    pub world: WorldConfig,
    /// Number of independent worlds (replicates).
    #[serde(default = "default_worlds")]
    pub worlds: usize,
    /// Master seed; each world draws its own seed from it.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            worlds: default_worlds(),
            random_seed: None,
        }
    }
}

fn default_worlds() -> usize {
    1
}

impl ExperimentConfig {
    /// Validate the batch and its world parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worlds == 0 {
            return Err(ConfigError::NoWorlds);
        }
        self.world.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_experiment_valid() {
        assert!(ExperimentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_worlds_rejected() {
        let config = ExperimentConfig {
            worlds: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoWorlds)));
    }

    #[test]
    fn test_world_errors_propagate() {
        let mut config = ExperimentConfig::default();
        config.world.patches = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoPatches)));
    }
}
