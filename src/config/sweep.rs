use super::traits::ConfigSection;
use crate::error::SimcalibError;
use serde::{Deserialize, Serialize};

/// Settings for the random parameter-sweep baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub population_size: usize,
    /// How many draws to attempt per slot before giving up on finding a
    /// chromosome whose signature has not been seen yet.
    pub max_attempts: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            population_size: 64,
            max_attempts: 100,
        }
    }
}

impl ConfigSection for SweepConfig {
    fn section_name() -> &'static str {
        "sweep"
    }

    fn validate(&self) -> Result<(), SimcalibError> {
        if self.population_size == 0 {
            return Err(SimcalibError::Configuration(
                "Sweep population size must be at least 1".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(SimcalibError::Configuration(
                "Sweep attempt budget must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
