//! Hybrid search configuration.

use serde::{Deserialize, Serialize};

use crate::error::{TspError, TspResult};

/// Configuration for [`hybrid`](super::hybrid).
///
/// The boost formula `max(base, peak × stagnation / max_stagnant_sweeps)` is
/// a tuning choice; only its shape (more heat as termination nears) matters.
///
/// # Examples
///
/// ```
/// use u_tsp::hybrid::HybridConfig;
///
/// let config = HybridConfig::default()
///     .with_peak_temperature(25.0)
///     .with_max_stagnant_sweeps(200)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridConfig {
    /// Starting temperature, and the value restored after an improving sweep.
    pub base_temperature: f64,

    /// Temperature reached by a boost right before termination.
    pub peak_temperature: f64,

    /// The run ends after this many consecutive sweeps without improving the
    /// tracked best.
    pub max_stagnant_sweeps: usize,

    /// Hard sweep budget. 0 = no limit.
    pub max_sweeps: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            base_temperature: 0.01,
            peak_temperature: 10.0,
            max_stagnant_sweeps: 10_000,
            max_sweeps: 0,
            seed: None,
        }
    }
}

impl HybridConfig {
    pub fn with_base_temperature(mut self, t: f64) -> Self {
        self.base_temperature = t;
        self
    }

    pub fn with_peak_temperature(mut self, t: f64) -> Self {
        self.peak_temperature = t;
        self
    }

    pub fn with_max_stagnant_sweeps(mut self, n: usize) -> Self {
        self.max_stagnant_sweeps = n;
        self
    }

    pub fn with_max_sweeps(mut self, n: usize) -> Self {
        self.max_sweeps = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`TspError::Config`] naming the offending parameter.
    pub fn validate(&self) -> TspResult<()> {
        if self.base_temperature.is_nan() || self.base_temperature <= 0.0 {
            return Err(TspError::config("base_temperature must be positive"));
        }
        if self.peak_temperature.is_nan() || self.peak_temperature < self.base_temperature {
            return Err(TspError::config(
                "peak_temperature must be at least base_temperature",
            ));
        }
        if self.max_stagnant_sweeps == 0 {
            return Err(TspError::config("max_stagnant_sweeps must be at least 1"));
        }
        Ok(())
    }

    /// Temperature after a sweep that accepted no move, given the current
    /// stagnation count.
    pub fn boost(&self, stagnation: usize) -> f64 {
        let heat = self.peak_temperature * stagnation as f64 / self.max_stagnant_sweeps as f64;
        heat.max(self.base_temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HybridConfig::default();
        assert!((config.base_temperature - 0.01).abs() < 1e-12);
        assert_eq!(config.max_stagnant_sweeps, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_base() {
        assert!(HybridConfig::default().with_base_temperature(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_peak_below_base() {
        let config = HybridConfig::default()
            .with_base_temperature(1.0)
            .with_peak_temperature(0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_sweeps() {
        assert!(HybridConfig::default().with_max_stagnant_sweeps(0).validate().is_err());
    }

    #[test]
    fn test_boost_grows_with_stagnation() {
        let config = HybridConfig::default()
            .with_peak_temperature(10.0)
            .with_max_stagnant_sweeps(100);
        // Early stagnation stays at the base
        assert!((config.boost(0) - 0.01).abs() < 1e-12);
        assert!((config.boost(50) - 5.0).abs() < 1e-12);
        assert!((config.boost(99) - 9.9).abs() < 1e-12);
        assert!(config.boost(80) > config.boost(20));
    }
}
