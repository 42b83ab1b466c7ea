//! Annealing configuration.

use serde::{Deserialize, Serialize};
use u_metaheur::sa::CoolingSchedule;

use crate::error::{TspError, TspResult};

/// Fraction of the initial temperature removed per step by
/// [`CoolingSchedule::Linear`].
pub const LINEAR_STEP_FRACTION: f64 = 8e-6;

/// Serde mirror of [`CoolingSchedule`], which carries no derives of its own.
#[derive(Serialize, Deserialize)]
#[serde(remote = "CoolingSchedule")]
enum CoolingScheduleDef {
    Geometric { alpha: f64 },
    Linear,
    LundyMees { beta: f64 },
}

/// Configuration for [`anneal`](super::anneal).
///
/// # Examples
///
/// ```
/// use u_metaheur::sa::CoolingSchedule;
/// use u_tsp::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature_scale(0.25)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.999 })
///     .with_max_consecutive_rejections(2_000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnealConfig {
    /// Initial temperature as a multiple of the matrix's average distance.
    pub initial_temperature_scale: f64,

    /// Temperature floor. Cooling stops once it is reached.
    pub min_temperature: f64,

    /// Cooling schedule, applied after every iteration.
    ///
    /// `Linear` removes `initial × LINEAR_STEP_FRACTION` per step.
    #[serde(with = "CoolingScheduleDef")]
    pub cooling: CoolingSchedule,

    /// The run ends after this many consecutive rejected moves.
    pub max_consecutive_rejections: usize,

    /// Hard iteration budget. 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature_scale: 0.125,
            min_temperature: 1e-3,
            cooling: CoolingSchedule::Geometric { alpha: 0.9999 },
            max_consecutive_rejections: 10_000,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature_scale(mut self, scale: f64) -> Self {
        self.initial_temperature_scale = scale;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_max_consecutive_rejections(mut self, n: usize) -> Self {
        self.max_consecutive_rejections = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
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
        if self.initial_temperature_scale.is_nan() || self.initial_temperature_scale <= 0.0 {
            return Err(TspError::config("initial_temperature_scale must be positive"));
        }
        if self.min_temperature.is_nan() || self.min_temperature <= 0.0 {
            return Err(TspError::config("min_temperature must be positive"));
        }
        if self.max_consecutive_rejections == 0 {
            return Err(TspError::config("max_consecutive_rejections must be at least 1"));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
                    return Err(TspError::config(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta.is_nan() || beta <= 0.0 {
                    return Err(TspError::config(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
            CoolingSchedule::Linear => {}
        }
        Ok(())
    }

    /// Starting temperature for a matrix with the given average distance,
    /// never below the floor.
    pub fn initial_temperature(&self, average_distance: f64) -> f64 {
        (average_distance * self.initial_temperature_scale).max(self.min_temperature)
    }

    /// Applies one cooling step. At or below the floor the temperature is
    /// returned unchanged.
    pub fn cool(&self, temperature: f64, initial: f64) -> f64 {
        if temperature <= self.min_temperature {
            return temperature;
        }
        let next = match self.cooling {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::Linear => temperature - initial * LINEAR_STEP_FRACTION,
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        };
        next.max(self.min_temperature)
    }
}
