//! Immutable simulation configuration.

use tempest_calendar::SimulationWindow;
use tempest_params::{Vec2, WeatherState};
use tempest_precip::{DEFAULT_WET_FLOOR, EventEligibility};
use tempest_temperature::{ConsistencyPolicy, DEFAULT_MIN_DIURNAL_RANGE, DEFAULT_SIGMA_CLIP};

use crate::error::EngineError;

/// How the first day's weather state and spell counter are chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialCondition {
    /// Start wet with probability `wet_probability`, then draw the spell.
    Random {
        /// Probability that the run starts in a wet spell.
        wet_probability: f64,
    },
    /// Start in a given state with a given number of spell days remaining.
    Fixed {
        /// Initial state.
        state: WeatherState,
        /// Days left in the initial spell, including the first day.
        remaining: u32,
    },
}

impl Default for InitialCondition {
    fn default() -> Self {
        Self::Random {
            wet_probability: 0.5,
        }
    }
}

/// Configuration for one simulation run or ensemble.
///
/// # Example
///
/// ```
/// use tempest_calendar::SimulationWindow;
/// use tempest_engine::SimulationConfig;
///
/// let window = SimulationWindow::parse("2024-01-01", "2024-12-31").unwrap();
/// let config = SimulationConfig::new(window).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    window: SimulationWindow,
    initial: InitialCondition,
    initial_residual: Vec2,
    eligibility: EventEligibility,
    wet_floor: f64,
    sigma_clip: Option<f64>,
    min_diurnal_range: f64,
    consistency: ConsistencyPolicy,
    seed: Option<u64>,
}

impl SimulationConfig {
    /// Creates a configuration with defaults for the given window.
    ///
    /// Defaults: random initial state with wet probability 0.5, zero initial
    /// residual, no events on the first day of a wet spell, wet floor
    /// 0.255 mm, sigma clip 4.0, minimum diurnal range 4.0 °C, warn on
    /// matrix inconsistency, and no fixed seed.
    pub fn new(window: SimulationWindow) -> Self {
        Self {
            window,
            initial: InitialCondition::default(),
            initial_residual: Vec2::zeros(),
            eligibility: EventEligibility::default(),
            wet_floor: DEFAULT_WET_FLOOR,
            sigma_clip: Some(DEFAULT_SIGMA_CLIP),
            min_diurnal_range: DEFAULT_MIN_DIURNAL_RANGE,
            consistency: ConsistencyPolicy::default(),
            seed: None,
        }
    }

    /// Sets the initial condition.
    pub fn with_initial(mut self, initial: InitialCondition) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the residual of the day before the window.
    pub fn with_initial_residual(mut self, residual: Vec2) -> Self {
        self.initial_residual = residual;
        self
    }

    /// Sets the extreme-event eligibility policy.
    pub fn with_eligibility(mut self, eligibility: EventEligibility) -> Self {
        self.eligibility = eligibility;
        self
    }

    /// Sets the lower bound on ordinary wet-day depth.
    pub fn with_wet_floor(mut self, floor: f64) -> Self {
        self.wet_floor = floor;
        self
    }

    /// Sets the residual clip (`None` disables clipping).
    pub fn with_sigma_clip(mut self, clip: Option<f64>) -> Self {
        self.sigma_clip = clip;
        self
    }

    /// Sets the minimum diurnal temperature range.
    pub fn with_min_diurnal_range(mut self, range: f64) -> Self {
        self.min_diurnal_range = range;
        self
    }

    /// Sets the matrix consistency policy.
    pub fn with_consistency(mut self, policy: ConsistencyPolicy) -> Self {
        self.consistency = policy;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // --- Accessors ---

    /// Returns the simulation window.
    pub fn window(&self) -> SimulationWindow {
        self.window
    }

    /// Returns the initial condition.
    pub fn initial(&self) -> InitialCondition {
        self.initial
    }

    /// Returns the initial residual.
    pub fn initial_residual(&self) -> Vec2 {
        self.initial_residual
    }

    /// Returns the extreme-event eligibility policy.
    pub fn eligibility(&self) -> EventEligibility {
        self.eligibility
    }

    /// Returns the wet-day floor.
    pub fn wet_floor(&self) -> f64 {
        self.wet_floor
    }

    /// Returns the residual clip.
    pub fn sigma_clip(&self) -> Option<f64> {
        self.sigma_clip
    }

    /// Returns the minimum diurnal range.
    pub fn min_diurnal_range(&self) -> f64 {
        self.min_diurnal_range
    }

    /// Returns the matrix consistency policy.
    pub fn consistency(&self) -> ConsistencyPolicy {
        self.consistency
    }

    /// Returns the base seed, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates all settings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] describing the first invalid
    /// setting.
    pub fn validate(&self) -> Result<(), EngineError> {
        match self.initial {
            InitialCondition::Random { wet_probability }
                if !(0.0..=1.0).contains(&wet_probability) =>
            {
                return Err(EngineError::configuration(format!(
                    "wet probability must be in [0, 1], got {wet_probability}"
                )));
            }
            InitialCondition::Fixed { remaining: 0, .. } => {
                return Err(EngineError::configuration(
                    "initial spell must have at least one remaining day",
                ));
            }
            _ => {}
        }
        if !self.initial_residual.is_finite() {
            return Err(EngineError::configuration("initial residual must be finite"));
        }
        if !self.wet_floor.is_finite() || self.wet_floor < 0.0 {
            return Err(EngineError::configuration(format!(
                "wet floor must be finite and >= 0, got {}",
                self.wet_floor
            )));
        }
        if let Some(clip) = self.sigma_clip
            && (!clip.is_finite() || clip <= 0.0)
        {
            return Err(EngineError::configuration(format!(
                "sigma clip must be finite and > 0, got {clip}"
            )));
        }
        if !self.min_diurnal_range.is_finite() || self.min_diurnal_range < 0.0 {
            return Err(EngineError::configuration(format!(
                "minimum diurnal range must be finite and >= 0, got {}",
                self.min_diurnal_range
            )));
        }
        self.consistency.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> SimulationWindow {
        SimulationWindow::parse("2024-01-01", "2024-01-31").unwrap()
    }

    #[test]
    fn defaults() {
        let c = SimulationConfig::new(window());
        assert_eq!(
            c.initial(),
            InitialCondition::Random {
                wet_probability: 0.5
            }
        );
        assert_eq!(c.wet_floor(), 0.255);
        assert_eq!(c.sigma_clip(), Some(4.0));
        assert_eq!(c.min_diurnal_range(), 4.0);
        assert_eq!(c.eligibility(), EventEligibility::AfterSpellStart);
        assert_eq!(c.initial_residual(), Vec2::zeros());
        assert!(c.seed().is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let c = SimulationConfig::new(window())
            .with_initial(InitialCondition::Fixed {
                state: WeatherState::Wet,
                remaining: 3,
            })
            .with_eligibility(EventEligibility::OncePerWetSpell)
            .with_wet_floor(0.0)
            .with_sigma_clip(None)
            .with_min_diurnal_range(0.0)
            .with_consistency(ConsistencyPolicy::Skip)
            .with_seed(7);
        assert!(c.validate().is_ok());
        assert_eq!(c.seed(), Some(7));
        assert_eq!(c.sigma_clip(), None);
    }

    #[test]
    fn invalid_settings() {
        let base = SimulationConfig::new(window());
        let bad = [
            base.clone().with_initial(InitialCondition::Random {
                wet_probability: 1.5,
            }),
            base.clone().with_initial(InitialCondition::Fixed {
                state: WeatherState::Dry,
                remaining: 0,
            }),
            base.clone().with_wet_floor(-0.1),
            base.clone().with_sigma_clip(Some(0.0)),
            base.clone().with_min_diurnal_range(f64::NAN),
            base.clone().with_consistency(ConsistencyPolicy::Enforce(-1.0)),
            base.clone().with_initial_residual(Vec2::new(f64::NAN, 0.0)),
        ];
        for c in bad {
            assert!(
                matches!(c.validate(), Err(EngineError::Configuration { .. })),
                "{c:?}"
            );
        }
    }
}
