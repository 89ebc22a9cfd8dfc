//! The daily wet/dry state machine.
//!
//! Each day: start a new spell of the opposite state if the current one is
//! exhausted, draw the day's depth (extreme event or ordinary draw on wet
//! days, zero on dry days), advance the temperature residual, validate the
//! record, then count the day off the spell. Under the default
//! [`EventEligibility`](crate::EventEligibility) the first day of a wet
//! spell always takes an ordinary depth.

use chrono::Datelike;
use rand::Rng;
use rand::rngs::StdRng;
use tempest_calendar::Doy;
use tempest_params::{ParameterSet, WeatherState};
use tempest_precip::{DepthSampler, ExtremeEventInjector};
use tempest_spell::SpellSampler;
use tempest_temperature::TemperatureModel;
use tracing::{debug, info};

use crate::config::{InitialCondition, SimulationConfig};
use crate::error::EngineError;
use crate::state::{DailyRecord, DailyState, EventLabel, Realisation};
use crate::streams::Streams;

/// Slack allowed when re-checking the diurnal range of a finished record.
const RANGE_TOLERANCE: f64 = 1e-9;

/// Runs the state machine over a validated parameter set.
///
/// Holds only shared references, so one simulator serves every ensemble
/// member.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    params: &'a ParameterSet,
    config: SimulationConfig,
    seed: u64,
    spells: SpellSampler<'a>,
    depths: DepthSampler<'a>,
    injector: ExtremeEventInjector<'a>,
    temperature: TemperatureModel<'a>,
}

impl<'a> Simulator<'a> {
    /// Validates `config` against `params` and prepares the samplers.
    ///
    /// Applies the configured consistency policy to the residual matrices.
    /// When the configuration has no fixed seed, a random base seed is drawn
    /// once and logged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for an invalid setting, a wet
    /// floor above a monthly cap, or inconsistent matrices under
    /// [`ConsistencyPolicy::Enforce`](tempest_temperature::ConsistencyPolicy::Enforce).
    pub fn new(params: &'a ParameterSet, config: &SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        config.consistency().apply(params.correlation())?;

        let spells = SpellSampler::from_parameters(params);
        let depths = DepthSampler::from_parameters(params, config.wet_floor())?;
        let injector = ExtremeEventInjector::new(params.events(), config.eligibility());
        let temperature =
            TemperatureModel::from_parameters(params, config.sigma_clip(), config.min_diurnal_range())?;

        let seed = match config.seed() {
            Some(s) => s,
            None => {
                let s = rand::random::<u64>();
                info!(seed = s, "no seed configured; drew a random base seed");
                s
            }
        };

        debug!(
            basin = params.basin(),
            start = %config.window().start(),
            end = %config.window().end(),
            n_days = config.window().n_days(),
            n_events = params.events().len(),
            "simulator ready"
        );

        Ok(Self {
            params,
            config: config.clone(),
            seed,
            spells,
            depths,
            injector,
            temperature,
        })
    }

    /// The parameter set in use.
    pub fn params(&self) -> &'a ParameterSet {
        self.params
    }

    /// The configuration in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Base seed shared by every member.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Builds the state for the first day of the window.
    pub fn initial_state<R: Rng>(&self, streams: &mut Streams<R>) -> Result<DailyState, EngineError> {
        let start = self.config.window().start();
        let month = start.month() as u8;
        let (weather, remaining) = match self.config.initial() {
            InitialCondition::Fixed { state, remaining } => (state, remaining),
            InitialCondition::Random { wet_probability } => {
                let weather = if streams.start.random_bool(wet_probability) {
                    WeatherState::Wet
                } else {
                    WeatherState::Dry
                };
                let remaining = self
                    .spells
                    .sample(month, weather, &mut streams.start)
                    .map_err(|e| EngineError::sampling(start, e))?;
                (weather, remaining)
            }
        };
        let schedule = self
            .injector
            .initial_schedule(&mut streams.event)
            .map_err(|e| EngineError::sampling(start, e))?;

        Ok(DailyState {
            date: start,
            elapsed_day: 0,
            weather,
            remaining,
            residual: self.config.initial_residual(),
            schedule,
            event_in_spell: false,
        })
    }

    /// Simulates the day `state.date` and returns the next state with the
    /// day's record. `state` itself is left untouched.
    pub fn step<R: Rng>(
        &self,
        state: &DailyState,
        streams: &mut Streams<R>,
    ) -> Result<(DailyState, DailyRecord), EngineError> {
        let date = state.date;
        let month = date.month() as u8;
        let doy = Doy::of(date);
        let mut next = state.clone();

        let spell_start = next.remaining == 0;
        if spell_start {
            next.weather = next.weather.flip();
            next.remaining = self
                .spells
                .sample(month, next.weather, &mut streams.spell)
                .map_err(|e| EngineError::sampling(date, e))?;
            next.event_in_spell = false;
        }

        let (precip, event) = match next.weather {
            WeatherState::Dry => (0.0, None),
            WeatherState::Wet => {
                let injected = self
                    .injector
                    .check(
                        &mut next.schedule,
                        state.elapsed_day,
                        spell_start,
                        next.event_in_spell,
                        &mut streams.event,
                    )
                    .map_err(|e| EngineError::sampling(date, e))?;
                match injected {
                    Some(ev) => {
                        next.event_in_spell = true;
                        let label = EventLabel {
                            name: ev.name,
                            return_period_years: ev.return_period_years,
                        };
                        (ev.depth, Some(label))
                    }
                    None => {
                        let depth = self
                            .depths
                            .sample(month, &mut streams.depth)
                            .map_err(|e| EngineError::sampling(date, e))?;
                        (depth, None)
                    }
                }
            }
        };

        let (residual, temps) = self
            .temperature
            .step(next.weather, doy, &state.residual, &mut streams.noise)
            .map_err(|e| EngineError::sampling(date, e))?;
        next.residual = residual;

        let record = DailyRecord {
            date,
            state: next.weather,
            precip,
            tmax: temps.tmax,
            tmin: temps.tmin,
            tave: temps.tave,
            event,
        };
        self.validate_record(&record)?;

        next.remaining = next
            .remaining
            .checked_sub(1)
            .ok_or_else(|| EngineError::sampling(date, "spell counter underflow"))?;
        next.elapsed_day += 1;
        next.date = date
            .succ_opt()
            .ok_or_else(|| EngineError::Coverage {
                reason: format!("no calendar date after {date}"),
            })?;

        Ok((next, record))
    }

    /// Simulates the whole window for one member with the given streams.
    pub fn run<R: Rng>(&self, member: u32, streams: &mut Streams<R>) -> Result<Realisation, EngineError> {
        let window = self.config.window();
        let n_days = window.n_days();
        let mut state = self.initial_state(streams)?;
        let mut records = Vec::with_capacity(n_days);
        for _ in 0..n_days {
            let (next, record) = self.step(&state, streams)?;
            records.push(record);
            state = next;
        }
        let realisation = Realisation::new(member, records);
        debug!(
            member,
            n_days,
            wet_fraction = realisation.wet_fraction(),
            n_events = realisation.events().len(),
            "realisation complete"
        );
        Ok(realisation)
    }

    /// Simulates one member with streams seeded from the base seed.
    pub fn run_member(&self, member: u32) -> Result<Realisation, EngineError> {
        let mut streams = Streams::<StdRng>::seeded(self.seed, member);
        self.run(member, &mut streams)
    }

    fn validate_record(&self, record: &DailyRecord) -> Result<(), EngineError> {
        let date = record.date;
        match (&record.state, &record.event) {
            (WeatherState::Dry, _) if record.precip != 0.0 => {
                return Err(EngineError::sampling(
                    date,
                    format!("dry day with depth {}", record.precip),
                ));
            }
            (WeatherState::Dry, Some(_)) => {
                return Err(EngineError::sampling(date, "extreme event on a dry day"));
            }
            (WeatherState::Wet, None) => {
                let cap = self.depths.cap(record.month());
                if !(self.depths.wet_floor()..=cap).contains(&record.precip) {
                    return Err(EngineError::sampling(
                        date,
                        format!(
                            "wet-day depth {} outside [{}, {cap}]",
                            record.precip,
                            self.depths.wet_floor()
                        ),
                    ));
                }
            }
            (WeatherState::Wet, Some(label)) => {
                let in_band = self
                    .params
                    .events()
                    .by_name(&label.name)
                    .is_some_and(|spec| spec.contains(record.precip));
                if !in_band {
                    return Err(EngineError::sampling(
                        date,
                        format!("event depth {} outside the {} band", record.precip, label.name),
                    ));
                }
            }
            _ => {}
        }
        for (name, value) in [
            ("tmax", record.tmax),
            ("tmin", record.tmin),
            ("tave", record.tave),
        ] {
            if !value.is_finite() {
                return Err(EngineError::sampling(date, format!("non-finite {name}: {value}")));
            }
        }
        if record.tmax - record.tmin < self.config.min_diurnal_range() - RANGE_TOLERANCE {
            return Err(EngineError::sampling(
                date,
                format!(
                    "diurnal range {} below minimum {}",
                    record.tmax - record.tmin,
                    self.config.min_diurnal_range()
                ),
            ));
        }
        Ok(())
    }
}
