//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use tempest_calendar::SimulationWindow;
use tempest_engine::{ConsistencyPolicy, EventEligibility, InitialCondition, SimulationConfig};
use tempest_io::{Compression, WriterConfig};
use tempest_params::WeatherState;

use crate::config::{EngineToml, OutputToml, RunToml};

/// Parses a compression algorithm name into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Parses an event eligibility policy name.
pub fn parse_eligibility(s: &str) -> Result<EventEligibility> {
    match s.to_lowercase().as_str() {
        "after_spell_start" => Ok(EventEligibility::AfterSpellStart),
        "every_wet_day" => Ok(EventEligibility::EveryWetDay),
        "once_per_wet_spell" => Ok(EventEligibility::OncePerWetSpell),
        other => bail!("unknown event eligibility: {other:?}"),
    }
}

/// Parses a consistency policy name together with its tolerance.
pub fn parse_consistency(s: &str, tolerance: f64) -> Result<ConsistencyPolicy> {
    match s.to_lowercase().as_str() {
        "warn" => Ok(ConsistencyPolicy::Warn(tolerance)),
        "enforce" => Ok(ConsistencyPolicy::Enforce(tolerance)),
        "skip" => Ok(ConsistencyPolicy::Skip),
        other => bail!("unknown consistency policy: {other:?}"),
    }
}

/// Converts the `[engine]` initial-state keys into an [`InitialCondition`].
pub fn parse_initial(engine: &EngineToml) -> Result<InitialCondition> {
    let fixed = |state| InitialCondition::Fixed {
        state,
        remaining: engine.initial_remaining,
    };
    match engine.initial.to_lowercase().as_str() {
        "random" => Ok(InitialCondition::Random {
            wet_probability: engine.wet_probability,
        }),
        "wet" => Ok(fixed(WeatherState::Wet)),
        "dry" => Ok(fixed(WeatherState::Dry)),
        other => bail!("unknown initial state: {other:?}"),
    }
}

/// Builds a validated [`SimulationConfig`] from the `[run]` and `[engine]`
/// sections.
///
/// `seed` overrides `[run].seed` when given.
pub fn build_simulation_config(
    run: &RunToml,
    engine: &EngineToml,
    seed: Option<u64>,
) -> Result<SimulationConfig> {
    let window = SimulationWindow::parse(&run.start, &run.end)
        .with_context(|| format!("invalid simulation window {}..{}", run.start, run.end))?;
    let sigma_clip = engine.clip_residuals.then_some(engine.sigma_clip);
    let mut cfg = SimulationConfig::new(window)
        .with_initial(parse_initial(engine)?)
        .with_eligibility(parse_eligibility(&engine.eligibility)?)
        .with_wet_floor(engine.wet_floor)
        .with_sigma_clip(sigma_clip)
        .with_min_diurnal_range(engine.min_diurnal_range)
        .with_consistency(parse_consistency(
            &engine.consistency,
            engine.consistency_tolerance,
        )?);
    if let Some(s) = seed.or(run.seed) {
        cfg = cfg.with_seed(s);
    }
    cfg.validate().context("invalid [engine] settings")?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the `[output]` section.
pub fn build_writer_config(output: &OutputToml) -> Result<WriterConfig> {
    let compression = parse_compression(&output.compression)?;
    let cfg = WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(output.row_group_size);
    cfg.validate().context("invalid [output] settings")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_toml() -> RunToml {
        toml::from_str(
            r#"
            basin = "Frio"
            start = "2024-01-01"
            end = "2024-01-31"
            seed = 11
            "#,
        )
        .unwrap()
    }

    #[test]
    fn compression_names() {
        assert_eq!(parse_compression("ZSTD").unwrap(), Compression::Zstd);
        assert_eq!(parse_compression("none").unwrap(), Compression::None);
        assert!(parse_compression("lz4").is_err());
    }

    #[test]
    fn eligibility_names() {
        assert_eq!(
            parse_eligibility("once_per_wet_spell").unwrap(),
            EventEligibility::OncePerWetSpell
        );
        assert_eq!(
            parse_eligibility("after_spell_start").unwrap(),
            EventEligibility::AfterSpellStart
        );
        assert!(parse_eligibility("monthly").is_err());
    }

    #[test]
    fn consistency_names() {
        assert_eq!(
            parse_consistency("enforce", 1e-4).unwrap(),
            ConsistencyPolicy::Enforce(1e-4)
        );
        assert_eq!(
            parse_consistency("skip", 1e-4).unwrap(),
            ConsistencyPolicy::Skip
        );
        assert!(parse_consistency("strict", 1e-4).is_err());
    }

    #[test]
    fn fixed_initial_state() {
        let engine = EngineToml {
            initial: "dry".to_string(),
            initial_remaining: 5,
            ..EngineToml::default()
        };
        assert_eq!(
            parse_initial(&engine).unwrap(),
            InitialCondition::Fixed {
                state: WeatherState::Dry,
                remaining: 5
            }
        );
    }

    #[test]
    fn cli_seed_overrides_config() {
        let cfg = build_simulation_config(&run_toml(), &EngineToml::default(), Some(99)).unwrap();
        assert_eq!(cfg.seed(), Some(99));
        let cfg = build_simulation_config(&run_toml(), &EngineToml::default(), None).unwrap();
        assert_eq!(cfg.seed(), Some(11));
        assert_eq!(cfg.window().n_days(), 31);
    }

    #[test]
    fn residual_clip_can_be_disabled() {
        let engine = EngineToml {
            clip_residuals: false,
            ..EngineToml::default()
        };
        let cfg = build_simulation_config(&run_toml(), &engine, None).unwrap();
        assert_eq!(cfg.sigma_clip(), None);
    }

    #[test]
    fn inverted_window_rejected() {
        let mut run = run_toml();
        run.end = "2023-12-31".to_string();
        assert!(build_simulation_config(&run, &EngineToml::default(), None).is_err());
    }

    #[test]
    fn zero_row_group_rejected() {
        let output = OutputToml {
            row_group_size: 0,
            ..OutputToml::default()
        };
        assert!(build_writer_config(&output).is_err());
    }
}
