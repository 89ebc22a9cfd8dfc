//! Check command: load basin parameters and report diagnostics.

use anyhow::{Context, Result};
use tracing::info_span;

use tempest_io::TomlRepository;
use tempest_params::{DEFAULT_CAP_PROBABILITY, ParameterRepository, WeatherState};
use tempest_temperature::{check_consistency, spectral_radius};

use crate::cli::CheckArgs;
use crate::config::TempestConfig;

/// Print a parameter report for the configured basin.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();
    let config = TempestConfig::load(&args.config)?;

    let repo = TomlRepository::new(&config.run.parameters_dir);
    let params = repo
        .load(&config.run.basin)
        .with_context(|| format!("failed to load parameters from {}", repo.dir().display()))?;

    println!("basin            {}", params.basin());
    println!("latitude         {:.3}", params.latitude_deg());
    println!("crop coefficient {:.3}", params.crop_coefficient());

    let corr = params.correlation();
    let report = check_consistency(corr);
    println!();
    println!("residual model");
    println!("  spectral radius of A  {:.4}", spectral_radius(corr.a()));
    println!("  |M1 - A·M0|           {:.3e}", report.lag1_error);
    println!("  |B·Bᵀ - (M0 - A·M0·Aᵀ)| {:.3e}", report.covariance_error);
    println!(
        "  within tolerance      {}",
        report.within(config.engine.consistency_tolerance)
    );

    println!();
    println!(
        "{:>5} {:>10} {:>10} {:>10} {:>12}",
        "month", "dry mean", "wet mean", "cap", "q95 depth"
    );
    for month in 1..=12u8 {
        let quantile = params
            .depth()
            .for_month(month)
            .quantile(DEFAULT_CAP_PROBABILITY)
            .with_context(|| format!("depth quantile failed for month {month}"))?;
        println!(
            "{:>5} {:>10.2} {:>10.2} {:>10.2} {:>12.2}",
            month,
            params.spell(WeatherState::Dry).for_month(month).expected_length(),
            params.spell(WeatherState::Wet).for_month(month).expected_length(),
            params.depth_cap().for_month(month),
            quantile,
        );
    }

    println!();
    if params.events().is_empty() {
        println!("no extreme events configured");
    }
    for event in params.events().events() {
        println!(
            "event {:<10} every {:>4} yr  [{:.1}, {:.1}] mm",
            event.name(),
            event.return_period_years(),
            event.min_depth(),
            event.max_depth()
        );
    }
    Ok(())
}
