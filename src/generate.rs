//! Generate command: simulate an ensemble and write it to Parquet.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use tempest_engine::{Realisation, Simulator, run_ensemble};
use tempest_io::{PetColumns, TomlRepository, write_parquet};
use tempest_params::{ParameterRepository, ParameterSet};
use tempest_pet::{adjust_pet, deficit, hargreaves_samani};

use crate::cli::GenerateArgs;
use crate::config::TempestConfig;
use crate::convert;

/// Run the generation pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();
    let config = TempestConfig::load(&args.config)?;

    let sim_cfg = convert::build_simulation_config(&config.run, &config.engine, args.seed)?;
    let writer_cfg = convert::build_writer_config(&config.output)?;
    let output = args
        .output
        .or_else(|| config.output.path.clone())
        .ok_or_else(|| anyhow!("no output path: set [output].path in config or use --output"))?;
    let n_members = args.members.unwrap_or(config.run.members);
    let first = config.run.first_member;
    let last = first
        .checked_add(n_members)
        .context("member range overflows u32")?;

    let repo = TomlRepository::new(&config.run.parameters_dir);
    let params = repo
        .load(&config.run.basin)
        .with_context(|| format!("failed to load parameters from {}", repo.dir().display()))?;

    let simulator = Simulator::new(&params, &sim_cfg).context("failed to set up simulator")?;
    info!(
        basin = params.basin(),
        seed = simulator.seed(),
        n_members,
        n_days = sim_cfg.window().n_days(),
        "starting simulation"
    );

    let realisations = run_ensemble(&simulator, first..last).context("simulation failed")?;
    for r in &realisations {
        info!(
            member = r.member(),
            wet_fraction = r.wet_fraction(),
            n_events = r.events().len(),
            "member summary"
        );
    }

    let pet = if config.output.pet {
        Some(pet_columns(&realisations, &params, config.output.rainy_day_factor)?)
    } else {
        None
    };

    info!(path = %output.display(), n_realisations = realisations.len(), "writing output");
    write_parquet(&output, &realisations, pet.as_deref(), &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
    info!("parquet output written");

    Ok(())
}

/// Reference ETo and the deficit against crop-adjusted PET, per realisation.
fn pet_columns(
    realisations: &[Realisation],
    params: &ParameterSet,
    rainy_day_factor: f64,
) -> Result<Vec<PetColumns>> {
    realisations
        .iter()
        .map(|r| -> Result<PetColumns> {
            let precip = r.precip();
            let eto = hargreaves_samani(
                &r.dates(),
                &r.tmax(),
                &r.tmin(),
                &r.tave(),
                params.latitude_deg(),
            )?;
            let pet = adjust_pet(&eto, &precip, params.crop_coefficient(), rainy_day_factor)?;
            let deficit = deficit(&precip, &pet)?;
            Ok(PetColumns::new(eto, deficit)?)
        })
        .collect::<Result<Vec<_>>>()
        .context("failed to compute evapotranspiration")
}
