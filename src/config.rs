use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level run configuration (`tempest.toml`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TempestConfig {
    /// What to simulate.
    pub run: RunToml,

    /// Simulation engine settings.
    #[serde(default)]
    pub engine: EngineToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl TempestConfig {
    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    pub basin: String,
    #[serde(default = "default_parameters_dir")]
    pub parameters_dir: PathBuf,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_members")]
    pub members: u32,
    #[serde(default)]
    pub first_member: u32,
}

fn default_parameters_dir() -> PathBuf {
    PathBuf::from("params")
}
fn default_members() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineToml {
    /// `random`, `wet` or `dry`.
    #[serde(default = "default_initial")]
    pub initial: String,
    #[serde(default = "default_wet_probability")]
    pub wet_probability: f64,
    /// Spell days left on day one for a fixed initial state.
    #[serde(default = "default_initial_remaining")]
    pub initial_remaining: u32,
    /// `after_spell_start`, `every_wet_day` or `once_per_wet_spell`.
    #[serde(default = "default_eligibility")]
    pub eligibility: String,
    #[serde(default = "default_wet_floor")]
    pub wet_floor: f64,
    #[serde(default = "default_true")]
    pub clip_residuals: bool,
    #[serde(default = "default_sigma_clip")]
    pub sigma_clip: f64,
    #[serde(default = "default_min_diurnal_range")]
    pub min_diurnal_range: f64,
    /// `warn`, `enforce` or `skip`.
    #[serde(default = "default_consistency")]
    pub consistency: String,
    #[serde(default = "default_consistency_tolerance")]
    pub consistency_tolerance: f64,
}

impl Default for EngineToml {
    fn default() -> Self {
        Self {
            initial: default_initial(),
            wet_probability: default_wet_probability(),
            initial_remaining: default_initial_remaining(),
            eligibility: default_eligibility(),
            wet_floor: default_wet_floor(),
            clip_residuals: true,
            sigma_clip: default_sigma_clip(),
            min_diurnal_range: default_min_diurnal_range(),
            consistency: default_consistency(),
            consistency_tolerance: default_consistency_tolerance(),
        }
    }
}

fn default_initial() -> String {
    "random".to_string()
}
fn default_wet_probability() -> f64 {
    0.5
}
fn default_initial_remaining() -> u32 {
    1
}
fn default_eligibility() -> String {
    "after_spell_start".to_string()
}
fn default_wet_floor() -> f64 {
    tempest_precip::DEFAULT_WET_FLOOR
}
fn default_true() -> bool {
    true
}
fn default_sigma_clip() -> f64 {
    tempest_temperature::DEFAULT_SIGMA_CLIP
}
fn default_min_diurnal_range() -> f64 {
    tempest_temperature::DEFAULT_MIN_DIURNAL_RANGE
}
fn default_consistency() -> String {
    "warn".to_string()
}
fn default_consistency_tolerance() -> f64 {
    tempest_temperature::DEFAULT_CONSISTENCY_TOLERANCE
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
    /// Append Hargreaves–Samani `eto` and `deficit` columns.
    #[serde(default)]
    pub pet: bool,
    /// PET multiplier applied on days with precipitation.
    #[serde(default = "default_rainy_day_factor")]
    pub rainy_day_factor: f64,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            path: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
            pet: false,
            rainy_day_factor: default_rainy_day_factor(),
        }
    }
}

fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}
fn default_rainy_day_factor() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: TempestConfig = toml::from_str(
            r#"
            [run]
            basin = "Frio"
            start = "2024-01-01"
            end = "2024-12-31"
            "#,
        )
        .unwrap();
        assert_eq!(config.run.parameters_dir, PathBuf::from("params"));
        assert_eq!(config.run.members, 1);
        assert_eq!(config.run.seed, None);
        assert_eq!(config.engine.initial, "random");
        assert_eq!(config.engine.wet_floor, 0.255);
        assert_eq!(config.output.compression, "snappy");
        assert!(!config.output.pet);
    }

    #[test]
    fn unknown_field_rejected() {
        let result: Result<TempestConfig, _> = toml::from_str(
            r#"
            [run]
            basin = "Frio"
            start = "2024-01-01"
            end = "2024-12-31"
            sites = 3
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn run_section_required() {
        let result: Result<TempestConfig, _> = toml::from_str("[engine]\nwet_floor = 0.3\n");
        assert!(result.is_err());
    }
}
