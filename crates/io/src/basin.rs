//! TOML representation of a basin parameter file.
//!
//! ```toml
//! basin = "Frio"
//! latitude = 29.678
//! crop_coefficient = 1.0
//! # depth_cap = [...]            # 12 values; derived from `depth` if absent
//! # depth_cap_probability = 0.95
//!
//! [[dry_spell]]                  # 12 entries, January first
//! n = 0.9
//! p = 0.12
//! # location = 2.0             # at least 2 for dry spells, 1 for wet
//!
//! [[wet_spell]]                  # 12 entries
//! [[depth]]                      # 12 entries: shape_a, shape_c, location, scale
//!
//! [offsets]
//! wet_tmax = -0.5
//!
//! [climatology]                  # 365 or 366 rows of [tmax, tmin, tave]
//! wet_mean = [[24.1, 11.0, 17.5], ...]
//! wet_std = [...]
//! dry_mean = [...]
//! dry_std = [...]
//!
//! [correlation]
//! m0 = [[1.0, 0.6], [0.6, 1.0]]
//! m1 = [[0.6, 0.3], [0.4, 0.7]]
//! # a and b are derived from m0 and m1 when both are omitted
//!
//! [[events]]
//! name = "100-yr"
//! return_period_years = 100
//! min_depth = 180.0
//! max_depth = 260.0
//! ```

use serde::{Deserialize, Serialize};
use tempest_params::{
    Climatology, ClimatologyTable, CorrelationMatrices, DEFAULT_CAP_PROBABILITY, DailyClimate,
    EventCatalog, ExtremeEventSpec, GammaDepth, Mat2, Monthly, NegBinomialSpell, ParameterSet,
    ParamsError, TemperatureOffsets, WeatherState, depth_caps_from_quantile,
};
use tempest_temperature::derive_coefficients;
use tracing::warn;

fn default_crop_coefficient() -> f64 {
    1.0
}

fn default_cap_probability() -> f64 {
    DEFAULT_CAP_PROBABILITY
}

/// Top-level contents of `<basin>.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BasinFile {
    #[serde(default)]
    pub basin: Option<String>,
    pub latitude: f64,
    #[serde(default = "default_crop_coefficient")]
    pub crop_coefficient: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_cap: Option<Vec<f64>>,
    #[serde(default = "default_cap_probability")]
    pub depth_cap_probability: f64,
    pub dry_spell: Vec<SpellEntry>,
    pub wet_spell: Vec<SpellEntry>,
    pub depth: Vec<DepthEntry>,
    #[serde(default)]
    pub offsets: OffsetsEntry,
    pub climatology: ClimatologyEntry,
    pub correlation: CorrelationEntry,
    #[serde(default)]
    pub events: Vec<EventEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SpellEntry {
    pub n: f64,
    pub p: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DepthEntry {
    pub shape_a: f64,
    pub shape_c: f64,
    pub location: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct OffsetsEntry {
    pub wet_tmax: f64,
    pub dry_tmax: f64,
    pub wet_tmin: f64,
    pub dry_tmin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ClimatologyEntry {
    pub wet_mean: Vec<[f64; 3]>,
    pub wet_std: Vec<[f64; 3]>,
    pub dry_mean: Vec<[f64; 3]>,
    pub dry_std: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CorrelationEntry {
    pub m0: [[f64; 2]; 2],
    pub m1: [[f64; 2]; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<[[f64; 2]; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<[[f64; 2]; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EventEntry {
    pub name: String,
    pub return_period_years: u32,
    pub min_depth: f64,
    pub max_depth: f64,
}

impl BasinFile {
    /// Validates the file contents and assembles a [`ParameterSet`].
    ///
    /// `basin` names the set when the file has no `basin` key; a key that
    /// disagrees with it is an error.
    pub(crate) fn into_parameter_set(self, basin: &str) -> Result<ParameterSet, ParamsError> {
        if let Some(declared) = &self.basin
            && declared != basin
        {
            return Err(ParamsError::Repository {
                basin: basin.to_string(),
                reason: format!("file declares basin '{declared}'"),
            });
        }

        let dry_spell = spells(&self.dry_spell, WeatherState::Dry)?;
        let wet_spell = spells(&self.wet_spell, WeatherState::Wet)?;
        if self.depth.len() != 12 {
            return Err(ParamsError::MonthCount {
                got: self.depth.len(),
            });
        }
        let depth = Monthly::try_from_fn(|m| {
            let d = &self.depth[(m - 1) as usize];
            GammaDepth::new(d.shape_a, d.shape_c, d.location, d.scale)
        })?;
        let depth_cap = match &self.depth_cap {
            Some(caps) => Monthly::try_from_vec(caps.clone())?,
            None => depth_caps_from_quantile(&depth, self.depth_cap_probability)?,
        };

        let climatology = Climatology::new(
            ClimatologyTable::new("wet_mean", rows(&self.climatology.wet_mean))?,
            ClimatologyTable::new_spread("wet_std", rows(&self.climatology.wet_std))?,
            ClimatologyTable::new("dry_mean", rows(&self.climatology.dry_mean))?,
            ClimatologyTable::new_spread("dry_std", rows(&self.climatology.dry_std))?,
        );

        let offsets = TemperatureOffsets::new(
            self.offsets.wet_tmax,
            self.offsets.dry_tmax,
            self.offsets.wet_tmin,
            self.offsets.dry_tmin,
        )?;

        let correlation = self.correlation.to_matrices()?;

        let events = EventCatalog::new(
            self.events
                .iter()
                .map(|e| {
                    ExtremeEventSpec::new(&e.name, e.return_period_years, e.min_depth, e.max_depth)
                })
                .collect::<Result<Vec<_>, _>>()?,
        )?;

        ParameterSet::builder(basin)
            .with_latitude(self.latitude)
            .with_crop_coefficient(self.crop_coefficient)
            .with_dry_spell(dry_spell)
            .with_wet_spell(wet_spell)
            .with_depth(depth)
            .with_depth_cap(depth_cap)
            .with_climatology(climatology)
            .with_offsets(offsets)
            .with_correlation(correlation)
            .with_events(events)
            .build()
    }

    /// Captures a [`ParameterSet`] in file form.
    pub(crate) fn from_parameter_set(set: &ParameterSet) -> Self {
        let spell_entries = |state: WeatherState| -> Vec<SpellEntry> {
            set.spell(state)
                .values()
                .iter()
                .map(|s| SpellEntry {
                    n: s.n(),
                    p: s.p(),
                    location: Some(s.location()),
                })
                .collect()
        };
        let clim = set.climatology();
        let table = |state: WeatherState, mean: bool| -> Vec<[f64; 3]> {
            let t = if mean {
                clim.mean_table(state)
            } else {
                clim.std_table(state)
            };
            t.rows().iter().map(|r| [r.tmax, r.tmin, r.tave]).collect()
        };
        let corr = set.correlation();
        let offsets = set.offsets();

        Self {
            basin: Some(set.basin().to_string()),
            latitude: set.latitude_deg(),
            crop_coefficient: set.crop_coefficient(),
            depth_cap: Some(set.depth_cap().values().to_vec()),
            depth_cap_probability: DEFAULT_CAP_PROBABILITY,
            dry_spell: spell_entries(WeatherState::Dry),
            wet_spell: spell_entries(WeatherState::Wet),
            depth: set
                .depth()
                .values()
                .iter()
                .map(|d| DepthEntry {
                    shape_a: d.shape_a(),
                    shape_c: d.shape_c(),
                    location: d.location(),
                    scale: d.scale(),
                })
                .collect(),
            offsets: OffsetsEntry {
                wet_tmax: offsets.tmax(WeatherState::Wet),
                dry_tmax: offsets.tmax(WeatherState::Dry),
                wet_tmin: offsets.tmin(WeatherState::Wet),
                dry_tmin: offsets.tmin(WeatherState::Dry),
            },
            climatology: ClimatologyEntry {
                wet_mean: table(WeatherState::Wet, true),
                wet_std: table(WeatherState::Wet, false),
                dry_mean: table(WeatherState::Dry, true),
                dry_std: table(WeatherState::Dry, false),
            },
            correlation: CorrelationEntry {
                m0: corr.m0().to_rows(),
                m1: corr.m1().to_rows(),
                a: Some(corr.a().to_rows()),
                b: Some(corr.b().to_rows()),
            },
            events: set
                .events()
                .events()
                .iter()
                .map(|e| EventEntry {
                    name: e.name().to_string(),
                    return_period_years: e.return_period_years(),
                    min_depth: e.min_depth(),
                    max_depth: e.max_depth(),
                })
                .collect(),
        }
    }
}

impl CorrelationEntry {
    fn to_matrices(&self) -> Result<CorrelationMatrices, ParamsError> {
        let m0 = Mat2::new(self.m0);
        let m1 = Mat2::new(self.m1);
        let (a, b) = match (self.a, self.b) {
            (Some(a), Some(b)) => (Mat2::new(a), Mat2::new(b)),
            (None, None) => {
                derive_coefficients(&m0, &m1).map_err(|e| ParamsError::InvalidMatrix {
                    name: "A/B",
                    reason: e.to_string(),
                })?
            }
            _ => {
                return Err(ParamsError::InvalidMatrix {
                    name: "A/B",
                    reason: "give both a and b, or neither to derive them".to_string(),
                });
            }
        };
        CorrelationMatrices::new(a, b, m0, m1)
    }
}

fn spells(
    entries: &[SpellEntry],
    state: WeatherState,
) -> Result<Monthly<NegBinomialSpell>, ParamsError> {
    if entries.len() != 12 {
        return Err(ParamsError::MonthCount { got: entries.len() });
    }
    Monthly::try_from_fn(|m| {
        let e = &entries[(m - 1) as usize];
        let minimum = NegBinomialSpell::default_location(state);
        let location = e.location.unwrap_or(minimum);
        if location < minimum {
            return Err(ParamsError::InvalidSpell {
                reason: format!(
                    "{} spell location {location} below the {minimum}-day minimum",
                    state.label()
                ),
            });
        }
        if location != minimum {
            warn!(
                state = state.label(),
                month = m,
                location,
                default = minimum,
                "spell location overrides the default minimum length"
            );
        }
        NegBinomialSpell::new(e.n, e.p, location).map_err(|err| match err {
            ParamsError::InvalidSpell { reason } => ParamsError::InvalidSpell {
                reason: format!("{} spell: {reason}", state.label()),
            },
            other => other,
        })
    })
}

fn rows(raw: &[[f64; 3]]) -> Vec<DailyClimate> {
    raw.iter()
        .map(|&[tmax, tmin, tave]| DailyClimate::new(tmax, tmin, tave))
        .collect()
}
