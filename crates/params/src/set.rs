//! Complete, validated parameter set for one basin.

use crate::climatology::{Climatology, TemperatureOffsets};
use crate::correlation::CorrelationMatrices;
use crate::depth::GammaDepth;
use crate::error::ParamsError;
use crate::events::EventCatalog;
use crate::monthly::Monthly;
use crate::spell::NegBinomialSpell;
use crate::state::WeatherState;

/// Every parameter the simulation engine reads, for one basin.
///
/// Immutable once built; shared read-only across ensemble members.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    basin: String,
    latitude_deg: f64,
    crop_coefficient: f64,
    dry_spell: Monthly<NegBinomialSpell>,
    wet_spell: Monthly<NegBinomialSpell>,
    depth: Monthly<GammaDepth>,
    depth_cap: Monthly<f64>,
    climatology: Climatology,
    offsets: TemperatureOffsets,
    correlation: CorrelationMatrices,
    events: EventCatalog,
}

impl ParameterSet {
    /// Starts a builder for the given basin.
    pub fn builder(basin: impl Into<String>) -> ParameterSetBuilder {
        ParameterSetBuilder::new(basin)
    }

    /// Basin identifier.
    pub fn basin(&self) -> &str {
        &self.basin
    }

    /// Latitude in decimal degrees.
    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    /// Crop coefficient. Carried for downstream water-balance tools.
    pub fn crop_coefficient(&self) -> f64 {
        self.crop_coefficient
    }

    /// Monthly spell-length parameters for spells of `state`.
    pub fn spell(&self, state: WeatherState) -> &Monthly<NegBinomialSpell> {
        match state {
            WeatherState::Wet => &self.wet_spell,
            WeatherState::Dry => &self.dry_spell,
        }
    }

    /// Monthly wet-day depth parameters.
    pub fn depth(&self) -> &Monthly<GammaDepth> {
        &self.depth
    }

    /// Monthly maximum ordinary wet-day depth (mm).
    pub fn depth_cap(&self) -> &Monthly<f64> {
        &self.depth_cap
    }

    /// Temperature climatology.
    pub fn climatology(&self) -> &Climatology {
        &self.climatology
    }

    /// Additive temperature offsets.
    pub fn offsets(&self) -> &TemperatureOffsets {
        &self.offsets
    }

    /// Residual-model matrices.
    pub fn correlation(&self) -> &CorrelationMatrices {
        &self.correlation
    }

    /// Extreme-event catalog.
    pub fn events(&self) -> &EventCatalog {
        &self.events
    }
}

/// Builder for [`ParameterSet`].
///
/// Spell, depth, cap, climatology and correlation components are required.
/// Offsets default to zero, the event catalog to empty and the crop
/// coefficient to 1.0.
#[derive(Debug, Clone)]
pub struct ParameterSetBuilder {
    basin: String,
    latitude_deg: Option<f64>,
    crop_coefficient: f64,
    dry_spell: Option<Monthly<NegBinomialSpell>>,
    wet_spell: Option<Monthly<NegBinomialSpell>>,
    depth: Option<Monthly<GammaDepth>>,
    depth_cap: Option<Monthly<f64>>,
    climatology: Option<Climatology>,
    offsets: TemperatureOffsets,
    correlation: Option<CorrelationMatrices>,
    events: EventCatalog,
}

impl ParameterSetBuilder {
    fn new(basin: impl Into<String>) -> Self {
        Self {
            basin: basin.into(),
            latitude_deg: None,
            crop_coefficient: 1.0,
            dry_spell: None,
            wet_spell: None,
            depth: None,
            depth_cap: None,
            climatology: None,
            offsets: TemperatureOffsets::default(),
            correlation: None,
            events: EventCatalog::empty(),
        }
    }

    /// Sets the latitude in decimal degrees.
    pub fn with_latitude(mut self, latitude_deg: f64) -> Self {
        self.latitude_deg = Some(latitude_deg);
        self
    }

    /// Sets the crop coefficient.
    pub fn with_crop_coefficient(mut self, kc: f64) -> Self {
        self.crop_coefficient = kc;
        self
    }

    /// Sets the monthly dry-spell parameters.
    pub fn with_dry_spell(mut self, spell: Monthly<NegBinomialSpell>) -> Self {
        self.dry_spell = Some(spell);
        self
    }

    /// Sets the monthly wet-spell parameters.
    pub fn with_wet_spell(mut self, spell: Monthly<NegBinomialSpell>) -> Self {
        self.wet_spell = Some(spell);
        self
    }

    /// Sets the monthly depth parameters.
    pub fn with_depth(mut self, depth: Monthly<GammaDepth>) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Sets the monthly depth caps.
    pub fn with_depth_cap(mut self, caps: Monthly<f64>) -> Self {
        self.depth_cap = Some(caps);
        self
    }

    /// Sets the temperature climatology.
    pub fn with_climatology(mut self, climatology: Climatology) -> Self {
        self.climatology = Some(climatology);
        self
    }

    /// Sets the temperature offsets.
    pub fn with_offsets(mut self, offsets: TemperatureOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    /// Sets the residual-model matrices.
    pub fn with_correlation(mut self, correlation: CorrelationMatrices) -> Self {
        self.correlation = Some(correlation);
        self
    }

    /// Sets the extreme-event catalog.
    pub fn with_events(mut self, events: EventCatalog) -> Self {
        self.events = events;
        self
    }

    /// Validates and assembles the parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::MissingComponent`] for any unset required
    /// component, and the corresponding validation error for an invalid
    /// latitude, crop coefficient or depth cap.
    pub fn build(self) -> Result<ParameterSet, ParamsError> {
        let latitude_deg = self
            .latitude_deg
            .ok_or(ParamsError::MissingComponent { name: "latitude" })?;
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(ParamsError::InvalidLatitude {
                value: latitude_deg,
            });
        }
        if !self.crop_coefficient.is_finite() || self.crop_coefficient < 0.0 {
            return Err(ParamsError::InvalidCropCoefficient {
                value: self.crop_coefficient,
            });
        }
        let depth_cap = self
            .depth_cap
            .ok_or(ParamsError::MissingComponent { name: "depth caps" })?;
        for (month, &cap) in depth_cap.iter() {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(ParamsError::InvalidDepthCap { month, value: cap });
            }
        }

        Ok(ParameterSet {
            basin: self.basin,
            latitude_deg,
            crop_coefficient: self.crop_coefficient,
            dry_spell: self.dry_spell.ok_or(ParamsError::MissingComponent {
                name: "dry spell parameters",
            })?,
            wet_spell: self.wet_spell.ok_or(ParamsError::MissingComponent {
                name: "wet spell parameters",
            })?,
            depth: self.depth.ok_or(ParamsError::MissingComponent {
                name: "depth parameters",
            })?,
            depth_cap,
            climatology: self.climatology.ok_or(ParamsError::MissingComponent {
                name: "climatology",
            })?,
            offsets: self.offsets,
            correlation: self.correlation.ok_or(ParamsError::MissingComponent {
                name: "correlation matrices",
            })?,
            events: self.events,
        })
    }
}
