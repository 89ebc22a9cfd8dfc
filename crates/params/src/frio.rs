//! Calibrated parameters for the Frio River basin, Texas.
//!
//! Covers spell, depth, cap, offset, residual-coefficient and extreme-event
//! parameters. The day-of-year climatology and the correlation matrices
//! `M0`/`M1` are basin data files and are not bundled.

use crate::climatology::TemperatureOffsets;
use crate::depth::GammaDepth;
use crate::error::ParamsError;
use crate::events::{EventCatalog, ExtremeEventSpec};
use crate::matrix::Mat2;
use crate::monthly::Monthly;
use crate::set::{ParameterSet, ParameterSetBuilder};
use crate::spell::NegBinomialSpell;

/// Basin identifier.
pub const BASIN: &str = "Frio";

/// Basin centroid latitude in decimal degrees.
pub const LATITUDE_DEG: f64 = 29.678;

const DRY_SPELL: [[f64; 2]; 12] = [
    [3.915162388655806, 0.2977526333113043],
    [5.312731046936296, 0.1988934314137431],
    [3.603636540370255, 0.3428403644909424],
    [2.704911745656023, 0.3295790193540502],
    [6.953055983608310, 0.3176279916535475],
    [5.058893398911076, 0.3010013234726136],
    [6.095997869386332, 0.3669773538213991],
    [3.177489210319657, 0.5094441058940438],
    [3.735472701463134, 0.2370562126500331],
    [4.606282010303014, 0.2057183456563516],
    [3.000000000000000, 0.1761191459571701],
    [3.756479818110243, 0.4118150622443279],
];

const WET_SPELL: [[f64; 2]; 12] = [
    [4.510865915360880, 0.6451501587119356],
    [2.475100135849106, 0.6696768747074860],
    [1.675569413084325, 0.4654584992804364],
    [2.556299700526773, 0.6365853084394536],
    [3.469188391831542, 0.6069615384053114],
    [3.115250111464483, 0.3393072067630571],
    [1.830988852381821, 0.4184422242753315],
    [1.714407941451173, 0.6526271751106262],
    [2.355907294215807, 0.3353929549624517],
    [2.381103082918876, 0.5459329374264738],
    [2.138504952307077, 0.6512751306213146],
    [2.440332865483639, 0.6921787755056502],
];

// a, c, location, scale
const DEPTH: [[f64; 4]; 12] = [
    [0.7837115409758860, 1.347633111170500, 0.255, 5.610609853852632],
    [1.062803150829027, 1.341118445314213, 0.255, 6.391470021107692],
    [1.100735454047688, 1.272354996142382, 0.255, 8.348663906132668],
    [1.101843127926503, 1.210980653693744, 0.255, 6.991410943221600],
    [1.176806796894472, 1.534848341733679, 0.255, 7.508790937219044],
    [1.494046016720638, 1.372390726371365, 0.255, 10.52645546925398],
    [1.048404563404255, 1.491669130947536, 0.255, 9.731293267451120],
    [0.8286900863678252, 1.618721168571233, 0.255, 8.629731575543266],
    [1.101651079078155, 1.426794294882264, 0.255, 10.01386843532882],
    [1.536794107157059, 1.294664433648325, 0.255, 10.00000000000000],
    [0.7814800192944810, 1.396406230690366, 0.255, 6.756062486679516],
    [0.7951754020048494, 1.369403585110688, 0.255, 5.540832599808860],
];

const DEPTH_CAP: [f64; 12] = [
    23.5, 22.9, 33.4, 31.2, 39.6, 36.3, 38.6, 35.0, 46.1, 46.1, 35.7, 24.3,
];

// name, return period, min, max
const EVENTS: [(&str, u32, f64, f64); 6] = [
    ("2-year", 2, 96.0, 153.7479198867500),
    ("5-year", 5, 141.0, 247.6322773540412),
    ("10-year", 10, 179.0, 255.7052662952905),
    ("25-year", 25, 236.0, 290.9002966072379),
    ("50-year", 50, 285.0, 415.4495994011296),
    ("100-year", 100, 343.0, 498.1388101352216),
];

/// Monthly dry-spell parameters.
pub fn dry_spells() -> Result<Monthly<NegBinomialSpell>, ParamsError> {
    Monthly::try_from_fn(|m| {
        let [n, p] = DRY_SPELL[(m - 1) as usize];
        NegBinomialSpell::dry(n, p)
    })
}

/// Monthly wet-spell parameters.
pub fn wet_spells() -> Result<Monthly<NegBinomialSpell>, ParamsError> {
    Monthly::try_from_fn(|m| {
        let [n, p] = WET_SPELL[(m - 1) as usize];
        NegBinomialSpell::wet(n, p)
    })
}

/// Monthly generalized gamma depth parameters.
pub fn depths() -> Result<Monthly<GammaDepth>, ParamsError> {
    Monthly::try_from_fn(|m| {
        let [a, c, loc, scale] = DEPTH[(m - 1) as usize];
        GammaDepth::new(a, c, loc, scale)
    })
}

/// Monthly maximum ordinary wet-day depth (mm).
pub fn depth_caps() -> Monthly<f64> {
    Monthly::from_array(DEPTH_CAP)
}

/// Attribution-adjusted temperature offsets.
pub fn offsets() -> Result<TemperatureOffsets, ParamsError> {
    TemperatureOffsets::new(
        5.098810943474146,
        6.941519835725408,
        0.8523552116658896,
        0.8422783217775328,
    )
}

/// Autoregressive coefficient matrix `A` (column-vector convention).
pub fn residual_a() -> Mat2 {
    Mat2::new([[0.56219295, -0.03543818], [0.2050754, 0.68296039]])
}

/// Noise loading matrix `B` (column-vector convention).
pub fn residual_b() -> Mat2 {
    Mat2::new([[0.74093011, 0.17681369], [0.0, 0.72149121]])
}

/// Attribution-adjusted extreme-event catalog.
pub fn events() -> Result<EventCatalog, ParamsError> {
    let specs = EVENTS
        .iter()
        .map(|&(name, rp, lo, hi)| ExtremeEventSpec::new(name, rp, lo, hi))
        .collect::<Result<Vec<_>, _>>()?;
    EventCatalog::new(specs)
}

/// Builder pre-loaded with every bundled Frio component.
///
/// Climatology and correlation matrices must still be supplied.
pub fn builder() -> Result<ParameterSetBuilder, ParamsError> {
    Ok(ParameterSet::builder(BASIN)
        .with_latitude(LATITUDE_DEG)
        .with_dry_spell(dry_spells()?)
        .with_wet_spell(wet_spells()?)
        .with_depth(depths()?)
        .with_depth_cap(depth_caps())
        .with_offsets(offsets()?)
        .with_events(events()?))
}
