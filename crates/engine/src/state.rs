//! Per-day simulation state and output records.

use chrono::Datelike;
use tempest_calendar::{Doy, NaiveDate};
use tempest_params::{Vec2, WeatherState};
use tempest_precip::EventSchedule;

/// Everything the state machine carries from one day to the next.
///
/// Created once by [`Simulator::initial_state`](crate::Simulator::initial_state)
/// and replaced each day by [`Simulator::step`](crate::Simulator::step).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyState {
    /// Date the next step will simulate.
    pub date: NaiveDate,
    /// Days simulated so far.
    pub elapsed_day: u64,
    /// Current wet/dry state.
    pub weather: WeatherState,
    /// Days left in the current spell, including `date`. Zero means the
    /// next step starts a new spell.
    pub remaining: u32,
    /// Standardized temperature residual of the previous day.
    pub residual: Vec2,
    /// Pending extreme events.
    pub schedule: EventSchedule,
    /// Whether the current wet spell already hosted an extreme event.
    pub event_in_spell: bool,
}

/// Label of an injected extreme event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLabel {
    /// Catalog name, e.g. `"25-year"`.
    pub name: String,
    /// Return period in years.
    pub return_period_years: u32,
}

/// One simulated day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    /// Calendar date.
    pub date: NaiveDate,
    /// Wet/dry state.
    pub state: WeatherState,
    /// Precipitation depth (mm); zero on dry days.
    pub precip: f64,
    /// Daily maximum temperature (°C).
    pub tmax: f64,
    /// Daily minimum temperature (°C).
    pub tmin: f64,
    /// Daily average temperature (°C).
    pub tave: f64,
    /// Extreme event delivered on this day, if any.
    pub event: Option<EventLabel>,
}

impl DailyRecord {
    /// Calendar month (1..=12).
    pub fn month(&self) -> u8 {
        self.date.month() as u8
    }

    /// Day of year.
    pub fn doy(&self) -> Doy {
        Doy::of(self.date)
    }

    /// Returns `true` on wet days.
    pub fn is_wet(&self) -> bool {
        self.state.is_wet()
    }
}

/// Entry in a realisation's extreme-event ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredEvent {
    /// Date the event was delivered.
    pub date: NaiveDate,
    /// Catalog name.
    pub name: String,
    /// Return period in years.
    pub return_period_years: u32,
    /// Delivered depth (mm).
    pub depth: f64,
}

/// One ensemble member: a gap-free daily series plus its event ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Realisation {
    member: u32,
    records: Vec<DailyRecord>,
    events: Vec<TriggeredEvent>,
}

impl Realisation {
    pub(crate) fn new(member: u32, records: Vec<DailyRecord>) -> Self {
        let events = records
            .iter()
            .filter_map(|r| {
                r.event.as_ref().map(|e| TriggeredEvent {
                    date: r.date,
                    name: e.name.clone(),
                    return_period_years: e.return_period_years,
                    depth: r.precip,
                })
            })
            .collect();
        Self {
            member,
            records,
            events,
        }
    }

    /// Ensemble member index.
    pub fn member(&self) -> u32 {
        self.member
    }

    /// Daily records in date order.
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Extreme events in date order.
    pub fn events(&self) -> &[TriggeredEvent] {
        &self.events
    }

    /// Number of simulated days.
    pub fn n_days(&self) -> usize {
        self.records.len()
    }

    /// Dates of every record.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Daily precipitation series.
    pub fn precip(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.precip).collect()
    }

    /// Daily maximum temperature series.
    pub fn tmax(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.tmax).collect()
    }

    /// Daily minimum temperature series.
    pub fn tmin(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.tmin).collect()
    }

    /// Daily average temperature series.
    pub fn tave(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.tave).collect()
    }

    /// Fraction of wet days.
    pub fn wet_fraction(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.records.iter().filter(|r| r.is_wet()).count() as f64 / self.records.len() as f64
    }
}
