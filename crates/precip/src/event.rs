//! Extreme-event classification, scheduling and injection.
//!
//! Every catalog entry keeps its own next trigger. Inter-arrival times are
//! Poisson in years with the return period as mean, and each trigger
//! carries a magnitude drawn uniformly from the event's depth band. An
//! event is due on an eligible wet day once its trigger day has passed; due
//! events fire, the largest due magnitude becomes the day's depth, and each
//! fired event is rescheduled from the current day. By default the first
//! day of a wet spell always takes an ordinary depth.

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use tempest_params::{EventCatalog, ExtremeEventSpec};

use crate::error::PrecipError;

/// Days per year used to convert recurrence draws to days.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Which wet days may host an injected extreme event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventEligibility {
    /// Any wet day except the first day of a wet spell.
    #[default]
    AfterSpellStart,
    /// Any wet day, including the day a wet spell starts.
    EveryWetDay,
    /// At most one injected event per wet spell, never on its first day.
    OncePerWetSpell,
}

impl EventEligibility {
    /// Returns `true` if a wet day may host an event under this policy.
    ///
    /// `spell_start` marks the first day of a wet spell and
    /// `event_in_spell` tells whether the spell already hosted an event.
    pub fn admits(self, spell_start: bool, event_in_spell: bool) -> bool {
        match self {
            Self::EveryWetDay => true,
            Self::AfterSpellStart => !spell_start,
            Self::OncePerWetSpell => !spell_start && !event_in_spell,
        }
    }
}

/// Returns the highest-return-period event whose depth band contains
/// `magnitude`, or `None` for an ordinary depth.
pub fn classify(catalog: &EventCatalog, magnitude: f64) -> Option<&ExtremeEventSpec> {
    catalog.events().iter().rev().find(|e| e.contains(magnitude))
}

/// Next occurrence of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingEvent {
    /// Elapsed simulation day after which the event becomes due.
    pub trigger_day: f64,
    /// Depth (mm) the event will deliver.
    pub magnitude: f64,
}

/// Pending occurrences, one per catalog entry in catalog order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventSchedule {
    pending: Vec<PendingEvent>,
}

impl EventSchedule {
    /// Pending occurrences in catalog order.
    pub fn pending(&self) -> &[PendingEvent] {
        &self.pending
    }

    /// Number of scheduled entries.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// An extreme event delivered on a wet day.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectedEvent {
    /// Catalog label of the event class the depth falls in.
    pub name: String,
    /// Return period of that class in years.
    pub return_period_years: u32,
    /// Delivered depth (mm).
    pub depth: f64,
}

/// Decides, day by day, whether a wet day carries an extreme event.
///
/// Performs no tuning: attribution is encoded entirely in the catalog's
/// depth bands.
#[derive(Debug, Clone, Copy)]
pub struct ExtremeEventInjector<'a> {
    catalog: &'a EventCatalog,
    eligibility: EventEligibility,
}

impl<'a> ExtremeEventInjector<'a> {
    /// Creates an injector over a catalog.
    pub fn new(catalog: &'a EventCatalog, eligibility: EventEligibility) -> Self {
        Self {
            catalog,
            eligibility,
        }
    }

    /// The catalog in use.
    pub fn catalog(&self) -> &'a EventCatalog {
        self.catalog
    }

    /// The eligibility policy in use.
    pub fn eligibility(&self) -> EventEligibility {
        self.eligibility
    }

    /// Draws the first occurrence of every catalog entry, counted from day 0.
    pub fn initial_schedule(&self, rng: &mut impl Rng) -> Result<EventSchedule, PrecipError> {
        let pending = self
            .catalog
            .events()
            .iter()
            .map(|spec| next_occurrence(spec, 0.0, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EventSchedule { pending })
    }

    /// Checks a wet day for due events.
    ///
    /// `elapsed_day` counts days since the start of the run (0-based),
    /// `spell_start` marks the first day of a wet spell and `event_in_spell`
    /// tells whether the current wet spell already hosted an event. On a day
    /// the policy does not admit, due events stay pending. Otherwise due
    /// events are rescheduled in place. Returns the injected event, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PrecipError::ScheduleMismatch`] if the schedule was built
    /// from a different catalog.
    pub fn check(
        &self,
        schedule: &mut EventSchedule,
        elapsed_day: u64,
        spell_start: bool,
        event_in_spell: bool,
        rng: &mut impl Rng,
    ) -> Result<Option<InjectedEvent>, PrecipError> {
        let events = self.catalog.events();
        if schedule.pending.len() != events.len() {
            return Err(PrecipError::ScheduleMismatch {
                expected: events.len(),
                got: schedule.pending.len(),
            });
        }
        if !self.eligibility.admits(spell_start, event_in_spell) {
            return Ok(None);
        }

        let today = elapsed_day as f64;
        let mut strongest: Option<(usize, f64)> = None;
        for (i, spec) in events.iter().enumerate() {
            let pending = schedule.pending[i];
            if pending.trigger_day >= today {
                continue;
            }
            if strongest.is_none_or(|(_, m)| pending.magnitude > m) {
                strongest = Some((i, pending.magnitude));
            }
            schedule.pending[i] = next_occurrence(spec, today, rng)?;
        }

        Ok(strongest.map(|(i, magnitude)| {
            let spec = classify(self.catalog, magnitude).unwrap_or(&events[i]);
            InjectedEvent {
                name: spec.name().to_string(),
                return_period_years: spec.return_period_years(),
                depth: magnitude,
            }
        }))
    }
}

fn next_occurrence(
    spec: &ExtremeEventSpec,
    from_day: f64,
    rng: &mut impl Rng,
) -> Result<PendingEvent, PrecipError> {
    let years: f64 = Poisson::new(spec.return_period_years() as f64)
        .map_err(|e| PrecipError::Schedule {
            name: spec.name().to_string(),
            reason: e.to_string(),
        })?
        .sample(rng);
    let magnitude = rng.random_range(spec.min_depth()..spec.max_depth());
    Ok(PendingEvent {
        trigger_day: from_day + years * DAYS_PER_YEAR,
        magnitude,
    })
}
