use chrono::{DateTime, Utc};
use rand::Rng;

use super::config::SimConfig;
use super::flight::Flight;
use super::generator::FlightGenerator;
use super::map_bounds::MapBounds;
use super::sim_error::SimError;
use super::trail::Trail;

/// Owns the live flight pool, the current selection, and its trail.
///
/// The scheduler is timer-agnostic: each cadence is an explicit `tick_*`
/// method taking the current instant and viewport, so any timer or event
/// loop can drive it. Every tick swaps in a freshly built pool rather than
/// mutating flights in place, so a reader holding the previous snapshot
/// never sees a half-updated pool.
pub struct Scheduler {
    pool: Vec<Flight>,
    selected: Option<String>,
    trail: Trail,
    generator: FlightGenerator,
}

impl Scheduler {
    /// Fills the pool with freshly generated flights, most of them already
    /// underway.
    pub fn new(
        generator: FlightGenerator,
        config: &SimConfig,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
    ) -> Self {
        let pool = (0..config.pool_size)
            .map(|_| generator.generate(rng, now))
            .collect();
        Scheduler {
            pool,
            selected: None,
            trail: Trail::new(config.trail_capacity),
            generator,
        }
    }

    /// Fast cadence: refreshes flights currently inside the viewport.
    /// Without a viewport nothing is in view yet, so the tick is a no-op and
    /// retried next interval.
    pub fn tick_in_view(
        &mut self,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
        bounds: Option<&MapBounds>,
    ) {
        let Some(bounds) = bounds else { return };
        let bounds = *bounds;
        self.refresh(rng, now, |f| bounds.contains(f.latitude, f.longitude));
    }

    /// Slow cadence: refreshes flights currently outside the viewport. A
    /// missing viewport means nothing is in view, so every non-selected
    /// flight is due.
    pub fn tick_out_of_view(
        &mut self,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
        bounds: Option<&MapBounds>,
    ) {
        let bounds = bounds.copied();
        self.refresh(rng, now, |f| {
            !bounds.is_some_and(|b| b.contains(f.latitude, f.longitude))
        });
    }

    /// Tightest cadence: refreshes only the selected flight and extends its
    /// trail, regardless of viewport. When the selected flight completes it
    /// is replaced like any other and the selection clears.
    pub fn tick_selected(&mut self, rng: &mut impl Rng, now: DateTime<Utc>) {
        let Some(callsign) = self.selected.clone() else {
            return;
        };

        let mut next = Vec::with_capacity(self.pool.len());
        let mut landed = false;
        for flight in &self.pool {
            if flight.callsign != callsign {
                next.push(flight.clone());
                continue;
            }
            let updated = flight.state_at(now);
            self.trail.push(updated.latitude, updated.longitude);
            if updated.is_completed() {
                next.push(self.generator.generate(rng, now));
                landed = true;
            } else {
                next.push(updated);
            }
        }
        self.pool = next;

        if landed {
            self.selected = None;
            self.trail.clear();
        }
    }

    /// Builds the replacement pool for one viewport cadence: flights the
    /// predicate marks due are recomputed, flights already terminal are
    /// recycled into fresh ones, everything else is carried over untouched.
    /// The selected flight is always left to its own cadence.
    fn refresh(&mut self, rng: &mut impl Rng, now: DateTime<Utc>, due: impl Fn(&Flight) -> bool) {
        let mut next = Vec::with_capacity(self.pool.len());
        for flight in &self.pool {
            let is_selected = self.selected.as_deref() == Some(flight.callsign.as_str());
            if is_selected {
                next.push(flight.clone());
                continue;
            }
            if flight.is_completed() {
                next.push(self.generator.generate(rng, now));
                continue;
            }
            if !due(flight) {
                next.push(flight.clone());
                continue;
            }
            let updated = flight.state_at(now);
            next.push(if updated.is_completed() {
                self.generator.generate(rng, now)
            } else {
                updated
            });
        }
        self.pool = next;
    }

    /// Selects a flight by callsign, resetting the trail.
    pub fn select(&mut self, callsign: &str) -> Result<(), SimError> {
        if !self.pool.iter().any(|f| f.callsign == callsign) {
            return Err(SimError::UnknownFlight(callsign.to_string()));
        }
        self.selected = Some(callsign.to_string());
        self.trail.clear();
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.trail.clear();
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn flights(&self) -> &[Flight] {
        &self.pool
    }

    /// Owned copy of the pool for consumers on other threads.
    pub fn snapshot(&self) -> Vec<Flight> {
        self.pool.clone()
    }

    /// Snapshot of the selected flight's trail, oldest position first.
    pub fn trail(&self) -> Vec<(f64, f64)> {
        self.trail.to_vec()
    }
}
