use chrono::{DateTime, Utc};

use super::airport::Airport;
use super::flight_phase::{FlightPhase, CLIMB_END, DESCENT_START};
use super::geo;

/// Destination of a flight. Usually a cataloged airport, but short
/// rotary-wing hops may end at a synthesized point with no IATA code.
#[derive(Clone, Debug, PartialEq)]
pub struct Destination {
    pub iata_code: Option<String>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Destination {
    pub fn from_airport(airport: &Airport) -> Self {
        Destination {
            iata_code: Some(airport.iata_code.clone()),
            name: airport.name.clone(),
            latitude: airport.latitude,
            longitude: airport.longitude,
        }
    }
}

/// Represents a flight in the simulator: the journey data fixed at creation
/// and the position fields derived from it for a given instant.
///
/// The journey data never mutates. Derived fields are refreshed by taking a
/// new value from [`Flight::state_at`]; a flight whose progress has reached
/// 1 is terminal and gets replaced, never advanced further.
#[derive(Clone, Debug, PartialEq)]
pub struct Flight {
    pub callsign: String,
    pub origin: Airport,
    pub destination: Destination,
    /// Great-circle samples from origin to destination, always >= 2 points.
    pub route: Vec<(f64, f64)>,
    pub depart_time: DateTime<Utc>,
    pub duration_min: i64,
    pub cruise_altitude_ft: i32,
    pub cruise_speed_kts: i32,
    pub departure_altitude_ft: i32,
    /// Random phase offset feeding the cruise-speed wind perturbation.
    pub wind_phase: f64,
    pub aircraft_model: String,
    pub rotary_wing: bool,

    // Derived fields, recomputed from the journey data and a timestamp.
    pub latitude: f64,
    pub longitude: f64,
    pub progress: f64,
    pub track: f64,
    pub altitude_ft: i32,
    pub ground_speed_kts: i32,
}

impl Flight {
    /// Fraction of the journey completed at `now`, clamped to `[0, 1]`.
    pub fn progress_at(&self, now: DateTime<Utc>) -> f64 {
        let total_ms = self.duration_min * 60_000;
        if total_ms <= 0 {
            return 1.0;
        }
        let elapsed = (now - self.depart_time).num_milliseconds().clamp(0, total_ms);
        elapsed as f64 / total_ms as f64
    }

    pub fn phase_at(&self, now: DateTime<Utc>) -> FlightPhase {
        FlightPhase::from_progress(self.progress_at(now))
    }

    /// Whether the stored progress marks this flight terminal.
    pub fn is_completed(&self) -> bool {
        self.progress >= 1.0
    }

    /// Derives position, heading, altitude, and ground speed for `now`,
    /// returning a new value with all journey data unchanged.
    ///
    /// Pure: identical `(self, now)` inputs yield identical output.
    pub fn state_at(&self, now: DateTime<Utc>) -> Flight {
        debug_assert!(
            self.route.len() >= 2,
            "route must hold at least two waypoints"
        );
        let progress = self.progress_at(now);

        let last = self.route.len() - 1;
        let exact = progress * last as f64;
        let segment = (exact.floor() as usize).min(last);
        let seg_t = exact - segment as f64;
        let a = self.route[segment];
        let b = self.route[(segment + 1).min(last)];
        let latitude = a.0 + (b.0 - a.0) * seg_t;
        let longitude = a.1 + (b.1 - a.1) * seg_t;

        // Consecutive duplicate waypoints carry no direction, fall back to
        // the overall origin-to-destination bearing.
        let track = if a == b {
            geo::initial_bearing_degrees(
                self.origin.latitude,
                self.origin.longitude,
                self.destination.latitude,
                self.destination.longitude,
            )
        } else {
            geo::initial_bearing_degrees(a.0, a.1, b.0, b.1)
        };

        let (altitude_ft, ground_speed_kts) = self.altitude_and_speed(progress, now);

        Flight {
            latitude,
            longitude,
            progress,
            track,
            altitude_ft,
            ground_speed_kts,
            ..self.clone()
        }
    }

    /// Three-phase altitude and speed model: eased climb to cruise, cruise
    /// with a sinusoidal wind perturbation, eased descent to the ground.
    fn altitude_and_speed(&self, progress: f64, now: DateTime<Utc>) -> (i32, i32) {
        let cruise_alt = self.cruise_altitude_ft as f64;
        let cruise_gs = self.cruise_speed_kts as f64;

        match FlightPhase::from_progress(progress) {
            FlightPhase::Climb => {
                let p = progress / CLIMB_END;
                let ease = 1.0 - (1.0 - p).powi(2);
                let depart_alt = self.departure_altitude_ft as f64;
                let depart_gs = (cruise_gs * 0.5).max(60.0);
                (
                    (depart_alt + (cruise_alt - depart_alt) * ease).round() as i32,
                    (depart_gs + (cruise_gs - depart_gs) * ease).round() as i32,
                )
            }
            FlightPhase::Cruise => {
                let wind = (now.timestamp_millis() as f64 / 10_000.0 + self.wind_phase).sin() * 5.0;
                (cruise_alt.round() as i32, (cruise_gs + wind).round() as i32)
            }
            FlightPhase::Descent => {
                let p = (progress - DESCENT_START) / (1.0 - DESCENT_START);
                let ease = p * p;
                let arrival_gs = (cruise_gs * 0.35).max(60.0);
                (
                    (cruise_alt * (1.0 - ease)).round() as i32,
                    (cruise_gs * (1.0 - ease) + arrival_gs * ease).round() as i32,
                )
            }
        }
    }
}
