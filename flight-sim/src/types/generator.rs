use std::f64::consts::TAU;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::aircraft::AircraftType;
use super::airport::Airport;
use super::catalog::{Catalog, Country};
use super::config::SimConfig;
use super::flight::{Destination, Flight};
use super::geo;
use super::sim_error::SimError;

/// Catalog entries that can be drawn with probability proportional to a
/// relative weight.
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for Airport {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl Weighted for Country {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl Weighted for AircraftType {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl<T: Weighted> Weighted for &T {
    fn weight(&self) -> f64 {
        (*self).weight()
    }
}

/// Picks one entry with probability proportional to its weight. Non-positive
/// weights are treated as negligible rather than an error; the weights need
/// not sum to anything in particular. Returns `None` only for an empty slice.
pub fn pick_weighted<'a, T: Weighted>(rng: &mut impl Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let total: f64 = items.iter().map(|it| it.weight().max(0.0)).sum();
    if total <= 0.0 {
        return items.last();
    }

    let mut r = rng.gen::<f64>() * total;
    for it in items {
        r -= it.weight().max(0.0);
        if r <= 0.0 {
            return Some(it);
        }
    }
    items.last()
}

/// Random callsign: two uppercase letters and a number in `[100, 899]`.
pub fn random_callsign(rng: &mut impl Rng) -> String {
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let a = LETTERS[rng.gen_range(0..LETTERS.len())] as char;
    let b = LETTERS[rng.gen_range(0..LETTERS.len())] as char;
    format!("{}{}{}", a, b, rng.gen_range(100..900))
}

/// Synthesizes flights from the injected catalog: weighted origin country
/// and airport, weighted aircraft, a destination suited to the aircraft's
/// range, and a schedule that may already be underway.
pub struct FlightGenerator {
    catalog: Arc<Catalog>,
    config: SimConfig,
}

impl FlightGenerator {
    /// The catalog must carry at least one airport, country, and aircraft
    /// type; generation is infallible afterwards.
    pub fn new(catalog: Arc<Catalog>, config: SimConfig) -> Result<Self, SimError> {
        if catalog.airports.is_empty() {
            return Err(SimError::EmptyCatalog("airports".to_string()));
        }
        if catalog.countries.is_empty() {
            return Err(SimError::EmptyCatalog("countries".to_string()));
        }
        if catalog.aircraft.is_empty() {
            return Err(SimError::EmptyCatalog("aircraft".to_string()));
        }
        Ok(FlightGenerator { catalog, config })
    }

    /// Generates a flight whose departure lies uniformly within
    /// `[now - duration, now]`, so fresh flights join mid-journey instead of
    /// all lifting off at once.
    pub fn generate(&self, rng: &mut impl Rng, now: DateTime<Utc>) -> Flight {
        let origin = self.pick_origin(rng).clone();
        let aircraft = pick_weighted(rng, &self.catalog.aircraft)
            .unwrap_or(&self.catalog.aircraft[0])
            .clone();

        let destination = if aircraft.rotary_wing {
            self.pick_rotary_destination(rng, &origin)
        } else {
            self.pick_fixed_wing_destination(rng, &origin)
        };

        let distance_km = geo::haversine_distance_km(
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
        );
        let nominal_speed = aircraft.cruise_speed_kts.max(1) as f64;
        let duration_min = ((distance_km / nominal_speed * 60.0).round() as i64)
            .max(self.config.min_duration_min);
        let depart_time = now - Duration::milliseconds(rng.gen_range(0..=duration_min * 60_000));

        let cruise_speed_kts =
            (((aircraft.cruise_speed_kts as f64) + (rng.gen::<f64>() - 0.5) * 40.0).round() as i32)
                .max(80);
        let route = geo::great_circle_path(
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
            self.config.route_segments,
        );

        let flight = Flight {
            callsign: random_callsign(rng),
            latitude: origin.latitude,
            longitude: origin.longitude,
            origin,
            destination,
            route,
            depart_time,
            duration_min,
            cruise_altitude_ft: aircraft.cruise_altitude_ft,
            cruise_speed_kts,
            departure_altitude_ft: aircraft.departure_altitude_ft(),
            wind_phase: rng.gen::<f64>() * TAU,
            aircraft_model: aircraft.model.clone(),
            rotary_wing: aircraft.rotary_wing,
            progress: 0.0,
            track: 0.0,
            altitude_ft: 0,
            ground_speed_kts: 0,
        };

        // Fill the derived fields for the moment of creation.
        flight.state_at(now)
    }

    /// Weighted country first, then a weighted airport within it; countries
    /// without a cataloged airport fall back to the whole catalog.
    fn pick_origin(&self, rng: &mut impl Rng) -> &Airport {
        if let Some(country) = pick_weighted(rng, &self.catalog.countries) {
            let local = self.catalog.airports_in(&country.code);
            if let Some(&airport) = pick_weighted(rng, &local) {
                return airport;
            }
        }
        pick_weighted(rng, &self.catalog.airports).unwrap_or(&self.catalog.airports[0])
    }

    /// Helicopters prefer an airport within range of the origin; with no
    /// candidate in range they hop to a nearby synthesized point instead.
    fn pick_rotary_destination(&self, rng: &mut impl Rng, origin: &Airport) -> Destination {
        let nearby: Vec<&Airport> = self
            .catalog
            .airports
            .iter()
            .filter(|a| {
                a.iata_code != origin.iata_code
                    && geo::haversine_distance_km(
                        origin.latitude,
                        origin.longitude,
                        a.latitude,
                        a.longitude,
                    ) <= self.config.rotary_range_km
            })
            .collect();

        match pick_weighted(rng, &nearby) {
            Some(&airport) => Destination::from_airport(airport),
            None => Destination {
                iata_code: None,
                name: format!("near {}", origin.name),
                latitude: origin.latitude + (rng.gen::<f64>() - 0.5) * 1.2,
                longitude: origin.longitude + (rng.gen::<f64>() - 0.5) * 1.2,
            },
        }
    }

    /// Weighted pick over all airports, redrawing a bounded number of times
    /// when the draw collides with the origin. A collision after the retry
    /// budget is accepted rather than looping forever.
    fn pick_fixed_wing_destination(&self, rng: &mut impl Rng, origin: &Airport) -> Destination {
        let airports = &self.catalog.airports;
        let mut to = pick_weighted(rng, airports).unwrap_or(&airports[0]);
        let mut tries = 0;
        while to.iata_code == origin.iata_code && tries < self.config.destination_retries {
            to = pick_weighted(rng, airports).unwrap_or(&airports[0]);
            tries += 1;
        }
        Destination::from_airport(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Weight(f64);

    impl Weighted for Weight {
        fn weight(&self) -> f64 {
            self.0
        }
    }

    fn generator() -> FlightGenerator {
        FlightGenerator::new(Arc::new(Catalog::builtin()), SimConfig::default())
            .expect("builtin catalog is populated")
    }

    #[test]
    fn pick_weighted_empty_slice_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: Vec<Weight> = Vec::new();
        assert!(pick_weighted(&mut rng, &items).is_none());
    }

    #[test]
    fn pick_weighted_skips_non_positive_weights() {
        let mut rng = StdRng::seed_from_u64(2);
        let items = vec![Weight(0.0), Weight(-3.0), Weight(5.0)];
        for _ in 0..200 {
            let picked = pick_weighted(&mut rng, &items).expect("non-empty slice");
            assert_eq!(picked.0, 5.0);
        }
    }

    #[test]
    fn pick_weighted_all_zero_does_not_crash() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = vec![Weight(0.0), Weight(0.0)];
        assert!(pick_weighted(&mut rng, &items).is_some());
    }

    #[test]
    fn callsign_format() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let callsign = random_callsign(&mut rng);
            assert_eq!(callsign.len(), 5);
            let (letters, digits) = callsign.split_at(2);
            assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
            let number: u32 = digits.parse().expect("numeric suffix");
            assert!((100..900).contains(&number));
        }
    }

    #[test]
    fn generated_flights_are_sane() {
        let generator = generator();
        let mut rng = StdRng::seed_from_u64(5);
        let now = Utc::now();
        for _ in 0..50 {
            let flight = generator.generate(&mut rng, now);
            assert!(flight.route.len() >= 2);
            assert!(flight.duration_min >= 5);
            assert!((0.0..=1.0).contains(&flight.progress));
            assert!(flight.depart_time <= now);
            assert!(flight.cruise_speed_kts >= 80);
        }
    }

    #[test]
    fn rotary_destination_stays_in_range() {
        let generator = generator();
        let mut rng = StdRng::seed_from_u64(6);
        let now = Utc::now();
        let mut seen_rotary = false;
        for _ in 0..400 {
            let flight = generator.generate(&mut rng, now);
            if !flight.rotary_wing {
                continue;
            }
            seen_rotary = true;
            match &flight.destination.iata_code {
                Some(_) => {
                    let km = geo::haversine_distance_km(
                        flight.origin.latitude,
                        flight.origin.longitude,
                        flight.destination.latitude,
                        flight.destination.longitude,
                    );
                    assert!(km <= 400.0, "rotary hop of {} km", km);
                }
                None => {
                    // Synthetic point: at most ~0.6 degrees off per axis.
                    assert!((flight.destination.latitude - flight.origin.latitude).abs() <= 0.85);
                    assert!((flight.destination.longitude - flight.origin.longitude).abs() <= 0.85);
                }
            }
        }
        assert!(seen_rotary, "no rotary-wing flight in 400 draws");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let catalog = Catalog::new(Vec::new(), Vec::new(), Vec::new());
        let result = FlightGenerator::new(Arc::new(catalog), SimConfig::default());
        assert!(result.is_err());
    }
}
