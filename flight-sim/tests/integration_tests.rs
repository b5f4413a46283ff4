use std::sync::Arc;

use chrono::{Duration, Utc};
use logger::Logger;
use rand::rngs::StdRng;
use rand::SeedableRng;

use simulator::types::catalog::Catalog;
use simulator::types::config::SimConfig;
use simulator::types::flight_phase::FlightPhase;
use simulator::types::generator::FlightGenerator;
use simulator::types::map_bounds::MapBounds;
use simulator::types::scheduler::Scheduler;
use simulator::types::simulation::Simulation;

fn generator(config: &SimConfig) -> FlightGenerator {
    FlightGenerator::new(Arc::new(Catalog::builtin()), config.clone())
        .expect("builtin catalog is populated")
}

fn test_logger(name: &str) -> Logger {
    let dir = std::env::temp_dir().join("flight_sim_integration");
    Logger::new(&dir, name).expect("logger in temp dir")
}

#[test]
fn a_generated_flight_lives_through_all_three_phases() {
    let config = SimConfig::default();
    let generator = generator(&config);
    let mut rng = StdRng::seed_from_u64(100);

    let now = Utc::now();
    let flight = generator.generate(&mut rng, now);

    let depart = flight.depart_time;
    let total = Duration::minutes(flight.duration_min);

    let climbing = flight.state_at(depart + total / 50);
    assert_eq!(FlightPhase::from_progress(climbing.progress), FlightPhase::Climb);
    assert!(climbing.altitude_ft <= flight.cruise_altitude_ft);

    let cruising = flight.state_at(depart + total / 2);
    assert_eq!(FlightPhase::from_progress(cruising.progress), FlightPhase::Cruise);
    assert_eq!(cruising.altitude_ft, flight.cruise_altitude_ft);

    let arriving = flight.state_at(depart + total);
    assert!(arriving.is_completed());
    assert_eq!(arriving.altitude_ft, 0);
    assert!((arriving.latitude - flight.destination.latitude).abs() < 1e-6);
    assert!((arriving.longitude - flight.destination.longitude).abs() < 1e-6);
}

#[test]
fn the_pool_never_shrinks_as_flights_land() {
    let config = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(101);
    let now = Utc::now();
    let mut sched = Scheduler::new(generator(&config), &config, &mut rng, now);

    // Tick far enough into the future that every flight of the previous
    // pool has landed, several generations in a row.
    for day in 1..=5 {
        sched.tick_out_of_view(&mut rng, now + Duration::days(day), None);
        assert_eq!(sched.flights().len(), config.pool_size);
        assert!(sched.flights().iter().all(|f| !f.is_completed()));
    }
}

#[test]
fn viewport_culling_splits_the_pool_between_cadences() {
    let config = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(102);
    let now = Utc::now();
    let mut sched = Scheduler::new(generator(&config), &config, &mut rng, now);

    // Western hemisphere only; the catalog guarantees flights on both sides.
    let bounds = MapBounds::new(-90.0, 90.0, -180.0, 0.0);
    let before = sched.snapshot();

    sched.tick_in_view(&mut rng, now + Duration::minutes(3), Some(&bounds));

    for (old, new) in before.iter().zip(sched.flights()) {
        if old.callsign != new.callsign {
            continue; // replaced, was terminal
        }
        if bounds.contains(old.latitude, old.longitude) {
            assert!(new.progress >= old.progress);
        } else {
            assert_eq!(old, new, "{} was out of view and should be untouched", old.callsign);
        }
    }
}

#[test]
fn selecting_tracks_a_flight_and_records_its_trail() {
    let config = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(103);
    let now = Utc::now();
    let mut sched = Scheduler::new(generator(&config), &config, &mut rng, now);

    let callsign = sched.flights()[7].callsign.clone();
    sched.select(&callsign).expect("callsign exists");

    for step in 1..=60 {
        sched.tick_selected(&mut rng, now + Duration::seconds(step * 5));
    }

    let trail = sched.trail();
    if sched.selected().is_some() {
        assert!(!trail.is_empty());
        assert!(trail.len() <= config.trail_capacity);
    } else {
        // The tracked flight landed along the way; selection and trail reset.
        assert!(trail.is_empty());
    }
}

#[test]
fn simulation_drives_the_scheduler_end_to_end() {
    let sim = Simulation::new(
        Arc::new(Catalog::builtin()),
        SimConfig::default(),
        test_logger("end-to-end"),
    )
    .expect("builtin catalog is populated");

    sim.start().expect("cadence timers start");
    sim.set_viewport(Some(MapBounds::new(30.0, 60.0, -10.0, 40.0)))
        .expect("set viewport");
    sim.set_background(true).expect("background rates");
    sim.set_background(false).expect("foreground rates");

    let pool = sim.snapshot().expect("snapshot");
    assert_eq!(pool.len(), 20);

    let callsign = pool[0].callsign.clone();
    sim.select(&callsign).expect("flight exists");
    assert_eq!(sim.selected().expect("selected"), Some(callsign));
    assert!(sim.select("ZZ999").is_err());

    sim.deselect().expect("deselect");
    sim.stop();
}
