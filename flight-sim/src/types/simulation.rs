use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use logger::{Color, Logger};
use threadpool::ThreadPool;

use super::catalog::Catalog;
use super::config::SimConfig;
use super::flight::Flight;
use super::generator::FlightGenerator;
use super::map_bounds::MapBounds;
use super::scheduler::Scheduler;
use super::sim_error::SimError;
use super::timer::Timer;

/// The three refresh cadences the simulation runs on.
#[derive(Clone, Copy, Debug)]
enum Cadence {
    InView,
    OutOfView,
    Selected,
}

impl Cadence {
    fn name(self) -> &'static str {
        match self {
            Cadence::InView => "in-view",
            Cadence::OutOfView => "out-of-view",
            Cadence::Selected => "selected",
        }
    }
}

/// Manages the overall state of the flight simulation.
///
/// `Simulation` owns the scheduler behind a lock, the current viewport, the
/// three cadence timers, and the worker pool the tick bodies run on. The
/// cadences are deliberately independent; they may interleave, which is safe
/// because each one touches disjoint flights or recomputes idempotently.
pub struct Simulation {
    scheduler: Arc<RwLock<Scheduler>>,
    viewport: Arc<RwLock<Option<MapBounds>>>,
    config: SimConfig,
    in_view_timer: Arc<Timer>,
    out_of_view_timer: Arc<Timer>,
    selected_timer: Arc<Timer>,
    thread_pool: Arc<ThreadPool>,
    logger: Logger,
}

impl Simulation {
    /// Creates the simulation with a freshly generated pool.
    pub fn new(catalog: Arc<Catalog>, config: SimConfig, logger: Logger) -> Result<Self, SimError> {
        let generator = FlightGenerator::new(catalog, config.clone())?;
        let mut rng = rand::thread_rng();
        let scheduler = Scheduler::new(generator, &config, &mut rng, Utc::now());

        Ok(Simulation {
            scheduler: Arc::new(RwLock::new(scheduler)),
            viewport: Arc::new(RwLock::new(None)),
            in_view_timer: Timer::new(config.in_view_interval_ms),
            out_of_view_timer: Timer::new(config.out_of_view_interval_ms),
            selected_timer: Timer::new(config.selected_interval_ms),
            thread_pool: Arc::new(ThreadPool::new(config.workers)),
            config,
            logger,
        })
    }

    /// Starts the three cadence timers. Each tick body runs on the worker
    /// pool; a tick that cannot take its locks is skipped and retried on the
    /// next interval.
    pub fn start(&self) -> Result<(), SimError> {
        self.spawn_cadence(Cadence::InView, Arc::clone(&self.in_view_timer))?;
        self.spawn_cadence(Cadence::OutOfView, Arc::clone(&self.out_of_view_timer))?;
        self.spawn_cadence(Cadence::Selected, Arc::clone(&self.selected_timer))?;
        let _ = self.logger.info(
            &format!("simulation started with {} flights", self.config.pool_size),
            Color::Green,
            false,
        );
        Ok(())
    }

    fn spawn_cadence(&self, cadence: Cadence, timer: Arc<Timer>) -> Result<(), SimError> {
        let scheduler = Arc::clone(&self.scheduler);
        let viewport = Arc::clone(&self.viewport);
        let pool = Arc::clone(&self.thread_pool);
        let logger = self.logger.clone();

        timer.start(cadence.name(), move |now| {
            let scheduler = Arc::clone(&scheduler);
            let viewport = Arc::clone(&viewport);
            let logger = logger.clone();
            pool.execute(move || run_tick(cadence, &scheduler, &viewport, &logger, now));
        })
    }

    /// Feeds a viewport-changed notification from the map side. `None`
    /// means the view is not initialized yet.
    pub fn set_viewport(&self, bounds: Option<MapBounds>) -> Result<(), SimError> {
        let mut viewport = self.viewport.write().map_err(|_| {
            SimError::LockPoisoned("Failed to acquire write lock for viewport.".to_string())
        })?;
        *viewport = bounds;
        Ok(())
    }

    /// Switches all three cadences between foreground and background rates.
    pub fn set_background(&self, background: bool) -> Result<(), SimError> {
        let c = &self.config;
        let (in_view, out_of_view, selected) = if background {
            (
                c.in_view_background_interval_ms,
                c.out_of_view_background_interval_ms,
                c.selected_background_interval_ms,
            )
        } else {
            (
                c.in_view_interval_ms,
                c.out_of_view_interval_ms,
                c.selected_interval_ms,
            )
        };
        self.in_view_timer.set_interval(in_view)?;
        self.out_of_view_timer.set_interval(out_of_view)?;
        self.selected_timer.set_interval(selected)?;
        Ok(())
    }

    /// Marks a flight as selected so it gets the tightest refresh cadence
    /// and a position trail.
    pub fn select(&self, callsign: &str) -> Result<(), SimError> {
        self.write_scheduler()?.select(callsign)
    }

    pub fn deselect(&self) -> Result<(), SimError> {
        self.write_scheduler()?.deselect();
        Ok(())
    }

    pub fn selected(&self) -> Result<Option<String>, SimError> {
        Ok(self.read_scheduler()?.selected().map(str::to_string))
    }

    /// Current snapshot of the live pool.
    pub fn snapshot(&self) -> Result<Vec<Flight>, SimError> {
        Ok(self.read_scheduler()?.snapshot())
    }

    /// Snapshot of the selected flight's trail, oldest position first.
    pub fn trail(&self) -> Result<Vec<(f64, f64)>, SimError> {
        Ok(self.read_scheduler()?.trail())
    }

    pub fn pause(&self) {
        self.in_view_timer.pause();
        self.out_of_view_timer.pause();
        self.selected_timer.pause();
    }

    pub fn resume(&self) {
        self.in_view_timer.resume();
        self.out_of_view_timer.resume();
        self.selected_timer.resume();
    }

    /// Stops the timers and waits for in-flight tick bodies to finish.
    pub fn stop(&self) {
        self.in_view_timer.stop();
        self.out_of_view_timer.stop();
        self.selected_timer.stop();
        self.thread_pool.join();
        let _ = self.logger.info("simulation stopped", Color::Cyan, false);
    }

    fn read_scheduler(&self) -> Result<std::sync::RwLockReadGuard<'_, Scheduler>, SimError> {
        self.scheduler.read().map_err(|_| {
            SimError::LockPoisoned("Failed to acquire read lock for scheduler.".to_string())
        })
    }

    fn write_scheduler(&self) -> Result<std::sync::RwLockWriteGuard<'_, Scheduler>, SimError> {
        self.scheduler.write().map_err(|_| {
            SimError::LockPoisoned("Failed to acquire write lock for scheduler.".to_string())
        })
    }
}

/// One cadence body: read the viewport, take the scheduler, run the tick.
/// Contended locks are logged and skipped; the cadence retries next cycle.
fn run_tick(
    cadence: Cadence,
    scheduler: &Arc<RwLock<Scheduler>>,
    viewport: &Arc<RwLock<Option<MapBounds>>>,
    logger: &Logger,
    now: DateTime<Utc>,
) {
    let bounds = match viewport.try_read() {
        Ok(guard) => *guard,
        Err(_) => {
            let _ = logger.warn(
                &format!("{} tick skipped: viewport lock busy", cadence.name()),
                false,
            );
            return;
        }
    };

    let mut sched = match scheduler.try_write() {
        Ok(guard) => guard,
        Err(_) => {
            let _ = logger.warn(
                &format!("{} tick skipped: scheduler lock busy", cadence.name()),
                false,
            );
            return;
        }
    };

    let mut rng = rand::thread_rng();
    match cadence {
        Cadence::InView => sched.tick_in_view(&mut rng, now, bounds.as_ref()),
        Cadence::OutOfView => sched.tick_out_of_view(&mut rng, now, bounds.as_ref()),
        Cadence::Selected => sched.tick_selected(&mut rng, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_logger() -> Logger {
        let dir = std::env::temp_dir().join("flight_sim_simulation_test");
        Logger::new(&dir, "simulation-test").expect("logger in temp dir")
    }

    fn simulation() -> Simulation {
        Simulation::new(
            Arc::new(Catalog::builtin()),
            SimConfig::default(),
            test_logger(),
        )
        .expect("builtin catalog is populated")
    }

    #[test]
    fn snapshot_exposes_the_full_pool() {
        let sim = simulation();
        let pool = sim.snapshot().expect("snapshot");
        assert_eq!(pool.len(), 20);
    }

    #[test]
    fn select_and_deselect_round_trip() {
        let sim = simulation();
        let callsign = sim.snapshot().expect("snapshot")[0].callsign.clone();

        sim.select(&callsign).expect("flight exists");
        assert_eq!(sim.selected().expect("selected"), Some(callsign));
        assert!(sim.trail().expect("trail").is_empty());

        sim.deselect().expect("deselect");
        assert_eq!(sim.selected().expect("selected"), None);
    }

    #[test]
    fn viewport_round_trip() {
        let sim = simulation();
        let bounds = MapBounds::new(30.0, 50.0, 20.0, 40.0);
        sim.set_viewport(Some(bounds)).expect("set viewport");
        sim.set_viewport(None).expect("clear viewport");
    }

    #[test]
    fn background_retunes_without_error() {
        let sim = simulation();
        sim.set_background(true).expect("background rates");
        sim.set_background(false).expect("foreground rates");
    }
}
