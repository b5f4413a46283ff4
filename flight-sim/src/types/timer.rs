use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use super::sim_error::SimError;

/// How often a sleeping timer thread re-checks its run flags.
const POLL_MILLIS: u64 = 100;

/// A repeating wall-clock timer driving one scheduler cadence, with support
/// for retuning the interval, pausing, and stopping.
///
/// The interval can change while the timer runs (visibility switches), and
/// the thread observes `stop` within the polling granularity even in the
/// middle of a long interval.
pub struct Timer {
    interval: RwLock<Duration>,
    running: AtomicBool, // Flag to indicate if the timer is running
    paused: AtomicBool,  // Flag to indicate if the timer is paused
}

impl Timer {
    /// Creates a new timer firing every `interval_ms` milliseconds.
    pub fn new(interval_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            interval: RwLock::new(Duration::from_millis(interval_ms)),
            running: AtomicBool::new(true),
            paused: AtomicBool::new(false),
        })
    }

    /// Changes the delay between ticks.
    pub fn set_interval(&self, interval_ms: u64) -> Result<(), SimError> {
        if interval_ms == 0 {
            return Err(SimError::InvalidInterval(
                "interval must be positive".to_string(),
            ));
        }

        let mut interval = self.interval.write().map_err(|_| {
            SimError::LockPoisoned("Failed to acquire write lock for interval.".to_string())
        })?;
        *interval = Duration::from_millis(interval_ms);
        Ok(())
    }

    /// Stops the timer; the thread exits after its current poll slice.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Pauses the timer indefinitely
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Resumes the timer
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Spawns the timer thread; `tick` fires once per interval with the
    /// current wall-clock time. The first tick fires immediately.
    pub fn start(
        self: Arc<Self>,
        name: &str,
        tick: impl Fn(DateTime<Utc>) + Send + 'static,
    ) -> Result<(), SimError> {
        thread::Builder::new()
            .name(format!("timer-{}", name))
            .spawn(move || {
                while self.running.load(Ordering::SeqCst) {
                    while self.paused.load(Ordering::SeqCst) && self.running.load(Ordering::SeqCst)
                    {
                        thread::sleep(Duration::from_millis(POLL_MILLIS));
                    }
                    if !self.running.load(Ordering::SeqCst) {
                        break;
                    }

                    tick(Utc::now());

                    // Sleep in small slices so stop and interval changes are
                    // noticed without waiting out a five-minute cadence.
                    let started = Instant::now();
                    while self.running.load(Ordering::SeqCst) {
                        let interval = self
                            .interval
                            .read()
                            .map(|i| *i)
                            .unwrap_or(Duration::from_millis(POLL_MILLIS));
                        let elapsed = started.elapsed();
                        if elapsed >= interval {
                            break;
                        }
                        thread::sleep((interval - elapsed).min(Duration::from_millis(POLL_MILLIS)));
                    }
                }
            })
            .map_err(|_| {
                SimError::TimerStartError("Failed to start the timer thread.".to_string())
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn rejects_zero_interval() {
        let timer = Timer::new(1000);
        assert!(timer.set_interval(0).is_err());
        assert!(timer.set_interval(10).is_ok());
    }

    #[test]
    fn fires_repeatedly_until_stopped() {
        let timer = Timer::new(10);
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&ticks);
        Arc::clone(&timer)
            .start("test", move |_now| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .expect("timer thread starts");

        thread::sleep(Duration::from_millis(300));
        timer.stop();
        let seen = ticks.load(Ordering::SeqCst);
        assert!(seen >= 2, "expected repeated ticks, got {}", seen);

        thread::sleep(Duration::from_millis(200));
        let after_stop = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(100));
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn paused_timer_does_not_tick() {
        let timer = Timer::new(10);
        let ticks = Arc::new(AtomicUsize::new(0));

        timer.pause();
        let counter = Arc::clone(&ticks);
        Arc::clone(&timer)
            .start("paused", move |_now| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .expect("timer thread starts");

        thread::sleep(Duration::from_millis(150));
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        timer.resume();
        thread::sleep(Duration::from_millis(150));
        timer.stop();
        assert!(ticks.load(Ordering::SeqCst) >= 1);
    }
}
