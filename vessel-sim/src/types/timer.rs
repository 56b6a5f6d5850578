use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, RwLock,
    },
    thread,
    time::{Duration, Instant},
};

use super::sim_error::SimError;

/// A periodic timer driving the simulation, with support for pausing,
/// resuming and changing the tick interval at runtime.
///
/// The callback runs on a single dedicated thread, so successive tick
/// invocations can never overlap.
pub struct Timer {
    pub interval_ms: RwLock<u64>,
    pub running: AtomicBool, // Flag to indicate if the timer is running
    pub paused: AtomicBool,  // Flag to indicate if the timer is paused
}

impl Timer {
    /// Creates a new timer with the given tick interval in milliseconds.
    pub fn new(interval_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            interval_ms: RwLock::new(interval_ms),
            running: AtomicBool::new(true),
            paused: AtomicBool::new(false),
        })
    }

    /// Changes the tick interval. Values outside 1..=60000 ms are rejected.
    pub fn set_interval(&self, new_interval_ms: u64) -> Result<(), SimError> {
        if new_interval_ms == 0 || new_interval_ms > 60_000 {
            return Err(SimError::InvalidInterval(new_interval_ms.to_string()));
        }

        let mut interval_lock = self.interval_ms.write().map_err(|_| {
            SimError::TimerLockError("Failed to acquire write lock for interval_ms.".to_string())
        })?;
        *interval_lock = new_interval_ms;
        Ok(())
    }

    /// Stops the timer.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Pauses the timer indefinitely.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Resumes the timer.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Starts the timer and executes the callback function on each tick.
    pub fn start(
        self: Arc<Self>,
        tick_callback: impl Fn(usize) + Send + 'static,
    ) -> Result<(), SimError> {
        thread::Builder::new()
            .name("timer-thread".to_string())
            .spawn(move || {
                let mut tick_count = 0;
                while self.running.load(Ordering::SeqCst) {
                    // Check if the timer is paused; a stop request must
                    // still terminate the thread while it waits here.
                    while self.paused.load(Ordering::SeqCst) {
                        if !self.running.load(Ordering::SeqCst) {
                            return;
                        }
                        thread::sleep(Duration::from_millis(100)); // Polling interval during pause
                    }

                    let now = Instant::now();

                    let interval = match self.interval_ms.read() {
                        Ok(interval) => *interval,
                        Err(_) => {
                            eprintln!("Failed to acquire read lock on interval_ms. Skipping tick.");
                            continue;
                        }
                    };

                    tick_count += 1;

                    tick_callback(tick_count);

                    let elapsed = now.elapsed();
                    let sleep_duration = Duration::from_millis(interval).saturating_sub(elapsed);
                    thread::sleep(sleep_duration);
                }
            })
            .map_err(|_| {
                SimError::TimerStartError("Failed to start the timer thread.".to_string())
            })?;

        Ok(())
    }
}
