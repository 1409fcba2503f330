//! Clock abstraction used by the timed keep-awake wait.
//!
//! The controller never reads the wall clock directly; it goes through the
//! [`Clock`] trait so tests can drive a timed wait without real delays.

use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Source of time and blocking sleeps
pub trait Clock: Debug + Send + Sync {
    /// Returns the current instant
    fn now(&self) -> Instant;

    /// Blocks the calling thread for at least `duration`
    fn sleep(&self, duration: Duration);
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Clock backed by the real wall clock and a yielding thread sleep
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Manual clock for testing timed waits without real wall-clock delays
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use super::Clock;

    /// Clock whose notion of "now" only advances when `sleep` is called.
    ///
    /// Every requested sleep duration is recorded, so tests can assert both
    /// that a wait happened and how long it was asked to be.
    #[derive(Debug)]
    pub struct ManualClock {
        origin: Instant,
        elapsed: Mutex<Duration>,
        sleeps: Mutex<Vec<Duration>>,
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                origin: Instant::now(),
                elapsed: Mutex::new(Duration::ZERO),
                sleeps: Mutex::new(Vec::new()),
            }
        }

        /// Returns every sleep duration requested so far, in order
        pub fn recorded_sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }

        /// Returns the total virtual time slept
        pub fn total_slept(&self) -> Duration {
            *self.elapsed.lock().unwrap()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.origin + *self.elapsed.lock().unwrap()
        }

        fn sleep(&self, duration: Duration) {
            *self.elapsed.lock().unwrap() += duration;
            self.sleeps.lock().unwrap().push(duration);
        }
    }
}
