//! # Keep-Awake Module
//!
//! The awake module translates a high-level keep-awake intent into the
//! low-level execution-state request the OS understands, issues that request,
//! and reports plain success or failure. Optionally it blocks the calling
//! thread for a fixed wall-clock duration before handing control back so the
//! caller can issue a follow-up state change.
//!
//! ## Implementation Details
//!
//! The module uses:
//! - **Execution-state flags**: A bitwise-OR set of independent capabilities
//!   (system required, display required, continuous) sent to the OS in one
//!   request
//! - **A pluggable backend**: The one state-changing OS call lives behind
//!   [`PowerStateBackend`]; production binds the native API, tests bind fakes
//! - **A pluggable clock**: The timed wait re-checks an injected clock
//!   against the request's start instant, so tests run without real delays
//!
//! Awake state is OS-global and lives in the kernel's power-state table, not
//! in this process. Every call is fire-and-forget, last caller wins, and no
//! local "currently awake" mirror is kept.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stay_awake::awake::AwakenessController;
//!
//! let controller = AwakenessController::new();
//!
//! // Prevent sleep and keep the display on for two minutes, then let the
//! // caller decide what comes next.
//! if controller.set_timed_keep_awake(120, true) {
//!     controller.set_normal_keep_awake();
//! }
//! ```
//!
//! ## Failure Model
//!
//! Exactly one failure mode exists: the OS rejected or could not process the
//! request. Permission problems, missing platform capability, and rejected
//! calls all collapse to a `false` return; nothing panics and no error type
//! crosses the public API.

use std::time::Duration;

use tracing::{debug, warn};

use crate::backend::{NativeBackend, PowerStateBackend};
use crate::clock::{Clock, SystemClock};

mod types;

pub use types::{ExecutionState, KeepAwakeMode};

#[cfg(test)]
mod tests;

/// Translates keep-awake intents into OS power-state requests
///
/// The controller holds no mutable state of its own; it owns a backend for
/// the one OS call and a clock for the timed wait. Creating one is cheap and
/// establishes no connection to any system service.
pub struct AwakenessController {
    backend: Box<dyn PowerStateBackend>,
    clock: Box<dyn Clock>,
}

impl Default for AwakenessController {
    fn default() -> Self {
        Self {
            backend: Box::new(NativeBackend::new()),
            clock: Box::new(SystemClock),
        }
    }
}

impl AwakenessController {
    /// Creates a controller bound to the native OS backend and the system
    /// clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller with an injected backend and clock
    ///
    /// This is the seam tests use; production code normally goes through
    /// [`AwakenessController::new`].
    pub fn with_backend(backend: Box<dyn PowerStateBackend>, clock: Box<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Clears the sleep-prevention requirements while keeping the continuous
    /// state applied, letting the machine manage its own sleep again.
    ///
    /// Returns `true` iff the OS accepted the request.
    pub fn set_normal_keep_awake(&self) -> bool {
        self.apply_power_state(KeepAwakeMode::Normal.flags())
    }

    /// Requests indefinite prevention of system sleep, optionally keeping the
    /// display on, until explicitly changed.
    ///
    /// Returns `true` iff the OS accepted the request.
    pub fn set_indefinite_keep_awake(&self, keep_display_on: bool) -> bool {
        self.apply_power_state(KeepAwakeMode::Indefinite { keep_display_on }.flags())
    }

    /// Requests prevention of system sleep as in
    /// [`AwakenessController::set_indefinite_keep_awake`], then blocks the
    /// calling thread for `seconds` wall-clock seconds.
    ///
    /// The wait is measured from just after the request succeeds. On failure
    /// this returns `false` immediately without blocking. Nothing resets the
    /// power state when the wait expires; the caller issues the follow-up
    /// state change (typically [`AwakenessController::set_normal_keep_awake`]).
    ///
    /// The calling thread is fully occupied for the duration. There is no
    /// cancellation hook; the only way to stop the wait early is to terminate
    /// the calling thread or process.
    pub fn set_timed_keep_awake(&self, seconds: u64, keep_display_on: bool) -> bool {
        if !self.set_indefinite_keep_awake(keep_display_on) {
            return false;
        }
        self.block_for(Duration::from_secs(seconds));
        true
    }

    /// Applies the given keep-awake mode, dispatching to the matching
    /// operation.
    pub fn set_keep_awake(&self, mode: KeepAwakeMode) -> bool {
        match mode {
            KeepAwakeMode::Normal => self.set_normal_keep_awake(),
            KeepAwakeMode::Indefinite { keep_display_on } => {
                self.set_indefinite_keep_awake(keep_display_on)
            },
            KeepAwakeMode::Timed { seconds, keep_display_on } => {
                self.set_timed_keep_awake(seconds, keep_display_on)
            },
        }
    }

    /// Issues the one state-changing call to the OS.
    ///
    /// A zero/empty previous state from the OS means the request was
    /// rejected; any error from the backend means the call never reached the
    /// OS. Both collapse to `false` and neither crosses the public API.
    fn apply_power_state(&self, flags: ExecutionState) -> bool {
        match self.backend.request(flags) {
            Ok(previous) => {
                debug!(requested = ?flags, previous = ?previous, "state setting result");
                if previous.is_empty() {
                    warn!(requested = ?flags, "OS rejected the power-state request");
                    false
                } else {
                    true
                }
            },
            Err(e) => {
                warn!(requested = ?flags, error = %e, "power-state request could not be made");
                false
            },
        }
    }

    /// Blocks until at least `duration` of wall-clock time has passed from
    /// the moment of the call.
    ///
    /// The loop re-checks the clock against the start instant after every
    /// sleep, so an early wakeup just puts the thread back to sleep for the
    /// remainder.
    fn block_for(&self, duration: Duration) {
        let start = self.clock.now();
        loop {
            let elapsed = self.clock.now().saturating_duration_since(start);
            let Some(remaining) = duration.checked_sub(elapsed) else {
                return;
            };
            if remaining.is_zero() {
                return;
            }
            self.clock.sleep(remaining);
        }
    }
}
