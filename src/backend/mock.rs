//! Test doubles for the power-state backend.
//!
//! [`RecordingBackend`] captures every requested flag set and answers with
//! a configured result, which covers most controller tests. The mockall-based
//! [`MockPowerBackend`] is for expectation-style tests on the seam itself.

use std::fmt;
use std::sync::Mutex;

use crate::awake::ExecutionState;
use crate::backend::PowerStateBackend;
use crate::error::{Error, Result};

/// How the fake OS answers a power-state request
#[derive(Debug, Clone)]
enum Response {
    /// The call succeeds; the fake reports this previous execution state
    Accepted(ExecutionState),
    /// The call is made but the OS rejects it (zero/empty previous state)
    Rejected,
    /// The call itself cannot be made
    Failing(String),
}

/// Fake backend that records every requested flag set
pub struct RecordingBackend {
    requests: Mutex<Vec<ExecutionState>>,
    response: Response,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    /// Creates a backend that accepts every request, reporting a non-empty
    /// previous state
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: Response::Accepted(ExecutionState::CONTINUOUS),
        }
    }

    /// Reports the given previous execution state on every request
    pub fn with_previous_state(mut self, previous: ExecutionState) -> Self {
        self.response = Response::Accepted(previous);
        self
    }

    /// Makes the fake OS reject every request with a zero previous state
    pub fn rejecting(mut self) -> Self {
        self.response = Response::Rejected;
        self
    }

    /// Makes every request fail before reaching the fake OS
    pub fn failing<S: Into<String>>(mut self, reason: S) -> Self {
        self.response = Response::Failing(reason.into());
        self
    }

    /// Returns every flag set requested so far, in call order
    pub fn recorded_requests(&self) -> Vec<ExecutionState> {
        self.requests.lock().unwrap().clone()
    }
}

impl fmt::Debug for RecordingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingBackend")
            .field("response", &self.response)
            .field("requests", &self.requests.lock().unwrap().len())
            .finish()
    }
}

impl PowerStateBackend for RecordingBackend {
    fn request(&self, flags: ExecutionState) -> Result<ExecutionState> {
        self.requests.lock().unwrap().push(flags);
        match &self.response {
            Response::Accepted(previous) => Ok(*previous),
            Response::Rejected => Ok(ExecutionState::empty()),
            Response::Failing(reason) => Err(Error::power_state_request(reason.clone())),
        }
    }
}

mockall::mock! {
    pub PowerBackend {}

    impl PowerStateBackend for PowerBackend {
        fn request(&self, flags: ExecutionState) -> Result<ExecutionState>;
    }
}

impl fmt::Debug for MockPowerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MockPowerBackend")
    }
}
