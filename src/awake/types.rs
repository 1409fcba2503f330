use bitflags::bitflags;

bitflags! {
    /// Execution-state capabilities requested from the OS.
    ///
    /// The values mirror the Win32 `EXECUTION_STATE` flags; the macOS backend
    /// translates them into the equivalent IOKit power assertions. These are
    /// independent booleans composed with bitwise OR, not a single enum value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExecutionState: u32 {
        /// Forces the system to stay in the working state.
        const SYSTEM_REQUIRED = 0x0000_0001;
        /// Forces the display to stay on.
        const DISPLAY_REQUIRED = 0x0000_0002;
        /// Enables away mode. Defined for completeness; no public operation
        /// requests it.
        const AWAY_MODE_REQUIRED = 0x0000_0040;
        /// Keeps the requested state in effect until the next request that
        /// also carries this flag, rather than resetting it on thread exit.
        const CONTINUOUS = 0x8000_0000;
    }
}

/// The keep-awake intent a caller can express
#[derive(Debug, PartialEq, Clone, Copy)]
#[non_exhaustive]
pub enum KeepAwakeMode {
    /// Clear the sleep-prevention requirements; the machine manages its own
    /// sleep again. Held until explicitly changed.
    Normal,
    /// Prevent system sleep, optionally keeping the display on, until
    /// explicitly changed.
    Indefinite {
        /// Whether the display must also stay on
        keep_display_on: bool,
    },
    /// Prevent system sleep as in [`KeepAwakeMode::Indefinite`], with the
    /// caller expected to change the state again after `seconds` have passed.
    Timed {
        /// Wall-clock seconds the calling thread is blocked for
        seconds: u64,
        /// Whether the display must also stay on
        keep_display_on: bool,
    },
}

impl KeepAwakeMode {
    /// Returns the execution-state flags this mode requests from the OS.
    pub fn flags(&self) -> ExecutionState {
        match self {
            KeepAwakeMode::Normal => ExecutionState::CONTINUOUS,
            KeepAwakeMode::Indefinite { keep_display_on }
            | KeepAwakeMode::Timed { keep_display_on, .. } => {
                let mut flags = ExecutionState::SYSTEM_REQUIRED | ExecutionState::CONTINUOUS;
                if *keep_display_on {
                    flags |= ExecutionState::DISPLAY_REQUIRED;
                }
                flags
            },
        }
    }
}
