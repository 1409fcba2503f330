//! Backend seam between the keep-awake controller and the OS.
//!
//! The controller only ever talks to a [`PowerStateBackend`]. Production code
//! binds [`NativeBackend`], which issues the platform's power-management call;
//! tests bind a double from the [`mock`] module. Keeping the native call
//! behind one trait method keeps every unsafe FFI site in this module and
//! makes the controller fully unit-testable.

use std::fmt::Debug;

use crate::awake::ExecutionState;
use crate::error::Result;

#[cfg(target_os = "macos")]
mod bindings;

/// Mock implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

/// The one state-changing call into the OS power-management facility
pub trait PowerStateBackend: Debug + Send + Sync {
    /// Requests the given execution state from the OS.
    ///
    /// Returns the execution state previously in effect where the platform
    /// reports one; a platform that cannot report the previous state returns
    /// the newly applied set instead. An empty set means the OS rejected the
    /// request. `Err` means the call could not be made at all; callers are
    /// expected to treat both the same way.
    fn request(&self, flags: ExecutionState) -> Result<ExecutionState>;
}

impl<T: PowerStateBackend + ?Sized> PowerStateBackend for std::sync::Arc<T> {
    fn request(&self, flags: ExecutionState) -> Result<ExecutionState> {
        (**self).request(flags)
    }
}

/// Backend bound to the platform's native power-management API
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBackend;

impl NativeBackend {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl PowerStateBackend for NativeBackend {
    fn request(&self, flags: ExecutionState) -> Result<ExecutionState> {
        use windows_sys::Win32::System::Power::SetThreadExecutionState;

        // Returns the previous state on success and zero on failure.
        let previous = unsafe { SetThreadExecutionState(flags.bits()) };
        Ok(ExecutionState::from_bits_retain(previous))
    }
}

#[cfg(target_os = "macos")]
impl PowerStateBackend for NativeBackend {
    fn request(&self, flags: ExecutionState) -> Result<ExecutionState> {
        bindings::replace_assertions(flags)
    }
}

#[cfg(not(any(windows, target_os = "macos")))]
impl PowerStateBackend for NativeBackend {
    fn request(&self, _flags: ExecutionState) -> Result<ExecutionState> {
        Err(crate::error::Error::power_state_request(
            "no power-management binding for this platform",
        ))
    }
}
