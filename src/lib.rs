//! Stay Awake - A Rust library for keeping the system awake
//!
//! This crate provides a safe interface to the native power-management
//! facilities that prevent an operating system from entering sleep or dimming
//! its display. On Windows it calls `SetThreadExecutionState`; on macOS it
//! holds IOKit power assertions. The request is fire-and-forget: the awake
//! state lives in the OS power-state table, not in process memory, and stays
//! in effect until another request (from anywhere) changes it.
//!
//! # Features
//!
//! - **Normal keep-awake**: clear the sleep-prevention requirements while
//!   keeping the continuous state applied
//! - **Indefinite keep-awake**: prevent system sleep, optionally keeping the
//!   display on, until explicitly changed
//! - **Timed keep-awake**: prevent system sleep and block the calling thread
//!   for a fixed wall-clock duration
//!
//! # Examples
//!
//! ```rust,no_run
//! use stay_awake::AwakenessController;
//!
//! let controller = AwakenessController::new();
//!
//! // Keep the machine and the display awake until told otherwise.
//! if !controller.set_indefinite_keep_awake(true) {
//!     eprintln!("the OS rejected the keep-awake request");
//! }
//!
//! // ... do long-running work ...
//!
//! // Let the machine manage its own sleep again.
//! controller.set_normal_keep_awake();
//! ```
//!
//! # Safety
//!
//! The native backends use unsafe FFI calls into OS power-management APIs.
//! All unsafe operations are wrapped behind the [`backend::PowerStateBackend`]
//! trait; failures are checked and never propagate across the public API,
//! which reports every failure mode as a plain `false`.
//!
//! # Thread Safety
//!
//! The controller holds no mutable in-process state, so no internal locking
//! is needed. The OS power-state table is the only shared resource; its
//! concurrency control is owned by the OS and is last-writer-wins. Concurrent
//! callers, including other processes, may race to set conflicting states;
//! this crate makes no attempt to arbitrate that race.

pub mod awake;
pub mod backend;
pub mod clock;
pub mod error;

pub use awake::{AwakenessController, ExecutionState, KeepAwakeMode};
pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::awake::{AwakenessController, ExecutionState, KeepAwakeMode};
    pub use crate::backend::PowerStateBackend;
    pub use crate::clock::Clock;
    pub use crate::error::{Error, Result};
}
