use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::backend::mock::{MockPowerBackend, RecordingBackend};
use crate::clock::mock::ManualClock;

fn controller_with(
    backend: Arc<RecordingBackend>,
    clock: Arc<ManualClock>,
) -> AwakenessController {
    AwakenessController::with_backend(Box::new(backend), Box::new(clock))
}

#[test]
fn test_normal_keep_awake_requests_continuous_only() {
    let backend = Arc::new(RecordingBackend::new());
    let controller = controller_with(backend.clone(), Arc::new(ManualClock::new()));

    assert!(controller.set_normal_keep_awake(), "Accepted request should report success");
    assert_eq!(
        backend.recorded_requests(),
        vec![ExecutionState::CONTINUOUS],
        "Normal mode should request exactly the continuous flag"
    );
}

#[test]
fn test_indefinite_keep_awake_with_display() {
    let backend = Arc::new(RecordingBackend::new());
    let controller = controller_with(backend.clone(), Arc::new(ManualClock::new()));

    assert!(controller.set_indefinite_keep_awake(true));
    assert_eq!(
        backend.recorded_requests(),
        vec![
            ExecutionState::SYSTEM_REQUIRED
                | ExecutionState::DISPLAY_REQUIRED
                | ExecutionState::CONTINUOUS
        ],
    );
}

#[test]
fn test_indefinite_keep_awake_without_display() {
    let backend = Arc::new(RecordingBackend::new());
    let controller = controller_with(backend.clone(), Arc::new(ManualClock::new()));

    assert!(controller.set_indefinite_keep_awake(false));
    assert_eq!(
        backend.recorded_requests(),
        vec![ExecutionState::SYSTEM_REQUIRED | ExecutionState::CONTINUOUS],
        "Display flag should be absent when keep_display_on is false"
    );
}

#[test]
fn test_rejected_request_reports_failure() {
    let backend = Arc::new(RecordingBackend::new().rejecting());
    let controller = controller_with(backend.clone(), Arc::new(ManualClock::new()));

    assert!(!controller.set_normal_keep_awake(), "Zero previous state should read as rejection");
    assert!(!controller.set_indefinite_keep_awake(true));
    assert_eq!(backend.recorded_requests().len(), 2, "Both calls should still reach the backend");
}

#[test]
fn test_backend_error_collapses_to_false() {
    let backend = Arc::new(RecordingBackend::new().failing("no platform binding"));
    let controller = controller_with(backend, Arc::new(ManualClock::new()));

    assert!(!controller.set_indefinite_keep_awake(false), "Errors should surface only as false");
}

#[test]
fn test_timed_keep_awake_blocks_for_requested_duration() {
    let backend = Arc::new(RecordingBackend::new());
    let clock = Arc::new(ManualClock::new());
    let controller = controller_with(backend.clone(), clock.clone());

    assert!(controller.set_timed_keep_awake(2, true));
    assert_eq!(
        clock.total_slept(),
        Duration::from_secs(2),
        "Wait should cover exactly the requested duration"
    );
    assert_eq!(
        backend.recorded_requests(),
        vec![
            ExecutionState::SYSTEM_REQUIRED
                | ExecutionState::DISPLAY_REQUIRED
                | ExecutionState::CONTINUOUS
        ],
        "Timed mode should issue the same request as indefinite mode"
    );
}

#[test]
fn test_timed_keep_awake_zero_seconds_returns_immediately() {
    let backend = Arc::new(RecordingBackend::new());
    let clock = Arc::new(ManualClock::new());
    let controller = controller_with(backend, clock.clone());

    assert!(controller.set_timed_keep_awake(0, true));
    assert!(clock.recorded_sleeps().is_empty(), "A zero-second wait should never sleep");
}

#[test]
fn test_timed_keep_awake_does_not_block_on_failure() {
    let backend = Arc::new(RecordingBackend::new().rejecting());
    let clock = Arc::new(ManualClock::new());
    let controller = controller_with(backend, clock.clone());

    assert!(!controller.set_timed_keep_awake(30, false));
    assert_eq!(clock.total_slept(), Duration::ZERO, "Failed request should return immediately");
}

#[test]
fn test_repeated_calls_are_idempotent() {
    let backend = Arc::new(RecordingBackend::new());
    let controller = controller_with(backend.clone(), Arc::new(ManualClock::new()));

    for _ in 0..3 {
        assert!(controller.set_normal_keep_awake());
    }
    assert_eq!(
        backend.recorded_requests(),
        vec![ExecutionState::CONTINUOUS; 3],
        "Each call should produce the same flag set with no hidden state"
    );
}

#[test]
fn test_set_keep_awake_dispatches_by_mode() {
    let backend = Arc::new(RecordingBackend::new());
    let clock = Arc::new(ManualClock::new());
    let controller = controller_with(backend.clone(), clock.clone());

    assert!(controller.set_keep_awake(KeepAwakeMode::Indefinite { keep_display_on: false }));
    assert!(controller.set_keep_awake(KeepAwakeMode::Timed { seconds: 5, keep_display_on: true }));
    assert!(controller.set_keep_awake(KeepAwakeMode::Normal));

    assert_eq!(
        backend.recorded_requests(),
        vec![
            ExecutionState::SYSTEM_REQUIRED | ExecutionState::CONTINUOUS,
            ExecutionState::SYSTEM_REQUIRED
                | ExecutionState::DISPLAY_REQUIRED
                | ExecutionState::CONTINUOUS,
            ExecutionState::CONTINUOUS,
        ],
    );
    assert_eq!(clock.total_slept(), Duration::from_secs(5));
}

#[test]
fn test_mode_flag_mapping() {
    assert_eq!(KeepAwakeMode::Normal.flags(), ExecutionState::CONTINUOUS);
    assert_eq!(
        KeepAwakeMode::Indefinite { keep_display_on: true }.flags(),
        ExecutionState::SYSTEM_REQUIRED
            | ExecutionState::DISPLAY_REQUIRED
            | ExecutionState::CONTINUOUS,
    );
    assert_eq!(
        KeepAwakeMode::Timed { seconds: 10, keep_display_on: false }.flags(),
        ExecutionState::SYSTEM_REQUIRED | ExecutionState::CONTINUOUS,
    );
}

#[test]
fn test_execution_state_values_match_win32() {
    assert_eq!(ExecutionState::SYSTEM_REQUIRED.bits(), 0x0000_0001);
    assert_eq!(ExecutionState::DISPLAY_REQUIRED.bits(), 0x0000_0002);
    assert_eq!(ExecutionState::AWAY_MODE_REQUIRED.bits(), 0x0000_0040);
    assert_eq!(ExecutionState::CONTINUOUS.bits(), 0x8000_0000);
}

#[test]
fn test_backend_sees_expected_flags() {
    let mut backend = MockPowerBackend::new();
    backend
        .expect_request()
        .withf(|flags| {
            *flags
                == ExecutionState::SYSTEM_REQUIRED
                    | ExecutionState::DISPLAY_REQUIRED
                    | ExecutionState::CONTINUOUS
        })
        .times(1)
        .returning(|flags| Ok(flags));

    let controller =
        AwakenessController::with_backend(Box::new(backend), Box::new(ManualClock::new()));
    assert!(controller.set_indefinite_keep_awake(true));
}
