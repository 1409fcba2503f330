//! FFI bindings to the macOS IOKit power-assertion API.
//!
//! macOS has no direct equivalent of a one-shot execution-state call; sleep
//! prevention is expressed as power assertions that stay in effect only while
//! the creating process holds their IDs. The held IDs live in a single
//! process-global slot that every request replaces wholesale, so the observable
//! behavior stays last-writer-wins with no queryable in-process state.

use std::ffi::CString;
use std::os::raw::{c_char, c_void};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::awake::ExecutionState;
use crate::error::{Error, Result};

type CFStringRef = *const c_void;
type CFAllocatorRef = *const c_void;
type IOPMAssertionID = u32;
type IOPMAssertionLevel = u32;
type IOReturn = i32;

const K_IOPM_ASSERTION_LEVEL_ON: IOPMAssertionLevel = 255;
const K_IO_RETURN_SUCCESS: IOReturn = 0;
const K_CF_STRING_ENCODING_UTF8: u32 = 0x0800_0100;

/// Assertion type preventing idle system sleep
const ASSERTION_PREVENT_SYSTEM_SLEEP: &str = "PreventUserIdleSystemSleep";
/// Assertion type preventing idle display sleep
const ASSERTION_PREVENT_DISPLAY_SLEEP: &str = "PreventUserIdleDisplaySleep";
/// Human-readable reason shown by `pmset -g assertions`
const ASSERTION_NAME: &str = "stay-awake keep-awake request";

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFStringCreateWithCString(
        alloc: CFAllocatorRef,
        c_str: *const c_char,
        encoding: u32,
    ) -> CFStringRef;
    fn CFRelease(cf: *const c_void);
}

#[link(name = "IOKit", kind = "framework")]
extern "C" {
    fn IOPMAssertionCreateWithName(
        assertion_type: CFStringRef,
        assertion_level: IOPMAssertionLevel,
        assertion_name: CFStringRef,
        assertion_id: *mut IOPMAssertionID,
    ) -> IOReturn;
    fn IOPMAssertionRelease(assertion_id: IOPMAssertionID) -> IOReturn;
}

/// Assertion IDs currently held by this process. Replaced wholesale on every
/// request; last caller wins.
static HELD_ASSERTIONS: Lazy<Mutex<Vec<IOPMAssertionID>>> = Lazy::new(|| Mutex::new(Vec::new()));

fn create_assertion(assertion_type: &str) -> Result<IOPMAssertionID> {
    let type_cstr = CString::new(assertion_type)
        .map_err(|_| Error::power_state_request("assertion type contained a NUL byte"))?;
    let name_cstr = CString::new(ASSERTION_NAME)
        .map_err(|_| Error::power_state_request("assertion name contained a NUL byte"))?;

    unsafe {
        let type_ref = CFStringCreateWithCString(
            std::ptr::null(),
            type_cstr.as_ptr(),
            K_CF_STRING_ENCODING_UTF8,
        );
        let name_ref = CFStringCreateWithCString(
            std::ptr::null(),
            name_cstr.as_ptr(),
            K_CF_STRING_ENCODING_UTF8,
        );
        if type_ref.is_null() || name_ref.is_null() {
            if !type_ref.is_null() {
                CFRelease(type_ref);
            }
            if !name_ref.is_null() {
                CFRelease(name_ref);
            }
            return Err(Error::power_state_request("CFString allocation failed"));
        }

        let mut assertion_id: IOPMAssertionID = 0;
        let status = IOPMAssertionCreateWithName(
            type_ref,
            K_IOPM_ASSERTION_LEVEL_ON,
            name_ref,
            &mut assertion_id,
        );
        CFRelease(type_ref);
        CFRelease(name_ref);

        if status == K_IO_RETURN_SUCCESS {
            Ok(assertion_id)
        } else {
            Err(Error::power_state_request(format!(
                "IOPMAssertionCreateWithName({assertion_type}) returned {status:#x}"
            )))
        }
    }
}

fn release_all(held: &mut Vec<IOPMAssertionID>) {
    for id in held.drain(..) {
        // A failed release only means the assertion was already gone.
        unsafe {
            IOPMAssertionRelease(id);
        }
    }
}

/// Replaces the process's held assertions with the set the given flags ask
/// for. A flag set with no sleep-prevention requirements (the normal
/// keep-awake request) simply releases everything held.
pub(super) fn replace_assertions(flags: ExecutionState) -> Result<ExecutionState> {
    let mut held = HELD_ASSERTIONS.lock();
    release_all(&mut held);

    let mut created: Vec<IOPMAssertionID> = Vec::new();
    let wanted = [
        (ExecutionState::SYSTEM_REQUIRED, ASSERTION_PREVENT_SYSTEM_SLEEP),
        (ExecutionState::DISPLAY_REQUIRED, ASSERTION_PREVENT_DISPLAY_SLEEP),
    ];
    for (flag, assertion_type) in wanted {
        if !flags.contains(flag) {
            continue;
        }
        match create_assertion(assertion_type) {
            Ok(id) => created.push(id),
            Err(e) => {
                release_all(&mut created);
                return Err(e);
            },
        }
    }

    *held = created;
    // The platform cannot report the previous execution state; report the
    // newly applied set instead.
    Ok(flags)
}
