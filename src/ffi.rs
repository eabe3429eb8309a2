//! FFI bindings for StressScore
//!
//! This module provides C-compatible functions for calling the scorer from other
//! languages. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `stress_free_string`.
//!
//! Entry points validate their input and reject negative or non-finite
//! readings, except `stress_analyze_json_unchecked`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::pipeline::{
    stress_json_to_analysis, stress_json_to_analysis_unchecked, stress_json_to_report,
};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Shared body of the JSON-in, JSON-out entry points
unsafe fn run_json(
    json: *const c_char,
    f: fn(String) -> Result<String, crate::ComputeError>,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match f(json_str) {
        Ok(result) => string_to_cstr(&result),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Score a stress.input.v1 JSON document and return the analysis JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stress_free_string`.
/// - Returns NULL on error; call `stress_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stress_analyze_json(json: *const c_char) -> *mut c_char {
    run_json(json, stress_json_to_analysis)
}

/// Like `stress_analyze_json` but scores readings that fail validation.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stress_free_string`.
/// - Returns NULL on error; call `stress_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stress_analyze_json_unchecked(json: *const c_char) -> *mut c_char {
    run_json(json, stress_json_to_analysis_unchecked)
}

/// Score a stress.input.v1 JSON document and return a full report JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stress_free_string`.
/// - Returns NULL on error; call `stress_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stress_report_json(json: *const c_char) -> *mut c_char {
    run_json(json, stress_json_to_report)
}

/// Free a string returned by StressScore functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a StressScore function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn stress_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next StressScore call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn stress_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn stress_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn sample_input_json() -> CString {
        CString::new(
            r#"{
            "physiological": {
                "heartRate": 75, "bloodPressureSystolic": 120,
                "bloodPressureDiastolic": 80, "respiratoryRate": 16,
                "skinConductance": 3.5, "bodyTemperature": 98.6
            },
            "behavioral": {
                "sleepHours": 7.5, "sleepQuality": 7, "activityLevel": 6,
                "screenTime": 6, "socialInteractions": 5, "workHours": 8
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ffi_analyze_json() {
        let json = sample_input_json();

        unsafe {
            let result = stress_analyze_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("\"stressCategory\":\"Low\""));

            stress_free_string(result);
        }
    }

    #[test]
    fn test_ffi_report_json() {
        let json = sample_input_json();

        unsafe {
            let result = stress_report_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("reportVersion"));
            assert!(stress_last_error().is_null());

            stress_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let result = stress_analyze_json(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = stress_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(!error_str.is_empty());

            let result = stress_analyze_json(ptr::null());
            assert!(result.is_null());
            let error_str = CStr::from_ptr(stress_last_error()).to_str().unwrap();
            assert_eq!(error_str, "Invalid JSON string pointer");
        }
    }

    #[test]
    fn test_ffi_unchecked_accepts_negative_reading() {
        let json = CString::new(
            r#"{"physiological": {
                "heartRate": -10, "bloodPressureSystolic": 120,
                "bloodPressureDiastolic": 80, "respiratoryRate": 16,
                "skinConductance": 3.5, "bodyTemperature": 98.6
            }}"#,
        )
        .unwrap();

        unsafe {
            assert!(stress_analyze_json(json.as_ptr()).is_null());
            let error_str = CStr::from_ptr(stress_last_error()).to_str().unwrap();
            assert!(error_str.contains("heartRate"));

            let result = stress_analyze_json_unchecked(json.as_ptr());
            assert!(!result.is_null());
            assert!(stress_last_error().is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("\"physiologicalScore\""));

            stress_free_string(result);
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = stress_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
