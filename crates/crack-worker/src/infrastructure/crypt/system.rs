//! Host crypt(3) backend.
//!
//! Calls the platform's `crypt()` from libcrypt (libxcrypt on current Linux
//! distributions), which covers every family the host supports, yescrypt
//! included.
//!
//! # Safety notes
//!
//! `crypt()` returns a pointer into a static buffer that the next call
//! overwrites, so calls are serialised through [`CRYPT_LOCK`] and the result
//! is copied out before the lock is released.

use std::ffi::{CStr, CString};
use std::sync::Mutex;

use crack_core::{Algorithm, VerifyError};

use super::Crypt;

#[link(name = "crypt")]
extern "C" {
    fn crypt(key: *const libc::c_char, salt: *const libc::c_char) -> *mut libc::c_char;
}

static CRYPT_LOCK: Mutex<()> = Mutex::new(());

/// Crypt backend that delegates to the host's libcrypt.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCrypt;

impl Crypt for SystemCrypt {
    fn crypt(&self, algorithm: Algorithm, key: &str, setting: &str) -> Result<String, VerifyError> {
        let c_key = CString::new(key)
            .map_err(|_| VerifyError::Backend("candidate contains a NUL byte".to_string()))?;
        let c_setting = CString::new(setting).map_err(|_| VerifyError::MalformedHash {
            algorithm,
            reason: "hash contains a NUL byte".to_string(),
        })?;

        let _guard = CRYPT_LOCK
            .lock()
            .map_err(|_| VerifyError::Backend("crypt lock poisoned".to_string()))?;

        // SAFETY: both pointers come from live CStrings; the returned pointer
        // is either NULL or a NUL-terminated string owned by libcrypt that
        // stays valid until the next call, which the lock rules out.
        let out = unsafe { crypt(c_key.as_ptr(), c_setting.as_ptr()) };
        if out.is_null() {
            return Err(VerifyError::Backend("crypt() returned NULL".to_string()));
        }
        let computed = unsafe { CStr::from_ptr(out) }.to_string_lossy().into_owned();

        // libxcrypt signals failure with a token starting with '*'.
        if computed.starts_with('*') {
            return Err(VerifyError::MalformedHash {
                algorithm,
                reason: format!("crypt() rejected the setting ({computed})"),
            });
        }
        Ok(computed)
    }
}
