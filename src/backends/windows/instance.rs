//! Single-instance guard (named mutex).

#![cfg(target_os = "windows")]

use super::wide;
use crate::error::StartupError;
use core::ptr::null;
use tracing::debug;
use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, ERROR_ALREADY_EXISTS, HANDLE};
use windows_sys::Win32::System::Threading::CreateMutexW;

/// Name of the process-wide lock.
pub const SINGLE_INSTANCE_MUTEX: &str = "{1abf48f2-725c-4377-8e5a-176265a6b0d4}";

/// Holds the named mutex until dropped.
#[derive(Debug)]
pub struct SingleInstance {
    handle: HANDLE,
}

impl SingleInstance {
    /// Create (or open) the named mutex.
    ///
    /// Fails with [`StartupError::AlreadyRunning`] if another process created it first.
    pub fn acquire(name: &str) -> Result<Self, StartupError> {
        let name = wide(name);
        unsafe {
            let handle = CreateMutexW(null(), 0, name.as_ptr());
            // Must be read before any other API call.
            let code = GetLastError();
            if handle.is_null() {
                return Err(StartupError::Platform {
                    what: "CreateMutex",
                    code,
                });
            }
            if code == ERROR_ALREADY_EXISTS {
                CloseHandle(handle);
                return Err(StartupError::AlreadyRunning);
            }
            Ok(Self { handle })
        }
    }
}

impl Drop for SingleInstance {
    fn drop(&mut self) {
        debug!("cleanup");
        unsafe {
            CloseHandle(self.handle);
        }
    }
}
