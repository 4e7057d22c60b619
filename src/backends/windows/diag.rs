//! Debugger log sink and warning dialogs.

#![cfg(target_os = "windows")]

use super::{wide, APP_NAME};
use core::ptr::null_mut;
use std::io;
use tracing::warn;
use windows_sys::Win32::System::Diagnostics::Debug::OutputDebugStringW;
use windows_sys::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONWARNING, MB_OK};

/// `tracing-subscriber` writer that forwards each formatted record to
/// `OutputDebugStringW` (visible in DebugView or an attached debugger).
///
/// One writer is created per record; the line is emitted on drop.
#[derive(Debug, Default)]
pub struct DebugStringWriter {
    buf: Vec<u8>,
}

impl io::Write for DebugStringWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for DebugStringWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = format!("[{APP_NAME}] {}", String::from_utf8_lossy(&self.buf));
        let line = wide(&line);
        unsafe { OutputDebugStringW(line.as_ptr()) };
    }
}

/// Log `text` and show it in a modal warning box.
pub fn show_warning(text: &str) {
    warn!("{text}");
    let body = wide(&format!("[{APP_NAME}] {text}"));
    let caption = wide(APP_NAME);
    unsafe {
        MessageBoxW(
            null_mut(),
            body.as_ptr(),
            caption.as_ptr(),
            MB_ICONWARNING | MB_OK,
        );
    }
}
