#![cfg(target_os = "windows")]

//! Windows substrate.
//!
//! This module owns everything that talks to Win32:
//! - **Raw Input** device listing, registration and `WM_INPUT` parsing
//! - **SendInput** injection of the synthetic wheel events
//! - the single-instance mutex, hidden window, tray icon and message loop
//! - the `OutputDebugStringW` log writer and `MessageBoxW` warnings
//!
//! [`run`] performs the whole startup sequence and blocks in the message loop:
//! lock, window, tray icon, resolve device, register raw input, pump messages.

pub mod diag;
pub mod inject;
pub mod instance;
pub mod raw_input;
pub mod tray;
mod window;

use crate::app::AppContext;
use crate::config::Config;
use crate::error::{ResolveError, StartupError};
use crate::resolver::{self, NamedDevice};
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use tracing::info;
use windows_sys::Win32::System::Console::{AttachConsole, ATTACH_PARENT_PROCESS};

pub use diag::{show_warning, DebugStringWriter};
pub use inject::SendInputInjector;
pub use instance::{SingleInstance, SINGLE_INSTANCE_MUTEX};
pub use raw_input::RawInputDevices;

/// Window class, window title, tray tooltip and dialog caption.
pub const APP_NAME: &str = "touchpad-scroll";

/// NUL-terminated UTF-16 copy of `s`.
pub(crate) fn wide(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(Some(0)).collect()
}

/// Start up and run until the user picks "Exit".
pub fn run(config: &Config) -> Result<(), StartupError> {
    let _instance = SingleInstance::acquire(SINGLE_INSTANCE_MUTEX)?;

    let window = window::MessageWindow::create()?;
    let tray = tray::TrayIcon::new(window.hwnd(), window.icon(), APP_NAME);
    tray.add()?;

    let ctx = AppContext::resolve(&RawInputDevices, config)?;
    raw_input::register_mouse_sink(window.hwnd())?;

    window.attach(window::AppState {
        ctx,
        tray,
        taskbar_created: window::taskbar_created_message(),
    });
    info!("running");

    window::message_loop()
}

/// Snapshot of all raw input devices with their interface paths.
pub fn list_devices() -> Result<Vec<NamedDevice>, ResolveError> {
    resolver::list_named(&RawInputDevices)
}

/// Reuse the launching console for stdout, if there is one.
///
/// Release builds use the GUI subsystem and start without a console.
pub fn attach_parent_console() {
    unsafe {
        AttachConsole(ATTACH_PARENT_PROCESS);
    }
}
