//! `tracing` subscriber setup.
//!
//! Filter comes from `RUST_LOG`, falling back to [`default_directive`]. On Windows every
//! record goes to the debugger channel (`OutputDebugStringW`); elsewhere to stderr.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub fn default_directive() -> &'static str {
    if cfg!(feature = "debug-log") {
        "touchpad_scroll=debug"
    } else {
        "touchpad_scroll=info"
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive()));

    #[cfg(target_os = "windows")]
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(crate::backends::windows::DebugStringWriter::default)
        .try_init();

    #[cfg(not(target_os = "windows"))]
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if result.is_err() {
        tracing::debug!("subscriber already installed");
    }
}
