//! Error taxonomy and process exit codes.
//!
//! Startup failures are fail-fast: each one maps to a user-visible warning and an exit
//! code via [`StartupError::exit_code`]. Post-startup failures are either swallowed
//! (injection, see [`InjectError`]) or fatal for the whole loop
//! ([`StartupError::EventLoopFatal`]).

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a normal shutdown.
pub const EXIT_OK: i32 = 0;

/// Exit code for every startup or event-loop failure.
pub const EXIT_FAILURE: i32 = -1;

/// Failures of the device resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The platform refused to list raw input devices.
    #[error("raw input device enumeration failed (os error {code})")]
    EnumerationFailed { code: u32 },

    /// No attached pointing device carries the configured identity.
    #[error("cannot find device")]
    DeviceNotFound,
}

/// The platform rejected a synthetic input event.
///
/// Never interrupts the event loop; the window procedure only logs it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InjectError {
    #[error("SendInput rejected the event (os error {code})")]
    Rejected { code: u32 },
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Anything that stops the process before (or while) the message loop runs.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// `RegisterRawInputDevices` failed.
    #[error("RegisterRawInputDevices failed: {code}")]
    RegistrationFailed { code: u32 },

    /// Another instance holds the single-instance lock.
    #[error("Already running")]
    AlreadyRunning,

    /// A window, tray or lock primitive failed.
    #[error("{what} failed: {code}")]
    Platform { what: &'static str, code: u32 },

    /// The message retrieval primitive reported an error.
    #[error("GetMessage failed: {code}")]
    EventLoopFatal { code: u32 },
}

impl StartupError {
    /// Process exit code for this failure.
    ///
    /// A second instance is an expected condition and exits successfully.
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::AlreadyRunning => EXIT_OK,
            _ => EXIT_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_instance_exits_successfully() {
        assert_eq!(StartupError::AlreadyRunning.exit_code(), EXIT_OK);
    }

    #[test]
    fn startup_failures_exit_nonzero() {
        let failures = [
            StartupError::Resolve(ResolveError::DeviceNotFound),
            StartupError::Resolve(ResolveError::EnumerationFailed { code: 5 }),
            StartupError::RegistrationFailed { code: 87 },
            StartupError::Platform {
                what: "CreateWindowEx",
                code: 0,
            },
            StartupError::EventLoopFatal { code: 1400 },
        ];
        for err in failures {
            assert_eq!(err.exit_code(), EXIT_FAILURE, "{err}");
        }
    }

    #[test]
    fn messages_match_user_warnings() {
        assert_eq!(
            StartupError::from(ResolveError::DeviceNotFound).to_string(),
            "cannot find device"
        );
        assert_eq!(
            StartupError::RegistrationFailed { code: 87 }.to_string(),
            "RegisterRawInputDevices failed: 87"
        );
    }
}
