#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

use clap::Parser;
use std::path::PathBuf;
use std::process;
use touchpad_scroll::config::{default_config_path, Config};
use touchpad_scroll::{logging, StartupError, EXIT_FAILURE, EXIT_OK};
use tracing::{error, info};

/// Scroll with a touchpad that the OS only treats as a mouse.
#[derive(Parser, Debug)]
#[command(name = "touchpad-scroll", version)]
struct Cli {
    /// Raw Input interface path of the touchpad (overrides the config file)
    #[arg(long)]
    device: Option<String>,

    /// Config file (default: touchpad-scroll.toml next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the attached raw input devices and exit
    #[arg(long)]
    list_devices: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init();
    process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    if cli.list_devices {
        return list_devices();
    }

    let fallback = default_config_path();
    let config = match Config::load(cli.config.as_deref(), fallback.as_deref(), cli.device) {
        Ok(config) => config,
        Err(e) => return fail(StartupError::from(e)),
    };
    info!(device = %config.device_identity, "starting");

    match platform::run(&config) {
        Ok(()) => {
            info!("exit");
            EXIT_OK
        }
        Err(e) => fail(e),
    }
}

fn fail(e: StartupError) -> i32 {
    platform::warn(&e.to_string());
    e.exit_code()
}

fn list_devices() -> i32 {
    platform::attach_console();
    match platform::list_devices() {
        Ok(devices) => {
            for d in devices {
                println!(
                    "{:<8} {:>18} {}",
                    d.entry.kind,
                    d.entry.handle.to_string(),
                    d.name.as_deref().unwrap_or("<unnamed>")
                );
            }
            EXIT_OK
        }
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            EXIT_FAILURE
        }
    }
}

#[cfg(target_os = "windows")]
mod platform {
    use touchpad_scroll::backends::windows;
    use touchpad_scroll::config::Config;
    use touchpad_scroll::resolver::NamedDevice;
    use touchpad_scroll::{ResolveError, StartupError};

    pub fn run(config: &Config) -> Result<(), StartupError> {
        windows::run(config)
    }

    pub fn list_devices() -> Result<Vec<NamedDevice>, ResolveError> {
        windows::list_devices()
    }

    pub fn warn(text: &str) {
        windows::show_warning(text);
    }

    pub fn attach_console() {
        windows::attach_parent_console();
    }
}

#[cfg(not(target_os = "windows"))]
mod platform {
    use touchpad_scroll::config::Config;
    use touchpad_scroll::resolver::NamedDevice;
    use touchpad_scroll::{ResolveError, StartupError};

    const UNSUPPORTED: u32 = 50; // ERROR_NOT_SUPPORTED

    pub fn run(_config: &Config) -> Result<(), StartupError> {
        Err(StartupError::Platform {
            what: "Raw Input (Windows only)",
            code: UNSUPPORTED,
        })
    }

    pub fn list_devices() -> Result<Vec<NamedDevice>, ResolveError> {
        Err(ResolveError::EnumerationFailed { code: UNSUPPORTED })
    }

    pub fn warn(text: &str) {
        tracing::warn!("{text}");
        eprintln!("touchpad-scroll: {text}");
    }

    pub fn attach_console() {}
}
