//! touchpad-scroll: turn one touchpad's vertical motion into wheel scrolling.
//!
//! The pipeline is small:
//! 1. [`resolver::resolve`] finds the touchpad among the attached Raw Input devices by its
//!    exact interface path.
//! 2. [`InputTranslator`] looks at every mouse-class packet, keeps the plain vertical
//!    motion coming from that touchpad and turns it into a synthetic wheel event.
//! 3. An [`InputInjector`] submits the event (`SendInput` on Windows).
//!
//! Everything except [`backends`] is platform-independent and unit-tested against
//! in-memory fakes.

pub mod app;
pub mod backends;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod logging;
pub mod resolver;
pub mod translator;

pub use app::AppContext;
pub use config::Config;
pub use device::*;
pub use error::*;
pub use event::*;
pub use translator::{InputInjector, InputTranslator};
