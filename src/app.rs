//! Application context.
//!
//! [`AppContext`] is built once at startup from a [`DeviceSource`] and a [`Config`], and is
//! then owned by whatever drives the event loop. It holds the resolved device for the
//! lifetime of the process; there is no re-resolution.

use crate::config::Config;
use crate::device::{DeviceHandle, DeviceSource};
use crate::error::StartupError;
use crate::event::{Disposition, RawMouseEvent};
use crate::resolver;
use crate::translator::{InputInjector, InputTranslator};
use tracing::info;

#[derive(Debug)]
pub struct AppContext {
    translator: InputTranslator,
}

impl AppContext {
    /// Resolve the configured device.
    pub fn resolve<S>(source: &S, config: &Config) -> Result<Self, StartupError>
    where
        S: DeviceSource + ?Sized,
    {
        let device = resolver::resolve(source, &config.device_identity)?;
        info!(%device, "touchpad resolved");
        Ok(Self::with_device(device))
    }

    pub fn with_device(device: DeviceHandle) -> Self {
        Self {
            translator: InputTranslator::new(device),
        }
    }

    #[inline]
    pub fn device(&self) -> DeviceHandle {
        self.translator.device()
    }

    /// Offer one raw packet to the translator.
    #[inline]
    pub fn on_raw_event<I>(&self, event: &RawMouseEvent, injector: &mut I) -> Disposition
    where
        I: InputInjector + ?Sized,
    {
        self.translator.on_raw_event(event, injector)
    }
}
