//! Device identity types and the device-listing seam.
//!
//! The platform hands out opaque device handles; everything above the backend only
//! compares them for equality. [`DeviceSource`] is what the resolver needs from the
//! platform: a device list and a per-handle name query.

use crate::error::ResolveError;
use std::fmt;

/// Opaque, platform-assigned device handle (the Raw Input `hDevice`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceHandle(usize);

impl DeviceHandle {
    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Raw Input device class (`RIM_TYPE*`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    /// Mouse-class pointing device. Touchpads exposed on the mouse usage land here.
    Mouse,
    Keyboard,
    Hid,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceKind::Mouse => "mouse",
            DeviceKind::Keyboard => "keyboard",
            DeviceKind::Hid => "hid",
        })
    }
}

/// One entry of the platform device list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceEntry {
    pub kind: DeviceKind,
    pub handle: DeviceHandle,
}

/// Read-only view of the attached raw input devices.
pub trait DeviceSource {
    /// All attached devices, in platform enumeration order.
    fn list(&self) -> Result<Vec<DeviceEntry>, ResolveError>;

    /// Interface path of a device. `None` when the name is empty or cannot be read.
    fn name(&self, handle: DeviceHandle) -> Option<String>;
}
