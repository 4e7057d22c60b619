//! Device resolver.
//!
//! Walks the platform device list once and picks the mouse-class device whose interface
//! path equals the configured identity. The comparison is exact and case-sensitive; no
//! normalization or prefix matching is attempted.
//!
//! If more than one device carries the identity the last one in enumeration order wins.

use crate::device::{DeviceEntry, DeviceHandle, DeviceKind, DeviceSource};
use crate::error::ResolveError;
use tracing::{debug, trace};

/// A listed device together with its interface path (if readable).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedDevice {
    pub entry: DeviceEntry,
    pub name: Option<String>,
}

/// Resolve `identity` to a device handle.
///
/// Only [`DeviceKind::Mouse`] entries are named and compared.
pub fn resolve<S>(source: &S, identity: &str) -> Result<DeviceHandle, ResolveError>
where
    S: DeviceSource + ?Sized,
{
    let entries = source.list()?;
    if entries.is_empty() {
        debug!("no raw input devices attached");
        return Err(ResolveError::DeviceNotFound);
    }

    let mut found = None;
    for entry in entries.iter().filter(|e| e.kind == DeviceKind::Mouse) {
        let Some(name) = source.name(entry.handle) else {
            continue;
        };
        trace!(handle = %entry.handle, %name, "mouse-class device");
        if name == identity {
            debug!(handle = %entry.handle, %name, "matched raw input device");
            found = Some(entry.handle);
        }
    }

    found.ok_or(ResolveError::DeviceNotFound)
}

/// Every attached device with its name, for diagnostics.
pub fn list_named<S>(source: &S) -> Result<Vec<NamedDevice>, ResolveError>
where
    S: DeviceSource + ?Sized,
{
    Ok(source
        .list()?
        .into_iter()
        .map(|entry| NamedDevice {
            name: source.name(entry.handle),
            entry,
        })
        .collect())
}
