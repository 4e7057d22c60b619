//! Windows Raw Input plumbing (mouse class only).
//!
//! - [`RawInputDevices`]: device list + interface path queries (`GetRawInputDeviceList`,
//!   `GetRawInputDeviceInfoW(RIDI_DEVICENAME)`)
//! - [`register_mouse_sink`]: subscribe a window to mouse-class input in sink mode
//! - [`read_wm_input`] / [`parse_mouse_payload`]: turn a `WM_INPUT` packet into a
//!   [`RawMouseEvent`]
//!
//! ## Conventions
//! - Deltas stay in raw OS counts.
//! - Flag words are passed through bit-for-bit; unknown bits are retained so the
//!   translator sees them as "not zero".

#![cfg(target_os = "windows")]

use crate::device::{DeviceEntry, DeviceHandle, DeviceKind, DeviceSource};
use crate::error::{ResolveError, StartupError};
use crate::event::{AxisFlags, ButtonFlags, RawMouseEvent};
use core::ffi::c_void;
use core::mem::size_of;
use core::ptr::null_mut;
use windows_sys::Win32::Foundation::{GetLastError, HANDLE, HWND, LPARAM};
use windows_sys::Win32::UI::Input::*;

/// Generic Desktop usage page.
const HID_USAGE_PAGE_GENERIC: u16 = 0x01;
/// Mouse usage on the Generic Desktop page.
const HID_USAGE_GENERIC_MOUSE: u16 = 0x02;

#[inline]
fn to_handle(h: HANDLE) -> DeviceHandle {
    DeviceHandle::from_raw(h as usize)
}

#[inline]
fn from_handle(h: DeviceHandle) -> HANDLE {
    h.as_raw() as HANDLE
}

/// The live Raw Input device list.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawInputDevices;

impl DeviceSource for RawInputDevices {
    fn list(&self) -> Result<Vec<DeviceEntry>, ResolveError> {
        let stride = size_of::<RAWINPUTDEVICELIST>() as u32;
        let mut count: u32 = 0;
        unsafe {
            if GetRawInputDeviceList(null_mut(), &mut count, stride) != 0 {
                return Err(ResolveError::EnumerationFailed {
                    code: GetLastError(),
                });
            }
            if count == 0 {
                return Ok(Vec::new());
            }

            let mut list = vec![
                RAWINPUTDEVICELIST {
                    hDevice: null_mut(),
                    dwType: 0,
                };
                count as usize
            ];
            let n = GetRawInputDeviceList(list.as_mut_ptr(), &mut count, stride);
            if n == u32::MAX {
                return Err(ResolveError::EnumerationFailed {
                    code: GetLastError(),
                });
            }
            list.truncate(n as usize);

            Ok(list
                .iter()
                .map(|d| DeviceEntry {
                    kind: match d.dwType {
                        RIM_TYPEMOUSE => DeviceKind::Mouse,
                        RIM_TYPEKEYBOARD => DeviceKind::Keyboard,
                        _ => DeviceKind::Hid,
                    },
                    handle: to_handle(d.hDevice),
                })
                .collect())
        }
    }

    fn name(&self, handle: DeviceHandle) -> Option<String> {
        device_name(from_handle(handle))
    }
}

/// RawInput device interface path for a given `hDevice` (RIDI_DEVICENAME).
///
/// Names that are not valid UTF-16 are treated as unreadable so they can never compare
/// equal to a configured identity.
pub(crate) fn device_name(hdev: HANDLE) -> Option<String> {
    unsafe {
        // Query required size (in WCHARs, including NUL).
        let mut size: u32 = 0;
        let r0 = GetRawInputDeviceInfoW(hdev, RIDI_DEVICENAME, core::ptr::null_mut(), &mut size);
        if r0 == u32::MAX || size == 0 {
            return None;
        }

        let mut wide: Vec<u16> = vec![0u16; size as usize + 1];
        let r1 = GetRawInputDeviceInfoW(
            hdev,
            RIDI_DEVICENAME,
            wide.as_mut_ptr() as *mut c_void,
            &mut size,
        );
        if r1 == u32::MAX {
            return None;
        }

        while wide.last() == Some(&0) {
            wide.pop();
        }
        String::from_utf16(&wide).ok()
    }
}

/// Subscribe `hwnd` to mouse-class raw input, delivered even when unfocused.
///
/// `RIDEV_NOLEGACY` is deliberately absent: with it the tray context menu stops
/// receiving clicks.
pub(crate) fn register_mouse_sink(hwnd: HWND) -> Result<(), StartupError> {
    let rid = RAWINPUTDEVICE {
        usUsagePage: HID_USAGE_PAGE_GENERIC,
        usUsage: HID_USAGE_GENERIC_MOUSE,
        dwFlags: RIDEV_INPUTSINK,
        hwndTarget: hwnd,
    };
    let ok = unsafe { RegisterRawInputDevices(&rid, 1, size_of::<RAWINPUTDEVICE>() as u32) };
    if ok == 0 {
        return Err(StartupError::RegistrationFailed {
            code: unsafe { GetLastError() },
        });
    }
    Ok(())
}

/// Parse a `WM_INPUT` lparam into a mouse packet (if it is one).
pub(crate) fn read_wm_input(lparam: LPARAM) -> Option<RawMouseEvent> {
    unsafe {
        // Query size
        let mut size: u32 = 0;
        let r0 = GetRawInputData(
            lparam as HRAWINPUT,
            RID_INPUT,
            core::ptr::null_mut(),
            &mut size,
            size_of::<RAWINPUTHEADER>() as u32,
        );
        if r0 == u32::MAX || size == 0 {
            return None;
        }

        // Read buffer
        let mut buf = vec![0u8; size as usize];
        let r1 = GetRawInputData(
            lparam as HRAWINPUT,
            RID_INPUT,
            buf.as_mut_ptr() as *mut c_void,
            &mut size,
            size_of::<RAWINPUTHEADER>() as u32,
        );
        if r1 == u32::MAX {
            return None;
        }

        parse_mouse_payload(&buf)
    }
}

/// Parse a raw `RID_INPUT` payload (bytes returned by `GetRawInputData`).
///
/// Returns `None` for keyboard/HID packets and truncated buffers.
pub(crate) fn parse_mouse_payload(buf: &[u8]) -> Option<RawMouseEvent> {
    let hdr_sz = size_of::<RAWINPUTHEADER>();
    if buf.len() < hdr_sz + size_of::<RAWMOUSE>() {
        return None;
    }

    unsafe {
        let hdr: RAWINPUTHEADER = core::ptr::read_unaligned(buf.as_ptr() as *const RAWINPUTHEADER);
        if hdr.dwType != RIM_TYPEMOUSE {
            return None;
        }

        let m: RAWMOUSE = core::ptr::read_unaligned(buf.as_ptr().add(hdr_sz) as *const RAWMOUSE);
        let button_flags: u16 = m.Anonymous.Anonymous.usButtonFlags;

        Some(RawMouseEvent {
            device: to_handle(hdr.hDevice),
            axis_flags: AxisFlags::from_bits_retain(m.usFlags as u16),
            button_flags: ButtonFlags::from_bits_retain(button_flags),
            last_x: m.lLastX,
            last_y: m.lLastY,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(dw_type: u32, hdev: usize, us_flags: u16, buttons: u16, last_y: i32) -> Vec<u8> {
        let hdr_sz = size_of::<RAWINPUTHEADER>();
        let mut buf = vec![0u8; hdr_sz + size_of::<RAWMOUSE>()];
        unsafe {
            let mut hdr: RAWINPUTHEADER = core::mem::zeroed();
            hdr.dwType = dw_type;
            hdr.dwSize = buf.len() as u32;
            hdr.hDevice = hdev as HANDLE;
            core::ptr::write_unaligned(buf.as_mut_ptr() as *mut RAWINPUTHEADER, hdr);

            let mut m: RAWMOUSE = core::mem::zeroed();
            m.usFlags = us_flags as _;
            m.Anonymous.Anonymous.usButtonFlags = buttons;
            m.lLastX = 4;
            m.lLastY = last_y;
            core::ptr::write_unaligned(buf.as_mut_ptr().add(hdr_sz) as *mut RAWMOUSE, m);
        }
        buf
    }

    #[test]
    fn parses_mouse_packet() {
        let ev = parse_mouse_payload(&packet(RIM_TYPEMOUSE, 0x10, 0, 0, -6)).unwrap();
        assert_eq!(ev.device, DeviceHandle::from_raw(0x10));
        assert!(ev.axis_flags.is_empty());
        assert!(ev.button_flags.is_empty());
        assert_eq!((ev.last_x, ev.last_y), (4, -6));
    }

    #[test]
    fn keeps_flag_bits() {
        let ev = parse_mouse_payload(&packet(RIM_TYPEMOUSE, 0x10, 0x0001, 0x0400, 3)).unwrap();
        assert_eq!(ev.axis_flags, AxisFlags::MOVE_ABSOLUTE);
        assert_eq!(ev.button_flags, ButtonFlags::WHEEL);
    }

    #[test]
    fn ignores_non_mouse_and_short_packets() {
        assert_eq!(parse_mouse_payload(&packet(RIM_TYPEKEYBOARD, 0x10, 0, 0, -6)), None);
        let buf = packet(RIM_TYPEMOUSE, 0x10, 0, 0, -6);
        assert_eq!(parse_mouse_payload(&buf[..buf.len() - 1]), None);
    }
}
