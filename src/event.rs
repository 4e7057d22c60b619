//! Raw and synthetic pointer events.
//!
//! [`RawMouseEvent`] is what the backend extracts from one `WM_INPUT` packet.
//! [`SyntheticScroll`] is what gets handed to `SendInput`.
//!
//! ## Units
//! - `last_x` / `last_y` are raw device counts, exactly as Raw Input reports them.
//! - `wheel_delta` is in `WHEEL_DELTA` units (120 per notch).
//! - Flag values are the Win32 bit values so the backend can pass them through unchanged.

use crate::device::DeviceHandle;
use bitflags::bitflags;

/// One wheel notch (`WHEEL_DELTA`).
pub const WHEEL_DELTA: i32 = 120;

/// Raw vertical counts per wheel notch.
pub const COUNTS_PER_NOTCH: i32 = 6;

bitflags! {
    /// `RAWMOUSE::usFlags` (`MOUSE_*`). Empty means relative motion.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct AxisFlags: u16 {
        const MOVE_ABSOLUTE = 0x0001;
        const VIRTUAL_DESKTOP = 0x0002;
        const ATTRIBUTES_CHANGED = 0x0004;
        const MOVE_NOCOALESCE = 0x0008;
        const _ = !0;
    }

    /// `RAWMOUSE::usButtonFlags` (`RI_MOUSE_*`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ButtonFlags: u16 {
        const LEFT_DOWN = 0x0001;
        const LEFT_UP = 0x0002;
        const RIGHT_DOWN = 0x0004;
        const RIGHT_UP = 0x0008;
        const MIDDLE_DOWN = 0x0010;
        const MIDDLE_UP = 0x0020;
        const WHEEL = 0x0400;
        const HWHEEL = 0x0800;
        const _ = !0;
    }

    /// `MOUSEINPUT::dwFlags` (`MOUSEEVENTF_*`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct MouseEventFlags: u32 {
        const MOVE = 0x0001;
        const WHEEL = 0x0800;
    }
}

/// One mouse-class Raw Input packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawMouseEvent {
    /// Device that produced the packet.
    pub device: DeviceHandle,
    pub axis_flags: AxisFlags,
    pub button_flags: ButtonFlags,
    /// Horizontal delta (raw counts).
    pub last_x: i32,
    /// Vertical delta (raw counts).
    pub last_y: i32,
}

/// Synthetic pointer input to inject.
///
/// `dx`/`dy` are informational for a wheel event; the OS only reads `wheel_delta`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntheticScroll {
    pub dx: i32,
    pub dy: i32,
    pub wheel_delta: i32,
    pub flags: MouseEventFlags,
}

impl SyntheticScroll {
    /// Scroll event for a vertical displacement of `v` raw counts.
    ///
    /// `dy` carries the inverted displacement while `wheel_delta` keeps the sign of `v`.
    pub fn from_vertical(v: i32) -> Self {
        let wheel = i64::from(v) * i64::from(WHEEL_DELTA) / i64::from(COUNTS_PER_NOTCH);
        Self {
            dx: 0,
            dy: v.wrapping_neg(),
            wheel_delta: wheel.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            flags: MouseEventFlags::WHEEL | MouseEventFlags::MOVE,
        }
    }
}

/// Outcome of offering one raw packet to the translator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// A synthetic event was submitted; default processing is skipped.
    Handled,
    /// Not ours; pass to default processing.
    Unhandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_notch_per_six_counts() {
        let s = SyntheticScroll::from_vertical(-6);
        assert_eq!(s.dx, 0);
        assert_eq!(s.dy, 6);
        assert_eq!(s.wheel_delta, -120);
        assert_eq!(s.flags, MouseEventFlags::WHEEL | MouseEventFlags::MOVE);
    }

    #[test]
    fn wheel_delta_truncates_toward_zero() {
        // 7 * 120 / 6 = 140, 1 * 120 / 6 = 20, -1 * 120 / 6 = -20
        assert_eq!(SyntheticScroll::from_vertical(7).wheel_delta, 140);
        assert_eq!(SyntheticScroll::from_vertical(1).wheel_delta, 20);
        assert_eq!(SyntheticScroll::from_vertical(-1).wheel_delta, -20);
        for v in -50..=50 {
            assert_eq!(SyntheticScroll::from_vertical(v).wheel_delta, v * 120 / 6);
        }
    }

    #[test]
    fn extreme_displacement_does_not_overflow() {
        let s = SyntheticScroll::from_vertical(i32::MAX);
        assert_eq!(s.wheel_delta, i32::MAX);
        assert_eq!(s.dy, -i32::MAX);

        let s = SyntheticScroll::from_vertical(i32::MIN);
        assert_eq!(s.wheel_delta, i32::MIN);
        assert_eq!(s.dy, i32::MIN);
    }

    #[test]
    fn flag_bits_match_win32() {
        assert_eq!((MouseEventFlags::WHEEL | MouseEventFlags::MOVE).bits(), 0x0801);
        assert_eq!(AxisFlags::from_bits_retain(0x0040).bits(), 0x0040);
        assert!(!ButtonFlags::from_bits_retain(0x1000).is_empty());
    }
}
