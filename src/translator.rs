//! Input translator: raw touchpad motion to wheel scrolling.
//!
//! Stateless apart from the resolved device handle. Every packet is decided on its own:
//! - wrong device: unhandled
//! - any axis flag or button flag: unhandled
//! - zero vertical delta: unhandled
//! - otherwise: one [`SyntheticScroll`] is submitted and the packet is handled
//!
//! Injection failures are logged and still count as handled.

use crate::device::DeviceHandle;
use crate::error::InjectError;
use crate::event::{Disposition, RawMouseEvent, SyntheticScroll};
use tracing::{trace, warn};

/// Sink for synthetic pointer input (`SendInput` on Windows).
pub trait InputInjector {
    fn inject(&mut self, scroll: &SyntheticScroll) -> Result<(), InjectError>;
}

/// Per-packet scroll translator bound to one device.
#[derive(Clone, Copy, Debug)]
pub struct InputTranslator {
    device: DeviceHandle,
}

impl InputTranslator {
    pub fn new(device: DeviceHandle) -> Self {
        Self { device }
    }

    #[inline]
    pub fn device(&self) -> DeviceHandle {
        self.device
    }

    /// The scroll event `event` translates to, if any. Does not inject.
    pub fn translate(&self, event: &RawMouseEvent) -> Option<SyntheticScroll> {
        if event.device != self.device {
            return None;
        }
        if !event.axis_flags.is_empty() || !event.button_flags.is_empty() {
            return None;
        }
        if event.last_y == 0 {
            return None;
        }
        Some(SyntheticScroll::from_vertical(event.last_y))
    }

    /// Translate `event` and submit the result through `injector`.
    pub fn on_raw_event<I>(&self, event: &RawMouseEvent, injector: &mut I) -> Disposition
    where
        I: InputInjector + ?Sized,
    {
        let Some(scroll) = self.translate(event) else {
            return Disposition::Unhandled;
        };

        trace!(
            last_y = event.last_y,
            wheel = scroll.wheel_delta,
            "injecting scroll"
        );
        if let Err(e) = injector.inject(&scroll) {
            warn!("{e}");
        }
        Disposition::Handled
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::event::{AxisFlags, ButtonFlags, MouseEventFlags};

    /// Records every injected event.
    #[derive(Default)]
    pub(crate) struct RecordingInjector {
        pub injected: Vec<SyntheticScroll>,
        pub reject: bool,
    }

    impl InputInjector for RecordingInjector {
        fn inject(&mut self, scroll: &SyntheticScroll) -> Result<(), InjectError> {
            self.injected.push(*scroll);
            if self.reject {
                Err(InjectError::Rejected { code: 5 })
            } else {
                Ok(())
            }
        }
    }

    const TOUCHPAD: DeviceHandle = DeviceHandle::from_raw(0x10);

    fn motion(device: DeviceHandle, last_y: i32) -> RawMouseEvent {
        RawMouseEvent {
            device,
            axis_flags: AxisFlags::empty(),
            button_flags: ButtonFlags::empty(),
            last_x: 0,
            last_y,
        }
    }

    #[test]
    fn other_devices_pass_through() {
        let t = InputTranslator::new(TOUCHPAD);
        let mut inj = RecordingInjector::default();
        for raw in [0x0, 0x11, 0xdead] {
            let ev = motion(DeviceHandle::from_raw(raw), -6);
            assert_eq!(t.on_raw_event(&ev, &mut inj), Disposition::Unhandled);
        }
        assert!(inj.injected.is_empty());
    }

    #[test]
    fn vertical_motion_becomes_scroll() {
        let t = InputTranslator::new(TOUCHPAD);
        let mut inj = RecordingInjector::default();
        for v in [-100, -7, -1, 1, 3, 6, 13, 250] {
            assert_eq!(t.on_raw_event(&motion(TOUCHPAD, v), &mut inj), Disposition::Handled);
            let s = inj.injected.last().copied().unwrap();
            assert_eq!(s.dx, 0);
            assert_eq!(s.dy, -v);
            assert_eq!(s.wheel_delta, v * 120 / 6);
            assert_eq!(s.flags, MouseEventFlags::WHEEL | MouseEventFlags::MOVE);
        }
        assert_eq!(inj.injected.len(), 8);
    }

    #[test]
    fn zero_vertical_delta_is_ignored() {
        let t = InputTranslator::new(TOUCHPAD);
        let mut inj = RecordingInjector::default();
        let mut ev = motion(TOUCHPAD, 0);
        ev.last_x = 40;
        assert_eq!(t.on_raw_event(&ev, &mut inj), Disposition::Unhandled);
        assert!(inj.injected.is_empty());
    }

    #[test]
    fn flagged_packets_are_ignored() {
        let t = InputTranslator::new(TOUCHPAD);
        let mut inj = RecordingInjector::default();

        let mut absolute = motion(TOUCHPAD, -6);
        absolute.axis_flags = AxisFlags::MOVE_ABSOLUTE;
        let mut unknown_axis = motion(TOUCHPAD, -6);
        unknown_axis.axis_flags = AxisFlags::from_bits_retain(0x0100);
        let mut click = motion(TOUCHPAD, -6);
        click.button_flags = ButtonFlags::LEFT_DOWN;
        let mut wheel = motion(TOUCHPAD, 12);
        wheel.button_flags = ButtonFlags::WHEEL;

        for ev in [absolute, unknown_axis, click, wheel] {
            assert_eq!(t.on_raw_event(&ev, &mut inj), Disposition::Unhandled);
        }
        assert!(inj.injected.is_empty());
    }

    #[test]
    fn rejected_injection_still_handled() {
        let t = InputTranslator::new(TOUCHPAD);
        let mut inj = RecordingInjector {
            reject: true,
            ..RecordingInjector::default()
        };
        assert_eq!(t.on_raw_event(&motion(TOUCHPAD, 6), &mut inj), Disposition::Handled);
        assert_eq!(inj.injected.len(), 1);
    }

    #[test]
    fn translate_does_not_inject() {
        let t = InputTranslator::new(TOUCHPAD);
        let s = t.translate(&motion(TOUCHPAD, -6)).unwrap();
        assert_eq!((s.dx, s.dy, s.wheel_delta), (0, 6, -120));
        assert_eq!(t.translate(&motion(TOUCHPAD, 0)), None);
    }
}
