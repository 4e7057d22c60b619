//! `SendInput` injector.

#![cfg(target_os = "windows")]

use crate::error::InjectError;
use crate::event::SyntheticScroll;
use crate::translator::InputInjector;
use core::mem::size_of;
use windows_sys::Win32::Foundation::GetLastError;
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEINPUT,
};

/// Submits synthetic mouse input to the system input stream.
#[derive(Clone, Copy, Debug, Default)]
pub struct SendInputInjector;

impl InputInjector for SendInputInjector {
    fn inject(&mut self, scroll: &SyntheticScroll) -> Result<(), InjectError> {
        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: scroll.dx,
                    dy: scroll.dy,
                    mouseData: scroll.wheel_delta as _,
                    dwFlags: scroll.flags.bits(),
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };
        let sent = unsafe { SendInput(1, &input, size_of::<INPUT>() as i32) };
        if sent == 1 {
            Ok(())
        } else {
            Err(InjectError::Rejected {
                code: unsafe { GetLastError() },
            })
        }
    }
}
