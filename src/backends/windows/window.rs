//! Hidden top-level window: raw input target, tray callback target, message loop.
//!
//! The [`AppState`] lives in the window's `GWLP_USERDATA` slot as a leaked `Box`,
//! installed after startup succeeds and reclaimed on `WM_NCDESTROY`. The window
//! procedure only ever takes shared references to it; anything that can re-enter the
//! procedure (menu tracking, warning boxes, `DestroyWindow`) runs after that borrow has ended.

#![cfg(target_os = "windows")]

use super::diag::show_warning;
use super::inject::SendInputInjector;
use super::raw_input::read_wm_input;
use super::tray::{show_menu, TrayIcon, ID_POPUP_EXIT, WM_USER_SHELLICON};
use super::{wide, APP_NAME};
use crate::app::AppContext;
use crate::error::StartupError;
use crate::event::{Disposition, RawMouseEvent};
use crate::translator::InputInjector;
use core::mem::{size_of, zeroed};
use core::ptr::{null, null_mut};
use tracing::{debug, trace};
use windows_sys::Win32::Foundation::{GetLastError, HWND, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::WindowsAndMessaging::*;

#[cfg(target_pointer_width = "32")]
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GetWindowLongW as GetWindowLongPtrW, SetWindowLongW as SetWindowLongPtrW,
};

/// Everything the window procedure needs after startup.
pub(crate) struct AppState {
    pub ctx: AppContext,
    pub tray: TrayIcon,
    /// Registered `TaskbarCreated` message id (0 if registration failed).
    pub taskbar_created: u32,
}

/// What the window procedure does once the state borrow has ended.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Default,
    Return(LRESULT),
    ShowMenu,
    Destroy(LRESULT),
    /// Show a modal warning, then destroy the window.
    WarnAndDestroy(String, LRESULT),
}

#[inline]
fn loword(v: usize) -> u32 {
    (v & 0xFFFF) as u32
}

/// Decide a `WM_INPUT` message.
///
/// Only background-sink delivery (`RIM_INPUTSINK`) is translated; `read` is not called
/// for anything else.
fn input_reply<R, I>(wparam: WPARAM, read: R, ctx: &AppContext, injector: &mut I) -> Reply
where
    R: FnOnce() -> Option<RawMouseEvent>,
    I: InputInjector + ?Sized,
{
    if wparam as u32 != RIM_INPUTSINK {
        return Reply::Default;
    }
    let Some(event) = read() else {
        return Reply::Default;
    };
    match ctx.on_raw_event(&event, injector) {
        Disposition::Handled => Reply::Return(0),
        Disposition::Unhandled => Reply::Default,
    }
}

/// Outcome of re-adding the tray icon after `TaskbarCreated`.
///
/// A failure is only reported once the state borrow has ended, because the warning box
/// runs a modal loop that can destroy the window.
fn tray_readd_reply(added: Result<(), StartupError>) -> Option<Reply> {
    added
        .err()
        .map(|e| Reply::WarnAndDestroy(e.to_string(), -1))
}

impl AppState {
    fn dispatch(&self, msg: u32, wparam: WPARAM, lparam: LPARAM) -> Reply {
        // Not a constant, so it cannot be a match arm.
        if self.taskbar_created != 0 && msg == self.taskbar_created {
            debug!("taskbar recreated, re-adding tray icon");
            if let Some(reply) = tray_readd_reply(self.tray.add()) {
                return reply;
            }
        }

        match msg {
            WM_INPUT => input_reply(
                wparam,
                || read_wm_input(lparam),
                &self.ctx,
                &mut SendInputInjector,
            ),
            WM_USER_SHELLICON => match loword(lparam as usize) {
                WM_LBUTTONDOWN | WM_RBUTTONDOWN => Reply::ShowMenu,
                _ => Reply::Default,
            },
            WM_COMMAND if loword(wparam) == ID_POPUP_EXIT as u32 => Reply::Destroy(0),
            WM_CLOSE => Reply::Destroy(0),
            WM_DESTROY => {
                unsafe { PostQuitMessage(0) };
                Reply::Return(0)
            }
            _ => Reply::Default,
        }
    }
}

unsafe fn state_ptr(hwnd: HWND) -> *mut AppState {
    GetWindowLongPtrW(hwnd, GWLP_USERDATA) as usize as *mut AppState
}

unsafe extern "system" fn wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let state = state_ptr(hwnd);

    if msg == WM_NCDESTROY && !state.is_null() {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
        // Drops the tray icon as well.
        drop(Box::from_raw(state));
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    let reply = match state.as_ref() {
        Some(state) => state.dispatch(msg, wparam, lparam),
        None => Reply::Default,
    };

    match reply {
        Reply::Default => DefWindowProcW(hwnd, msg, wparam, lparam),
        Reply::Return(r) => r,
        Reply::ShowMenu => match show_menu(hwnd) {
            Ok(()) => 0,
            Err(e) => {
                show_warning(&e.to_string());
                -1
            }
        },
        Reply::Destroy(r) => {
            DestroyWindow(hwnd);
            r
        }
        Reply::WarnAndDestroy(text, r) => {
            show_warning(&text);
            DestroyWindow(hwnd);
            r
        }
    }
}

/// The application's (never shown) top-level window.
pub(crate) struct MessageWindow {
    hwnd: HWND,
    icon: HICON,
}

impl MessageWindow {
    pub fn create() -> Result<Self, StartupError> {
        let class = wide(APP_NAME);
        unsafe {
            let hinstance = GetModuleHandleW(null());
            let icon = LoadIconW(null_mut(), IDI_APPLICATION);

            let wc = WNDCLASSEXW {
                cbSize: size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(wndproc),
                cbClsExtra: 0,
                cbWndExtra: 0,
                hInstance: hinstance,
                hIcon: icon,
                hCursor: LoadCursorW(null_mut(), IDC_ARROW),
                hbrBackground: null_mut(),
                lpszMenuName: null(),
                lpszClassName: class.as_ptr(),
                hIconSm: icon,
            };
            if RegisterClassExW(&wc) == 0 {
                return Err(StartupError::Platform {
                    what: "RegisterClassEx",
                    code: GetLastError(),
                });
            }

            let hwnd = CreateWindowExW(
                WS_EX_CLIENTEDGE,
                class.as_ptr(),
                class.as_ptr(),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                null_mut(),
                null_mut(),
                hinstance,
                null(),
            );
            if hwnd.is_null() {
                return Err(StartupError::Platform {
                    what: "CreateWindowEx",
                    code: GetLastError(),
                });
            }

            Ok(Self { hwnd, icon })
        }
    }

    #[inline]
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    #[inline]
    pub fn icon(&self) -> HICON {
        self.icon
    }

    /// Hand `state` to the window procedure for the rest of the window's life.
    pub fn attach(&self, state: AppState) {
        let ptr = Box::into_raw(Box::new(state));
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, ptr as usize as _);
        }
    }
}

impl Drop for MessageWindow {
    fn drop(&mut self) {
        unsafe {
            if IsWindow(self.hwnd) != 0 {
                DestroyWindow(self.hwnd);
            }
        }
    }
}

/// Register the `TaskbarCreated` broadcast (sent when Explorer restarts).
pub(crate) fn taskbar_created_message() -> u32 {
    let name = wide("TaskbarCreated");
    unsafe { RegisterWindowMessageW(name.as_ptr()) }
}

/// Pump messages until `WM_QUIT`.
pub(crate) fn message_loop() -> Result<(), StartupError> {
    let mut msg: MSG = unsafe { zeroed() };
    loop {
        match unsafe { GetMessageW(&mut msg, null_mut(), 0, 0) } {
            0 => {
                trace!("WM_QUIT");
                return Ok(());
            }
            -1 => {
                return Err(StartupError::EventLoopFatal {
                    code: unsafe { GetLastError() },
                })
            }
            _ => unsafe {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceHandle;
    use crate::event::{AxisFlags, ButtonFlags};
    use crate::translator::tests::RecordingInjector;

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
    fn failed_tray_readd_defers_warning() {
        let failed = Err(StartupError::Platform {
            what: "Shell_NotifyIcon",
            code: 5,
        });
        assert_eq!(
            tray_readd_reply(failed),
            Some(Reply::WarnAndDestroy("Shell_NotifyIcon failed: 5".into(), -1))
        );
        assert_eq!(tray_readd_reply(Ok(())), None);
    }

    #[test]
    fn foreground_delivery_is_not_translated() {
        let ctx = AppContext::with_device(TOUCHPAD);
        let mut inj = RecordingInjector::default();
        let mut read = false;
        let reply = input_reply(
            RIM_INPUT as WPARAM,
            || {
                read = true;
                Some(motion(TOUCHPAD, -6))
            },
            &ctx,
            &mut inj,
        );
        assert_eq!(reply, Reply::Default);
        assert!(!read);
        assert!(inj.injected.is_empty());
    }

    #[test]
    fn handled_sink_packet_returns_zero() {
        let ctx = AppContext::with_device(TOUCHPAD);
        let mut inj = RecordingInjector::default();
        let reply = input_reply(
            RIM_INPUTSINK as WPARAM,
            || Some(motion(TOUCHPAD, -6)),
            &ctx,
            &mut inj,
        );
        assert_eq!(reply, Reply::Return(0));
        assert_eq!(inj.injected.len(), 1);
        assert_eq!(inj.injected[0].wheel_delta, -120);
    }

    #[test]
    fn unhandled_sink_packet_falls_through() {
        let ctx = AppContext::with_device(TOUCHPAD);
        let mut inj = RecordingInjector::default();
        let other = DeviceHandle::from_raw(0x20);
        let reply = input_reply(
            RIM_INPUTSINK as WPARAM,
            || Some(motion(other, -6)),
            &ctx,
            &mut inj,
        );
        assert_eq!(reply, Reply::Default);
        assert!(inj.injected.is_empty());
    }

    #[test]
    fn unreadable_packet_falls_through() {
        let ctx = AppContext::with_device(TOUCHPAD);
        let mut inj = RecordingInjector::default();
        let reply = input_reply(RIM_INPUTSINK as WPARAM, || None, &ctx, &mut inj);
        assert_eq!(reply, Reply::Default);
        assert!(inj.injected.is_empty());
    }
}
