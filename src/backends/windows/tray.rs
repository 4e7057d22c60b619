//! Notification-area icon with a one-item ("Exit") popup menu.

#![cfg(target_os = "windows")]

use super::wide;
use crate::error::StartupError;
use core::mem::{size_of, zeroed};
use core::ptr::null;
use windows_sys::Win32::Foundation::{GetLastError, HWND, POINT};
use windows_sys::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, SendMessageW, SetForegroundWindow,
    TrackPopupMenu, HICON, MF_STRING, TPM_BOTTOMALIGN, TPM_LEFTALIGN, TPM_LEFTBUTTON, WM_NULL,
    WM_USER,
};

/// Callback message the shell posts for icon clicks.
pub const WM_USER_SHELLICON: u32 = WM_USER + 1;

/// Command id of the "Exit" menu item.
pub const ID_POPUP_EXIT: u16 = 1001;

const TRAY_ICON_ID: u32 = 1;

/// Tray icon registration. Removed from the shell on drop.
pub struct TrayIcon {
    data: NOTIFYICONDATAW,
}

impl TrayIcon {
    pub fn new(hwnd: HWND, icon: HICON, tip: &str) -> Self {
        let mut sz_tip = [0u16; 128];
        for (dst, src) in sz_tip.iter_mut().take(127).zip(tip.encode_utf16()) {
            *dst = src;
        }

        let mut data: NOTIFYICONDATAW = unsafe { zeroed() };
        data.cbSize = size_of::<NOTIFYICONDATAW>() as u32;
        data.hWnd = hwnd;
        data.uID = TRAY_ICON_ID;
        data.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
        data.uCallbackMessage = WM_USER_SHELLICON;
        data.hIcon = icon;
        data.szTip = sz_tip;
        Self { data }
    }

    /// Show the icon. Also used to re-add it after Explorer restarts.
    pub fn add(&self) -> Result<(), StartupError> {
        if unsafe { Shell_NotifyIconW(NIM_ADD, &self.data) } == 0 {
            return Err(StartupError::Platform {
                what: "Shell_NotifyIcon",
                code: unsafe { GetLastError() },
            });
        }
        Ok(())
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        unsafe {
            Shell_NotifyIconW(NIM_DELETE, &self.data);
        }
    }
}

/// Pop up the tray menu at the cursor and block until it closes.
///
/// A chosen item arrives later as `WM_COMMAND`.
pub fn show_menu(hwnd: HWND) -> Result<(), StartupError> {
    let exit = wide("Exit");
    unsafe {
        let menu = CreatePopupMenu();
        if menu.is_null() {
            return Err(StartupError::Platform {
                what: "CreatePopupMenu",
                code: GetLastError(),
            });
        }
        if AppendMenuW(menu, MF_STRING, ID_POPUP_EXIT as usize, exit.as_ptr()) == 0 {
            let code = GetLastError();
            DestroyMenu(menu);
            return Err(StartupError::Platform {
                what: "AppendMenu",
                code,
            });
        }

        let mut pos = POINT { x: 0, y: 0 };
        GetCursorPos(&mut pos);
        // Without this the menu does not close when clicking elsewhere.
        SetForegroundWindow(hwnd);
        TrackPopupMenu(
            menu,
            TPM_LEFTALIGN | TPM_LEFTBUTTON | TPM_BOTTOMALIGN,
            pos.x,
            pos.y,
            0,
            hwnd,
            null(),
        );
        SendMessageW(hwnd, WM_NULL, 0, 0);

        DestroyMenu(menu);
    }
    Ok(())
}
