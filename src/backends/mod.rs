//! Platform backends.
//!
//! The core (resolver, translator, config) is platform-independent; the only substrate
//! that exists is Windows Raw Input + `SendInput`.

#[cfg(target_os = "windows")]
pub mod windows;
