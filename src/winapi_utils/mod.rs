//! Safe wrappers around Windows API calls.
//!
//! This module provides safe Rust abstractions over the unsafe WinAPI
//! functions the runtime needs: cursor position, screen metrics and
//! synthetic keyboard input.

pub mod cursor;
pub mod keyboard;
pub mod screen;

pub use cursor::*;
pub use keyboard::*;
pub use screen::*;

use crate::config::{KeyCode, Point};
use crate::platform::{KeyInjector, PlatformError, PointerSource, ScreenInfo};

/// Native platform backed by the Win32 API.
pub struct WinApiPlatform {
    _private: (),
}

impl WinApiPlatform {
    /// Checks that the session has an interactive desktop to inject into.
    pub fn acquire() -> Result<Self, PlatformError> {
        match get_primary_screen_size() {
            Some((width, height)) => {
                tracing::info!(width, height, "Win32 input backend ready");
                Ok(Self { _private: () })
            }
            None => Err(PlatformError::InputUnavailable(
                "no interactive desktop in this session".to_string(),
            )),
        }
    }
}

impl PointerSource for WinApiPlatform {
    fn pointer_location(&self) -> Option<Point> {
        get_cursor_pos()
    }
}

impl KeyInjector for WinApiPlatform {
    fn key_press(&self, key: KeyCode) -> Result<(), PlatformError> {
        send_key(key, false)
    }

    fn key_release(&self, key: KeyCode) -> Result<(), PlatformError> {
        send_key(key, true)
    }
}

impl ScreenInfo for WinApiPlatform {
    fn primary_screen_size(&self) -> Result<(i32, i32), PlatformError> {
        get_primary_screen_size().ok_or_else(|| {
            PlatformError::InputUnavailable("primary screen size unavailable".to_string())
        })
    }
}
