//! Screen metrics WinAPI wrappers.

use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

/// Gets the primary screen size in pixels.
///
/// Returns `None` if there is no interactive display (both metrics are
/// zero when the call fails).
pub fn get_primary_screen_size() -> Option<(i32, i32)> {
    let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };

    if width <= 0 || height <= 0 {
        None
    } else {
        Some((width, height))
    }
}
