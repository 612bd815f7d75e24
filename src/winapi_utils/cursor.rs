//! Cursor position WinAPI wrapper.

use crate::config::Point;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

/// Gets the cursor position in virtual-screen coordinates.
///
/// Returns `None` if the call fails (e.g., while the secure desktop or
/// a UAC prompt is active).
///
/// # Example
/// ```no_run
/// use hotcorners::winapi_utils::get_cursor_pos;
///
/// if let Some(point) = get_cursor_pos() {
///     println!("Cursor at {}", point);
/// }
/// ```
pub fn get_cursor_pos() -> Option<Point> {
    let mut point = POINT::default();
    match unsafe { GetCursorPos(&mut point) } {
        Ok(()) => Some(Point::new(point.x, point.y)),
        Err(e) => {
            tracing::trace!(?e, "GetCursorPos failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cursor_pos_does_not_panic() {
        // Headless sessions may have no cursor; only check it doesn't panic
        let _ = get_cursor_pos();
    }
}
