//! Synthetic keyboard input via `SendInput`.
//!
//! Configuration key codes use the platform-neutral numbering; they are
//! translated to Win32 virtual keys right before injection.

use crate::config::KeyCode;
use crate::platform::PlatformError;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, VIRTUAL_KEY, VK_APPS, VK_CANCEL, VK_CLEAR,
    VK_DELETE, VK_DIVIDE, VK_DOWN, VK_END, VK_ESCAPE, VK_F13, VK_HELP, VK_HOME, VK_INSERT,
    VK_LEFT, VK_LWIN, VK_NEXT, VK_NUMLOCK, VK_OEM_1, VK_OEM_2, VK_OEM_3, VK_OEM_4, VK_OEM_5,
    VK_OEM_6, VK_OEM_7, VK_OEM_COMMA, VK_OEM_MINUS, VK_OEM_PERIOD, VK_OEM_PLUS, VK_PRIOR,
    VK_RETURN, VK_RIGHT, VK_RMENU, VK_SCROLL, VK_SNAPSHOT, VK_UP,
};

/// Translates a configuration key code to a Win32 virtual key.
///
/// Returns `None` for codes with no Win32 equivalent.
pub fn native_virtual_key(key: KeyCode) -> Option<VIRTUAL_KEY> {
    let vk = match key.0 {
        // Codes shared by both numberings: control and IME keys,
        // navigation, digits, letters, numpad and F1-F12
        8 | 9 | 16..=21 | 24 | 25 | 28..=31 | 32..=40 | 48..=57 | 65..=90 | 96..=111
        | 112..=123 => VIRTUAL_KEY(key.0 as u16),
        3 => VK_CANCEL,
        10 => VK_RETURN,
        12 => VK_CLEAR,
        27 => VK_ESCAPE,
        44 => VK_OEM_COMMA,
        45 => VK_OEM_MINUS,
        46 => VK_OEM_PERIOD,
        47 => VK_OEM_2,
        59 => VK_OEM_1,
        61 => VK_OEM_PLUS,
        91 => VK_OEM_4,
        92 => VK_OEM_5,
        93 => VK_OEM_6,
        127 => VK_DELETE,
        144 => VK_NUMLOCK,
        145 => VK_SCROLL,
        154 => VK_SNAPSHOT,
        155 => VK_INSERT,
        156 => VK_HELP,
        157 | 524 => VK_LWIN,
        192 => VK_OEM_3,
        222 => VK_OEM_7,
        224 => VK_UP,
        225 => VK_DOWN,
        226 => VK_LEFT,
        227 => VK_RIGHT,
        525 => VK_APPS,
        0xF000..=0xF00B => VIRTUAL_KEY(VK_F13.0 + (key.0 - 0xF000) as u16),
        0xFF7E => VK_RMENU,
        _ => return None,
    };

    Some(vk)
}

/// Keys that live on the extended part of the keyboard.
fn is_extended(vk: VIRTUAL_KEY) -> bool {
    matches!(
        vk,
        VK_INSERT
            | VK_DELETE
            | VK_HOME
            | VK_END
            | VK_PRIOR
            | VK_NEXT
            | VK_LEFT
            | VK_RIGHT
            | VK_UP
            | VK_DOWN
            | VK_LWIN
            | VK_APPS
            | VK_RMENU
            | VK_DIVIDE
            | VK_NUMLOCK
            | VK_SNAPSHOT
    )
}

/// Sends a single key-down or key-up event.
pub fn send_key(key: KeyCode, release: bool) -> Result<(), PlatformError> {
    let vk = native_virtual_key(key).ok_or(PlatformError::UnmappedKey(key))?;

    let mut flags = KEYBD_EVENT_FLAGS(0);
    if is_extended(vk) {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    if release {
        flags |= KEYEVENTF_KEYUP;
    }

    let input = [INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }];

    let sent = unsafe { SendInput(&input, std::mem::size_of::<INPUT>() as i32) };
    if sent == 0 {
        return Err(PlatformError::InjectionFailed {
            key,
            reason: windows::core::Error::from_win32().to_string(),
        });
    }

    Ok(())
}
