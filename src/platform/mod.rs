//! Platform capabilities consumed by the runtime.
//!
//! The observer and executor only see these traits. The native
//! implementation is backed by the Win32 API; other targets report
//! [`PlatformError::InputUnavailable`] at startup.

#[cfg(test)]
pub mod testing;

use crate::config::{KeyCode, Point};
use std::sync::Arc;

/// Reads the current pointer location.
pub trait PointerSource: Send + Sync {
    /// Returns `None` when the location cannot be read (e.g. secure desktop).
    fn pointer_location(&self) -> Option<Point>;
}

/// Injects synthetic key events.
pub trait KeyInjector: Send + Sync {
    fn key_press(&self, key: KeyCode) -> Result<(), PlatformError>;
    fn key_release(&self, key: KeyCode) -> Result<(), PlatformError>;
}

/// Reports the primary screen dimensions.
pub trait ScreenInfo: Send + Sync {
    fn primary_screen_size(&self) -> Result<(i32, i32), PlatformError>;
}

/// Errors raised by the platform layer.
#[derive(Debug)]
pub enum PlatformError {
    /// Input injection cannot be used on this system.
    InputUnavailable(String),
    /// The system rejected an injected event.
    InjectionFailed { key: KeyCode, reason: String },
    /// The key has no native equivalent.
    UnmappedKey(KeyCode),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::InputUnavailable(e) => write!(f, "Input injection unavailable: {}", e),
            PlatformError::InjectionFailed { key, reason } => {
                write!(f, "Failed to inject {}: {}", key, reason)
            }
            PlatformError::UnmappedKey(key) => write!(f, "No native key for {}", key),
        }
    }
}

impl std::error::Error for PlatformError {}

/// The capabilities of the running system, bundled.
#[derive(Clone)]
pub struct Platform {
    pub pointer: Arc<dyn PointerSource>,
    pub keyboard: Arc<dyn KeyInjector>,
    pub screen: Arc<dyn ScreenInfo>,
}

impl Platform {
    /// Acquires the native platform.
    ///
    /// Fails when synthetic input cannot be delivered, since no zone could
    /// ever act.
    #[cfg(windows)]
    pub fn native() -> Result<Self, PlatformError> {
        let native = Arc::new(crate::winapi_utils::WinApiPlatform::acquire()?);
        Ok(Self {
            pointer: native.clone(),
            keyboard: native.clone(),
            screen: native,
        })
    }

    #[cfg(not(windows))]
    pub fn native() -> Result<Self, PlatformError> {
        Err(PlatformError::InputUnavailable(format!(
            "no input backend for target OS '{}'",
            std::env::consts::OS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlatformError::InjectionFailed {
            key: KeyCode::TAB,
            reason: "blocked".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to inject VK_TAB (9): blocked");
        assert_eq!(
            PlatformError::UnmappedKey(KeyCode::UNDEFINED).to_string(),
            "No native key for VK_UNDEFINED (0)"
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_native_unavailable_off_windows() {
        assert!(matches!(
            Platform::native(),
            Err(PlatformError::InputUnavailable(_))
        ));
    }
}
