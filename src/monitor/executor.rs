//! Chorded key sequence injection.
//!
//! All keys of a sequence are pressed in order, then released in the same
//! order, so that shortcuts like Ctrl+Alt+Tab register as held together.

use crate::config::{KeyCode, KeyCodeSequence, COMMAND_STACK_SIZE};
use crate::diagnostics::{diag, Diagnostics};
use crate::platform::{KeyInjector, PlatformError};
use std::sync::Arc;

/// Plays key sequences through a [`KeyInjector`].
pub struct KeystrokeExecutor {
    keyboard: Arc<dyn KeyInjector>,
    diagnostics: Diagnostics,
}

impl KeystrokeExecutor {
    pub fn new(keyboard: Arc<dyn KeyInjector>, diagnostics: Diagnostics) -> Self {
        Self {
            keyboard,
            diagnostics,
        }
    }

    /// Presses every defined key in order, then releases them in order.
    ///
    /// If a press fails, the keys already held are released before the
    /// error is returned.
    pub fn execute(&self, sequence: &KeyCodeSequence) -> Result<(), PlatformError> {
        let mut pressed = Vec::with_capacity(COMMAND_STACK_SIZE);

        for key in sequence.keys() {
            diag!(self.diagnostics, %key, "Key press");
            if let Err(e) = self.keyboard.key_press(key) {
                if let Err(release) = self.release_all(&pressed) {
                    tracing::error!(
                        %release,
                        held = pressed.len(),
                        "Cleanup after failed press incomplete"
                    );
                }
                return Err(e);
            }
            pressed.push(key);
        }

        self.release_all(&pressed)
    }

    /// Releases `keys` in order; returns the first failure.
    fn release_all(&self, keys: &[KeyCode]) -> Result<(), PlatformError> {
        let mut result = Ok(());

        for &key in keys {
            diag!(self.diagnostics, %key, "Key release");
            if let Err(e) = self.keyboard.key_release(key) {
                tracing::warn!(%e, "Key release failed");
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::{KeyEvent, RecordingInjector};

    fn executor(injector: &Arc<RecordingInjector>) -> KeystrokeExecutor {
        KeystrokeExecutor::new(injector.clone(), Diagnostics::default())
    }

    #[test]
    fn test_press_all_then_release_all_in_order() {
        let injector = Arc::new(RecordingInjector::new());
        let sequence =
            KeyCodeSequence::from_codes(&[KeyCode::CONTROL, KeyCode::ALT, KeyCode::TAB]).unwrap();

        executor(&injector).execute(&sequence).unwrap();

        assert_eq!(
            injector.events(),
            vec![
                KeyEvent::Press(KeyCode::CONTROL),
                KeyEvent::Press(KeyCode::ALT),
                KeyEvent::Press(KeyCode::TAB),
                KeyEvent::Release(KeyCode::CONTROL),
                KeyEvent::Release(KeyCode::ALT),
                KeyEvent::Release(KeyCode::TAB),
            ]
        );
    }

    #[test]
    fn test_undefined_slots_are_skipped() {
        let injector = Arc::new(RecordingInjector::new());
        let sequence = KeyCodeSequence::from_codes(&[
            KeyCode::WINDOWS,
            KeyCode::UNDEFINED,
            KeyCode::D,
        ])
        .unwrap();

        executor(&injector).execute(&sequence).unwrap();

        assert_eq!(
            injector.events(),
            vec![
                KeyEvent::Press(KeyCode::WINDOWS),
                KeyEvent::Press(KeyCode::D),
                KeyEvent::Release(KeyCode::WINDOWS),
                KeyEvent::Release(KeyCode::D),
            ]
        );
    }

    #[test]
    fn test_empty_sequence_injects_nothing() {
        let injector = Arc::new(RecordingInjector::new());
        executor(&injector)
            .execute(&KeyCodeSequence::default())
            .unwrap();
        assert!(injector.events().is_empty());
    }

    #[test]
    fn test_failed_press_releases_held_keys() {
        let injector = Arc::new(RecordingInjector::failing_on(KeyCode::TAB));
        let sequence =
            KeyCodeSequence::from_codes(&[KeyCode::CONTROL, KeyCode::ALT, KeyCode::TAB]).unwrap();

        let err = executor(&injector).execute(&sequence).unwrap_err();
        assert!(matches!(err, PlatformError::InjectionFailed { key, .. } if key == KeyCode::TAB));

        assert_eq!(
            injector.events(),
            vec![
                KeyEvent::Press(KeyCode::CONTROL),
                KeyEvent::Press(KeyCode::ALT),
                KeyEvent::Release(KeyCode::CONTROL),
                KeyEvent::Release(KeyCode::ALT),
            ]
        );
    }

    #[test]
    fn test_press_error_wins_over_cleanup_error() {
        let injector = Arc::new(
            RecordingInjector::failing_on(KeyCode::TAB).with_failing_release(KeyCode::CONTROL),
        );
        let sequence =
            KeyCodeSequence::from_codes(&[KeyCode::CONTROL, KeyCode::ALT, KeyCode::TAB]).unwrap();

        let err = executor(&injector).execute(&sequence).unwrap_err();
        assert!(matches!(err, PlatformError::InjectionFailed { key, .. } if key == KeyCode::TAB));

        // ALT is still released after CONTROL fails to
        assert_eq!(
            injector.events(),
            vec![
                KeyEvent::Press(KeyCode::CONTROL),
                KeyEvent::Press(KeyCode::ALT),
                KeyEvent::Release(KeyCode::ALT),
            ]
        );
    }
}
