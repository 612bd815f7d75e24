//! In-memory platform doubles for tests.

use super::{KeyInjector, PlatformError, PointerSource, ScreenInfo};
use crate::config::{KeyCode, Point};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A recorded key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Press(KeyCode),
    Release(KeyCode),
}

/// Records every injected event; optionally fails events of one key.
#[derive(Default)]
pub struct RecordingInjector {
    events: Mutex<Vec<KeyEvent>>,
    failing: Option<KeyCode>,
    failing_release: Option<KeyCode>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(key: KeyCode) -> Self {
        Self {
            failing: Some(key),
            ..Self::default()
        }
    }

    pub fn with_failing_release(mut self, key: KeyCode) -> Self {
        self.failing_release = Some(key);
        self
    }

    pub fn events(&self) -> Vec<KeyEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl KeyInjector for RecordingInjector {
    fn key_press(&self, key: KeyCode) -> Result<(), PlatformError> {
        if self.failing == Some(key) {
            return Err(PlatformError::InjectionFailed {
                key,
                reason: "rejected by test".to_string(),
            });
        }
        self.events.lock().unwrap().push(KeyEvent::Press(key));
        Ok(())
    }

    fn key_release(&self, key: KeyCode) -> Result<(), PlatformError> {
        if self.failing_release == Some(key) {
            return Err(PlatformError::InjectionFailed {
                key,
                reason: "rejected by test".to_string(),
            });
        }
        self.events.lock().unwrap().push(KeyEvent::Release(key));
        Ok(())
    }
}

/// Replays a fixed list of pointer samples, then repeats the last one.
pub struct ScriptedPointer {
    samples: Mutex<VecDeque<Option<Point>>>,
    last: Mutex<Option<Point>>,
}

impl ScriptedPointer {
    pub fn new(samples: impl IntoIterator<Item = Option<Point>>) -> Self {
        Self {
            samples: Mutex::new(samples.into_iter().collect()),
            last: Mutex::new(None),
        }
    }

    pub fn points(points: impl IntoIterator<Item = Point>) -> Self {
        Self::new(points.into_iter().map(Some))
    }
}

impl PointerSource for ScriptedPointer {
    fn pointer_location(&self) -> Option<Point> {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.samples.lock().unwrap().pop_front() {
            *last = next;
        }
        *last
    }
}

/// A screen of fixed size.
pub struct FixedScreen(pub i32, pub i32);

impl ScreenInfo for FixedScreen {
    fn primary_screen_size(&self) -> Result<(i32, i32), PlatformError> {
        Ok((self.0, self.1))
    }
}
