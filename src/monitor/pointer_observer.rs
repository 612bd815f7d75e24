//! Pointer polling and motion detection.
//!
//! This module provides the polling loop that samples the pointer location
//! on a fixed interval and notifies subscribers whenever it has moved.

use crate::config::Point;
use crate::platform::PointerSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Configuration for the pointer observer.
#[derive(Debug, Clone)]
pub struct ObserverConfig {
    /// How often to sample the pointer (default: 10ms).
    pub poll_interval: Duration,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// Receives every new pointer location.
///
/// Called on the polling thread while the observer lock is held, so
/// implementations must not add or remove subscribers from inside
/// [`pointer_moved`](PointerSubscriber::pointer_moved).
pub trait PointerSubscriber: Send + Sync {
    fn pointer_moved(&self, point: Point);
}

/// Handle returned by [`PointerObserver::add_subscriber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Errors that can occur when starting the observer.
#[derive(Debug)]
pub enum ObserverError {
    AlreadyRunning,
    ThreadSpawn(String),
}

impl std::fmt::Display for ObserverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObserverError::AlreadyRunning => write!(f, "Pointer observer is already running"),
            ObserverError::ThreadSpawn(e) => write!(f, "Failed to spawn polling thread: {}", e),
        }
    }
}

impl std::error::Error for ObserverError {}

#[derive(Default)]
struct ObserverState {
    last_sample: Option<Point>,
    subscribers: Vec<(SubscriberId, Arc<dyn PointerSubscriber>)>,
    next_id: u64,
}

struct Shared {
    source: Arc<dyn PointerSource>,
    state: Mutex<ObserverState>,
    running: AtomicBool,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ObserverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Performs a single poll cycle.
    ///
    /// Returns `true` if subscribers were notified.
    fn tick(&self) -> bool {
        let mut state = self.lock();

        let Some(point) = self.source.pointer_location() else {
            return false;
        };
        if state.last_sample == Some(point) {
            return false;
        }
        state.last_sample = Some(point);

        tracing::trace!(%point, subscribers = state.subscribers.len(), "Pointer moved");
        for (_, subscriber) in &state.subscribers {
            subscriber.pointer_moved(point);
        }
        true
    }
}

/// Samples the pointer on a dedicated thread and reports movement.
pub struct PointerObserver {
    shared: Arc<Shared>,
    config: ObserverConfig,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl PointerObserver {
    pub fn new(source: Arc<dyn PointerSource>, config: ObserverConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                state: Mutex::new(ObserverState::default()),
                running: AtomicBool::new(false),
            }),
            config,
            worker: Mutex::new(None),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.config.poll_interval
    }

    pub fn add_subscriber(&self, subscriber: Arc<dyn PointerSubscriber>) -> SubscriberId {
        let mut state = self.shared.lock();
        let id = SubscriberId(state.next_id);
        state.next_id += 1;
        state.subscribers.push((id, subscriber));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn remove_subscriber(&self, id: SubscriberId) -> bool {
        let mut state = self.shared.lock();
        let before = state.subscribers.len();
        state.subscribers.retain(|(existing, _)| *existing != id);
        state.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().subscribers.len()
    }

    /// The last pointer location reported to subscribers.
    pub fn last_sample(&self) -> Option<Point> {
        self.shared.lock().last_sample
    }

    /// Samples the pointer once and notifies subscribers if it moved.
    pub fn tick(&self) -> bool {
        self.shared.tick()
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Spawns the polling thread.
    pub fn start(&self) -> Result<(), ObserverError> {
        if self.shared.running.swap(true, Ordering::SeqCst) {
            return Err(ObserverError::AlreadyRunning);
        }

        let shared = Arc::clone(&self.shared);
        let interval = self.config.poll_interval;

        let handle = thread::Builder::new()
            .name("pointer-observer".to_string())
            .spawn(move || run_polling_loop(shared, interval))
            .map_err(|e| {
                self.shared.running.store(false, Ordering::SeqCst);
                ObserverError::ThreadSpawn(e.to_string())
            })?;

        *self.worker.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        Ok(())
    }

    /// Stops future polling and waits for the thread to exit.
    ///
    /// A tick already in progress runs to completion.
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::SeqCst);

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            // Called from a subscriber: the loop exits on its own
            if handle.thread().id() == thread::current().id() {
                return;
            }
            handle.thread().unpark();
            if handle.join().is_err() {
                tracing::error!("Pointer polling thread panicked");
            }
        }
    }
}

impl Drop for PointerObserver {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_polling_loop(shared: Arc<Shared>, interval: Duration) {
    tracing::info!(
        interval_ms = interval.as_millis() as u64,
        "Pointer polling thread started"
    );

    while shared.running.load(Ordering::SeqCst) {
        shared.tick();
        thread::park_timeout(interval);
    }

    tracing::info!("Pointer polling thread shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::ScriptedPointer;

    #[derive(Default)]
    struct Recorder {
        points: Mutex<Vec<Point>>,
    }

    impl Recorder {
        fn points(&self) -> Vec<Point> {
            self.points.lock().unwrap().clone()
        }
    }

    impl PointerSubscriber for Recorder {
        fn pointer_moved(&self, point: Point) {
            self.points.lock().unwrap().push(point);
        }
    }

    fn observer(source: ScriptedPointer) -> PointerObserver {
        PointerObserver::new(Arc::new(source), ObserverConfig::default())
    }

    #[test]
    fn test_observer_config_default() {
        let config = ObserverConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(10));
    }

    #[test]
    fn test_repeated_sample_is_not_reported() {
        let observer = observer(ScriptedPointer::points([
            Point::new(5, 5),
            Point::new(5, 5),
            Point::new(6, 5),
            Point::new(6, 5),
            Point::new(5, 5),
        ]));
        let recorder = Arc::new(Recorder::default());
        observer.add_subscriber(recorder.clone());

        let notified: Vec<bool> = (0..5).map(|_| observer.tick()).collect();

        assert_eq!(notified, vec![true, false, true, false, true]);
        assert_eq!(
            recorder.points(),
            vec![Point::new(5, 5), Point::new(6, 5), Point::new(5, 5)]
        );
        assert_eq!(observer.last_sample(), Some(Point::new(5, 5)));
    }

    #[test]
    fn test_unreadable_pointer_is_skipped() {
        let observer = observer(ScriptedPointer::new([
            Some(Point::new(1, 1)),
            None,
            Some(Point::new(1, 1)),
        ]));
        let recorder = Arc::new(Recorder::default());
        observer.add_subscriber(recorder.clone());

        assert!(observer.tick());
        assert!(!observer.tick());
        assert!(!observer.tick());
        assert_eq!(recorder.points(), vec![Point::new(1, 1)]);
    }

    #[test]
    fn test_every_subscriber_is_notified() {
        let observer = observer(ScriptedPointer::points([Point::new(0, 0)]));
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        observer.add_subscriber(first.clone());
        observer.add_subscriber(second.clone());

        observer.tick();

        assert_eq!(first.points(), vec![Point::new(0, 0)]);
        assert_eq!(second.points(), vec![Point::new(0, 0)]);
    }

    #[test]
    fn test_remove_subscriber() {
        let observer = observer(ScriptedPointer::points([Point::new(0, 0), Point::new(1, 1)]));
        let recorder = Arc::new(Recorder::default());
        let id = observer.add_subscriber(recorder.clone());

        observer.tick();
        assert!(observer.remove_subscriber(id));
        assert!(!observer.remove_subscriber(id));
        assert_eq!(observer.subscriber_count(), 0);

        observer.tick();
        assert_eq!(recorder.points(), vec![Point::new(0, 0)]);
    }

    #[test]
    fn test_start_twice_fails() {
        let observer = observer(ScriptedPointer::points([Point::new(0, 0)]));
        observer.start().unwrap();
        assert!(matches!(observer.start(), Err(ObserverError::AlreadyRunning)));
        observer.stop();
        assert!(!observer.is_running());
    }

    #[test]
    fn test_polling_thread_reports_once_for_a_still_pointer() {
        let observer = PointerObserver::new(
            Arc::new(ScriptedPointer::points([Point::new(3, 4)])),
            ObserverConfig {
                poll_interval: Duration::from_millis(1),
            },
        );
        let recorder = Arc::new(Recorder::default());
        observer.add_subscriber(recorder.clone());

        observer.start().unwrap();
        thread::sleep(Duration::from_millis(50));
        observer.stop();

        assert_eq!(recorder.points(), vec![Point::new(3, 4)]);

        // No ticks after stop
        thread::sleep(Duration::from_millis(10));
        assert_eq!(recorder.points().len(), 1);
    }

    #[test]
    fn test_restart_after_stop() {
        let observer = observer(ScriptedPointer::points([Point::new(0, 0)]));
        observer.start().unwrap();
        observer.stop();
        observer.start().unwrap();
        assert!(observer.is_running());
        observer.stop();
    }
}
