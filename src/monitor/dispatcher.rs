//! Zone matching.
//!
//! Tests each reported pointer location against every configured zone and
//! plays the key sequence of each zone that contains it.

use super::executor::KeystrokeExecutor;
use super::pointer_observer::PointerSubscriber;
use crate::config::{Point, ZoneMap};
use crate::diagnostics::{diag, Diagnostics};

/// Fires the key sequences of the zones the pointer is in.
pub struct ZoneDispatcher {
    zones: ZoneMap,
    executor: KeystrokeExecutor,
    diagnostics: Diagnostics,
}

impl ZoneDispatcher {
    pub fn new(zones: ZoneMap, executor: KeystrokeExecutor, diagnostics: Diagnostics) -> Self {
        Self {
            zones,
            executor,
            diagnostics,
        }
    }

    pub fn zones(&self) -> &ZoneMap {
        &self.zones
    }

    /// Runs the sequence of every zone containing `point`.
    ///
    /// Overlapping zones all fire, in zone map order. Returns the number
    /// of zones that matched.
    pub fn dispatch(&self, point: Point) -> usize {
        let mut fired = 0;

        for (area, sequence) in self.zones.matching(point) {
            diag!(self.diagnostics, %point, %area, %sequence, "Pointer entered zone");
            fired += 1;

            if let Err(e) = self.executor.execute(sequence) {
                tracing::error!(%e, %area, "Failed to execute key sequence");
            }
        }

        if fired == 0 {
            tracing::trace!(%point, "No zone matched");
        }
        fired
    }
}

impl PointerSubscriber for ZoneDispatcher {
    fn pointer_moved(&self, point: Point) {
        self.dispatch(point);
    }
}
