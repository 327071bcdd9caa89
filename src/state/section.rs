//! Active Section Tracking - which section the viewer is looking at.
//!
//! The page is an ordered set of sections. As the viewer scrolls, each
//! section's visible proportion changes; when a section crosses the
//! visibility threshold it becomes the active section, and the nav bar
//! highlights its label.
//!
//! The visibility primitive is abstracted behind [`RegionObserver`] so the
//! tracker is testable without a terminal. Subscriptions follow the
//! framework convention: subscribing returns a cleanup closure that is the
//! unsubscribe.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::state::section::SectionTracker;
//!
//! let mut tracker = SectionTracker::new(&ids, &viewport);
//! let active = tracker.active_signal(); // Signal<String> for the nav
//!
//! // ... viewer scrolls, viewport fires crossing events ...
//!
//! tracker.release(); // every subscription released together
//! ```

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{Signal, signal};

// =============================================================================
// OBSERVER CAPABILITY
// =============================================================================

/// Visibility notification capability.
///
/// `subscribe` registers interest in one region's threshold crossings and
/// returns the unsubscribe as a cleanup closure. A region with no mounted
/// geometry yields `None`: the caller skips it silently and simply never
/// receives crossings for it.
pub trait RegionObserver {
    fn subscribe(&self, region_id: &str, on_cross: Box<dyn Fn()>) -> Option<Box<dyn FnOnce()>>;
}

// =============================================================================
// SECTION TRACKER
// =============================================================================

/// Tracks the active section across an ordered set of section ids.
///
/// The active id starts as the first id of the sequence and is updated by
/// crossing events: the most recent crossing wins, with no priority among
/// regions that cross together.
pub struct SectionTracker {
    active: Signal<String>,
    ids: Vec<String>,
    alive: Rc<Cell<bool>>,
    cleanups: Vec<Box<dyn FnOnce()>>,
}

impl SectionTracker {
    /// Create a tracker over `ids` and subscribe each section region.
    ///
    /// `ids` is expected to be non-empty with unique entries; given an empty
    /// sequence the tracker degrades to an empty active id and zero
    /// subscriptions rather than failing.
    pub fn new(ids: &[String], observer: &dyn RegionObserver) -> Self {
        let first = ids.first().cloned().unwrap_or_default();
        let mut tracker = Self {
            active: signal(first),
            ids: Vec::new(),
            alive: Rc::new(Cell::new(true)),
            cleanups: Vec::new(),
        };
        tracker.subscribe_all(ids, observer);
        tracker
    }

    /// Current active section id.
    pub fn active(&self) -> String {
        self.active.get()
    }

    /// The active-id signal, for reactive consumers (nav renderer).
    pub fn active_signal(&self) -> Signal<String> {
        self.active.clone()
    }

    /// Ids the tracker was last set up with.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.cleanups.len()
    }

    /// Re-entrant setup against a (possibly new) id sequence.
    ///
    /// All prior subscriptions are released before the new set is
    /// established; a subscription from a previous setup surviving this call
    /// is a defect. The active id is kept when the new sequence still
    /// contains it, otherwise it resets to the new first id.
    pub fn observe(&mut self, ids: &[String], observer: &dyn RegionObserver) {
        self.release();
        self.alive = Rc::new(Cell::new(true));
        if !ids.iter().any(|id| *id == self.active.get()) {
            self.active.set(ids.first().cloned().unwrap_or_default());
        }
        self.subscribe_all(ids, observer);
    }

    /// Release every live subscription.
    ///
    /// Crossing events delivered after this point are discarded: the alive
    /// flag shared with the callbacks is lowered before the cleanups run, so
    /// a late event is a no-op rather than a stale write.
    pub fn release(&mut self) {
        self.alive.set(false);
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
        self.ids.clear();
    }

    fn subscribe_all(&mut self, ids: &[String], observer: &dyn RegionObserver) {
        self.ids = ids.to_vec();
        for id in ids {
            let active = self.active.clone();
            let alive = self.alive.clone();
            let region = id.clone();
            let on_cross = Box::new(move || {
                if alive.get() {
                    active.set(region.clone());
                }
            });
            // None = region not mounted: skipped, non-fatal
            if let Some(cleanup) = observer.subscribe(id, on_cross) {
                self.cleanups.push(cleanup);
            }
        }
    }
}

impl Drop for SectionTracker {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// Tests
// =============================================================================
