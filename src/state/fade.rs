//! Fade-In Latches - one-shot reveal per section.
//!
//! A section starts visually muted and "fades in" the first time enough of
//! it scrolls into view. The latch is monotonic: once a section has faded
//! in it stays in, no matter how the viewer scrolls afterwards.
//!
//! The latch set carries a version signal so the render effect re-runs when
//! any section newly fades in.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use spark_signals::{Signal, signal};

/// Monotonic per-section fade-in latches.
pub struct FadeSet {
    shown: Rc<RefCell<HashSet<String>>>,
    version: Signal<u64>,
}

impl FadeSet {
    pub fn new() -> Self {
        Self {
            shown: Rc::new(RefCell::new(HashSet::new())),
            version: signal(0),
        }
    }

    /// Whether `id` has faded in.
    pub fn is_shown(&self, id: &str) -> bool {
        self.shown.borrow().contains(id)
    }

    /// Number of latched sections.
    pub fn shown_count(&self) -> usize {
        self.shown.borrow().len()
    }

    /// Bumped once for each section that newly fades in.
    pub fn version_signal(&self) -> Signal<u64> {
        self.version.clone()
    }

    /// Latch `id` shown. Idempotent.
    pub fn mark_shown(&self, id: &str) {
        let inserted = self.shown.borrow_mut().insert(id.to_string());
        if inserted {
            self.version.set(self.version.get() + 1);
        }
    }

    /// Crossing callback for `id`, for wiring into a viewport observer.
    pub fn crossing_callback(&self, id: &str) -> Box<dyn Fn()> {
        let shown = self.shown.clone();
        let version = self.version.clone();
        let id = id.to_string();
        Box::new(move || {
            let inserted = shown.borrow_mut().insert(id.clone());
            if inserted {
                version.set(version.get() + 1);
            }
        })
    }
}

impl Default for FadeSet {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let fades = FadeSet::new();
        assert!(!fades.is_shown("about"));
        assert_eq!(fades.shown_count(), 0);
    }

    #[test]
    fn test_mark_shown_latches() {
        let fades = FadeSet::new();
        fades.mark_shown("about");
        assert!(fades.is_shown("about"));
        assert!(!fades.is_shown("skills"));
    }

    #[test]
    fn test_latch_is_monotonic_and_idempotent() {
        let fades = FadeSet::new();
        let version = fades.version_signal();

        fades.mark_shown("about");
        assert_eq!(version.get(), 1);

        // Re-marking does not bump the version
        fades.mark_shown("about");
        assert_eq!(version.get(), 1);
        assert!(fades.is_shown("about"));
    }

    #[test]
    fn test_version_bumps_per_new_section() {
        let fades = FadeSet::new();
        let version = fades.version_signal();

        fades.mark_shown("about");
        fades.mark_shown("skills");
        fades.mark_shown("projects");
        assert_eq!(version.get(), 3);
        assert_eq!(fades.shown_count(), 3);
    }

    #[test]
    fn test_crossing_callback_latches() {
        let fades = FadeSet::new();
        let callback = fades.crossing_callback("contact");

        callback();
        assert!(fades.is_shown("contact"));

        // Late duplicate crossings are no-ops
        callback();
        assert_eq!(fades.version_signal().get(), 1);
    }
}
