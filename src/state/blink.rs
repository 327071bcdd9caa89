//! Caret Blink - shared clocks per blink period.
//!
//! The typewriter's trailing caret blinks while the reveal is running. All
//! carets blinking at the same period share a single timer for efficiency
//! and visual sync: the timer starts with the first subscriber and stops
//! when the last one unsubscribes.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::state::blink::{self, DEFAULT_CARET_PERIOD};
//!
//! let unsubscribe = blink::subscribe(DEFAULT_CARET_PERIOD);
//! let visible = blink::phase(DEFAULT_CARET_PERIOD);
//! unsubscribe();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use spark_signals::{Signal, signal};

/// Standard caret blink: one full on/off cycle per second.
pub const DEFAULT_CARET_PERIOD: Duration = Duration::from_millis(1000);

// =============================================================================
// BLINK REGISTRY
// =============================================================================

/// Per-period clock state.
struct BlinkClock {
    /// Phase signal (local, synced from the thread-safe atomic)
    phase: Signal<bool>,
    /// Thread-safe phase written by the timer thread
    phase_atomic: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    /// Lowered to stop the timer thread
    running: Arc<AtomicBool>,
    subscribers: usize,
}

thread_local! {
    static BLINK_CLOCKS: RefCell<HashMap<Duration, BlinkClock>> = RefCell::new(HashMap::new());
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to the blink clock for `period` (one full on/off cycle).
///
/// Returns an unsubscribe function that must be called when done. Multiple
/// subscribers at the same period share one timer. A zero period disables
/// blinking and returns a no-op unsubscribe.
pub fn subscribe(period: Duration) -> Box<dyn FnOnce()> {
    if period.is_zero() {
        return Box::new(|| {});
    }

    BLINK_CLOCKS.with(|clocks| {
        let mut clocks = clocks.borrow_mut();

        let clock = clocks.entry(period).or_insert_with(|| BlinkClock {
            phase: signal(true), // Start visible
            phase_atomic: Arc::new(AtomicBool::new(true)),
            handle: None,
            running: Arc::new(AtomicBool::new(false)),
            subscribers: 0,
        });

        clock.subscribers += 1;

        // Start timer with the first subscriber
        if clock.subscribers == 1 {
            // Toggle at half the period: a 1s cycle flips every 500ms
            let half = period / 2;
            let phase_atomic = clock.phase_atomic.clone();
            let running = clock.running.clone();
            running.store(true, Ordering::SeqCst);

            clock.handle = Some(thread::spawn(move || {
                while running.load(Ordering::SeqCst) {
                    thread::sleep(half);
                    if running.load(Ordering::SeqCst) {
                        let current = phase_atomic.load(Ordering::SeqCst);
                        phase_atomic.store(!current, Ordering::SeqCst);
                    }
                }
            }));
        }
    });

    Box::new(move || {
        BLINK_CLOCKS.with(|clocks| {
            let mut clocks = clocks.borrow_mut();
            if let Some(clock) = clocks.get_mut(&period) {
                clock.subscribers = clock.subscribers.saturating_sub(1);

                // Last subscriber gone: stop the timer and reset to visible.
                // The thread exits on its next running check; no join here.
                if clock.subscribers == 0 {
                    clock.running.store(false, Ordering::SeqCst);
                    clock.phase_atomic.store(true, Ordering::SeqCst);
                    clock.phase.set(true);
                }
            }
        });
    })
}

/// Current blink phase for `period`: true = caret visible.
///
/// Syncs the timer thread's atomic into the phase signal so reactive
/// readers see the change. Returns true (visible) when no clock exists.
pub fn phase(period: Duration) -> bool {
    BLINK_CLOCKS.with(|clocks| {
        let mut clocks = clocks.borrow_mut();
        if let Some(clock) = clocks.get_mut(&period) {
            let phase = clock.phase_atomic.load(Ordering::SeqCst);
            if clock.phase.get() != phase {
                clock.phase.set(phase);
            }
            phase
        } else {
            true
        }
    })
}

/// Phase signal for `period`, or None when no clock exists. The signal is
/// synced on each [`phase`] call.
pub fn phase_signal(period: Duration) -> Option<Signal<bool>> {
    BLINK_CLOCKS.with(|clocks| clocks.borrow().get(&period).map(|c| c.phase.clone()))
}

/// Whether the clock for `period` is running with live subscribers.
pub fn is_running(period: Duration) -> bool {
    BLINK_CLOCKS.with(|clocks| {
        clocks
            .borrow()
            .get(&period)
            .map(|c| c.running.load(Ordering::SeqCst) && c.subscribers > 0)
            .unwrap_or(false)
    })
}

/// Subscriber count for `period` (0 if no clock).
pub fn subscriber_count(period: Duration) -> usize {
    BLINK_CLOCKS.with(|clocks| {
        clocks
            .borrow()
            .get(&period)
            .map(|c| c.subscribers)
            .unwrap_or(0)
    })
}

/// Stop all clocks and clear the registry (for testing).
pub fn reset_blink_state() {
    BLINK_CLOCKS.with(|clocks| {
        let mut clocks = clocks.borrow_mut();
        for clock in clocks.values_mut() {
            clock.running.store(false, Ordering::SeqCst);
            clock.subscribers = 0;
            clock.phase_atomic.store(true, Ordering::SeqCst);
            clock.phase.set(true);
        }
        clocks.clear();
    });
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_blink_state();
    }

    #[test]
    fn test_subscribe_returns_unsubscribe() {
        setup();

        let unsubscribe = subscribe(DEFAULT_CARET_PERIOD);
        assert_eq!(subscriber_count(DEFAULT_CARET_PERIOD), 1);

        unsubscribe();
        assert_eq!(subscriber_count(DEFAULT_CARET_PERIOD), 0);
    }

    #[test]
    fn test_shared_clock_same_period() {
        setup();

        let unsub1 = subscribe(DEFAULT_CARET_PERIOD);
        let unsub2 = subscribe(DEFAULT_CARET_PERIOD);

        assert_eq!(subscriber_count(DEFAULT_CARET_PERIOD), 2);

        let clock_count = BLINK_CLOCKS.with(|c| c.borrow().len());
        assert_eq!(clock_count, 1);

        unsub1();
        assert_eq!(subscriber_count(DEFAULT_CARET_PERIOD), 1);
        assert!(is_running(DEFAULT_CARET_PERIOD));

        unsub2();
        assert_eq!(subscriber_count(DEFAULT_CARET_PERIOD), 0);
        assert!(!is_running(DEFAULT_CARET_PERIOD));
    }

    #[test]
    fn test_different_periods_separate_clocks() {
        setup();

        let _unsub1 = subscribe(Duration::from_millis(1000));
        let _unsub2 = subscribe(Duration::from_millis(500));

        let clock_count = BLINK_CLOCKS.with(|c| c.borrow().len());
        assert_eq!(clock_count, 2);
    }

    #[test]
    fn test_phase_starts_visible() {
        setup();

        let _unsub = subscribe(Duration::from_millis(50));
        assert!(phase(Duration::from_millis(50)));

        // After a toggle interval the phase is still readable (exact value
        // depends on timing)
        thread::sleep(Duration::from_millis(60));
        let _ = phase(Duration::from_millis(50));
    }

    #[test]
    fn test_unsubscribe_resets_phase() {
        setup();

        let unsub = subscribe(DEFAULT_CARET_PERIOD);
        assert!(is_running(DEFAULT_CARET_PERIOD));

        unsub();

        BLINK_CLOCKS.with(|clocks| {
            let clocks = clocks.borrow();
            if let Some(clock) = clocks.get(&DEFAULT_CARET_PERIOD) {
                assert!(!clock.running.load(Ordering::SeqCst));
                assert!(clock.phase.get());
            }
        });
    }

    #[test]
    fn test_resubscribe_restarts_clock() {
        setup();

        let unsub = subscribe(DEFAULT_CARET_PERIOD);
        assert!(is_running(DEFAULT_CARET_PERIOD));
        unsub();
        assert!(!is_running(DEFAULT_CARET_PERIOD));

        let _unsub2 = subscribe(DEFAULT_CARET_PERIOD);
        assert!(is_running(DEFAULT_CARET_PERIOD));
    }

    #[test]
    fn test_zero_period_noop() {
        setup();

        let unsub = subscribe(Duration::ZERO);

        let clock_count = BLINK_CLOCKS.with(|c| c.borrow().len());
        assert_eq!(clock_count, 0);
        assert!(phase(Duration::ZERO));

        unsub();
    }

    #[test]
    fn test_phase_signal_exists_after_subscribe() {
        setup();

        assert!(phase_signal(DEFAULT_CARET_PERIOD).is_none());
        let _unsub = subscribe(DEFAULT_CARET_PERIOD);
        assert!(phase_signal(DEFAULT_CARET_PERIOD).is_some());
    }
}
