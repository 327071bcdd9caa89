//! Typewriter Reveal - discrete, deterministic character reveal.
//!
//! Reveals a fixed string over a fixed duration, one character per step.
//! The duration is divided into exactly N evenly spaced steps (N = character
//! count); the full string is visible at the end of the duration, and a
//! single "done" transition fires when the reveal completes.
//!
//! The schedule is a pure mapping from elapsed time to revealed character
//! count, so the same text and duration always replay identically - frame
//! timing only samples the fixed step grid, it never decides it.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use folio_tui::state::typewriter::Typewriter;
//!
//! let mut tw = Typewriter::new("Hi, I'm Avery", 2400);
//! // each frame:
//! tw.advance_to(started.elapsed());
//! let visible = &tw.text()[..]; // render tw.revealed() chars of it
//! if tw.is_done() { /* hide the trailing caret */ }
//! ```

use std::time::Duration;

use spark_signals::{Signal, signal};

/// Default reveal duration in milliseconds.
pub const DEFAULT_TYPE_MS: u64 = 2400;

// =============================================================================
// REVEAL SCHEDULE
// =============================================================================

/// The fixed step grid of one reveal: N steps evenly spaced over the
/// duration, step k landing at `k * duration / N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSchedule {
    steps: usize,
    duration_ms: u64,
}

impl RevealSchedule {
    /// Build the schedule for `text` revealed over `duration_ms`.
    ///
    /// Steps count characters, not bytes. A zero-length text or a
    /// non-positive duration schedules zero waiting: the reveal is complete
    /// immediately (not an error).
    pub fn new(text: &str, duration_ms: u64) -> Self {
        Self {
            steps: text.chars().count(),
            duration_ms,
        }
    }

    /// Number of scheduled reveal steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Spacing between steps. Zero when nothing is scheduled.
    pub fn step_interval(&self) -> Duration {
        if self.steps == 0 || self.duration_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.duration_ms / self.steps as u64)
    }

    /// Characters revealed at `elapsed`: floor over the step grid, clamped
    /// to the step count. The first character lands after one full
    /// interval; the last lands at (or, for non-divisible durations, just
    /// before) the full duration.
    pub fn revealed_at(&self, elapsed: Duration) -> usize {
        if self.steps == 0 {
            return 0;
        }
        let interval = self.step_interval();
        if interval.is_zero() {
            return self.steps;
        }
        let count = (elapsed.as_millis() / interval.as_millis()) as usize;
        count.min(self.steps)
    }

    /// Whether the reveal is complete at `elapsed`.
    pub fn is_complete_at(&self, elapsed: Duration) -> bool {
        self.revealed_at(elapsed) == self.steps
    }
}

// =============================================================================
// TYPEWRITER
// =============================================================================

/// One reveal instance: reactive revealed-count and done-flag driven along
/// a [`RevealSchedule`] by elapsed time.
///
/// The done transition is monotonic - once true it stays true for this
/// instance - and the completion callback fires exactly once. Dropping an
/// instance before completion discards it without emitting; a replacement
/// instance runs its own independent schedule.
pub struct Typewriter {
    text: String,
    schedule: RevealSchedule,
    revealed: Signal<usize>,
    done: Signal<bool>,
    done_emitted: bool,
    on_done: Option<Box<dyn FnOnce()>>,
}

impl Typewriter {
    /// Create a reveal for `text` over `duration_ms` (see
    /// [`DEFAULT_TYPE_MS`]). Empty text completes on the first advance with
    /// zero steps scheduled.
    pub fn new(text: impl Into<String>, duration_ms: u64) -> Self {
        let text = text.into();
        let schedule = RevealSchedule::new(&text, duration_ms);
        Self {
            text,
            schedule,
            revealed: signal(0),
            done: signal(schedule.steps() == 0),
            done_emitted: false,
            on_done: None,
        }
    }

    /// Register the completion callback. Fires exactly once, at the advance
    /// that completes the reveal.
    pub fn on_done(&mut self, callback: Box<dyn FnOnce()>) {
        self.on_done = Some(callback);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn schedule(&self) -> &RevealSchedule {
        &self.schedule
    }

    /// Characters currently revealed.
    pub fn revealed(&self) -> usize {
        self.revealed.get()
    }

    /// The revealed-count signal, for the render effect.
    pub fn revealed_signal(&self) -> Signal<usize> {
        self.revealed.clone()
    }

    pub fn is_done(&self) -> bool {
        self.done.get()
    }

    /// The done signal, for the caret renderer.
    pub fn done_signal(&self) -> Signal<bool> {
        self.done.clone()
    }

    /// Move the reveal along the schedule to `elapsed`.
    ///
    /// Within a run the revealed count never decreases; sampling order of
    /// elapsed values cannot change which characters are shown at a given
    /// instant.
    pub fn advance_to(&mut self, elapsed: Duration) {
        let count = self.schedule.revealed_at(elapsed);
        if count > self.revealed.get() {
            self.revealed.set(count);
        }
        if count == self.schedule.steps() && !self.done_emitted {
            self.done_emitted = true;
            if !self.done.get() {
                self.done.set(true);
            }
            if let Some(callback) = self.on_done.take() {
                callback();
            }
        }
    }

    /// Restart the reveal from zero.
    ///
    /// Only meaningful before completion (re-initialization under aggressive
    /// re-rendering); a completed instance is terminal and restarting it is
    /// a no-op, preserving the monotonic done transition.
    pub fn restart(&mut self) {
        if self.done_emitted || self.done.get() {
            return;
        }
        if self.revealed.get() != 0 {
            self.revealed.set(0);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
