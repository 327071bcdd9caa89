//! # folio-tui
//!
//! Reactive single-page terminal portfolio.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity: the page is static content rendered through a
//! handful of reactive state values, and ONE render effect redraws whatever
//! those values invalidate.
//!
//! ## Architecture
//!
//! ```text
//! input events → state signals → render effect → row-diff terminal output
//! ```
//!
//! The moving parts:
//!
//! - Scrolling updates the offset signal and feeds two viewport observers
//!   (nav threshold 35%, fade threshold 10%).
//! - The section tracker subscribes one crossing callback per section and
//!   owns the active id the nav bar highlights (last crossing wins).
//! - The hero typewriter reveals the headline over a fixed step grid and
//!   fires done exactly once; its caret blinks on a shared clock until then.
//! - The theme mode is a process-wide dark/light flag with a single writer.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Attr)
//! - [`content`] - The static portfolio content
//! - [`state`] - Section tracking, scrolling, typewriter, caret, fades
//! - [`theme`] - Dark/light presets and the reactive mode flag
//! - [`render`] - Nav bar, chart, page builder, terminal writer
//! - [`app`] - Mount lifecycle and event loop

pub mod app;
pub mod content;
pub mod render;
pub mod state;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use content::{Portfolio, SECTIONS, Section, portfolio, section_ids};

pub use state::{
    blink::{DEFAULT_CARET_PERIOD, reset_blink_state},
    fade::FadeSet,
    section::{RegionObserver, SectionTracker},
    typewriter::{DEFAULT_TYPE_MS, RevealSchedule, Typewriter},
    viewport::{
        FADE_THRESHOLD, NAV_THRESHOLD, RegionGeom, ScrollState, ViewportObserver, visible_ratio,
    },
};

pub use theme::{
    Mode, Theme, ThemeColor, active_theme, dark, light, mode, reset_theme_state, set_mode,
    toggle_mode,
};

pub use render::{Frame, Line, NAV_ROWS, Page, PageView, Span, TermRenderer, build_page};

pub use app::{
    AppHandle, AppOptions, mount, run, set_terminal_size, terminal_height, terminal_width, tick,
    unmount,
};
