//! Theme System for folio-tui.
//!
//! Two modes - dark and light - over one set of semantic color slots. The
//! mode is process-wide reactive state with a single writer; everything
//! that renders reads the active theme through it.

use crate::types::Rgba;

pub mod presets;
pub mod reactive;

pub use presets::{dark, light};
pub use reactive::{Mode, active_theme, mode, mode_signal, reset_theme_state, set_mode, toggle_mode};

// =============================================================================
// ThemeColor - A color that can be default, ANSI, RGB, or a hex string
// =============================================================================

/// Theme color can be:
/// - `Default`: Terminal's default color
/// - `Ansi(n)`: ANSI palette index (0-255)
/// - `Rgb(rgba)`: Explicit RGB color
/// - `Str(s)`: Hex string to be parsed
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeColor {
    Default,
    Ansi(u8),
    Rgb(Rgba),
    Str(String),
}

impl ThemeColor {
    /// Resolve to Rgba. Parses string if needed.
    ///
    /// `Str` parses as hex, returning magenta on parse failure.
    pub fn resolve(&self) -> Rgba {
        match self {
            Self::Default => Rgba::TERMINAL_DEFAULT,
            Self::Ansi(i) => Rgba::ansi(*i),
            Self::Rgb(c) => *c,
            Self::Str(s) => Rgba::from_hex(s).unwrap_or(Rgba::MAGENTA),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self::Default
    }
}

/// `u32` is an RGB integer (0xRRGGBB).
impl From<u32> for ThemeColor {
    fn from(rgb: u32) -> Self {
        Self::Rgb(Rgba::from_rgb_int(rgb))
    }
}

/// `&str` is a hex string to parse.
impl From<&str> for ThemeColor {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

// =============================================================================
// Theme - the semantic slots the page consumes
// =============================================================================

/// Theme definition.
///
/// Slots cover what the portfolio page actually draws: brand/highlight,
/// link/pill accent, body and muted text, page and card backgrounds, and
/// borders (resting and highlighted).
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name ("dark", "light").
    pub name: String,
    /// Brand color: nav highlight, hero title, chart line.
    pub primary: ThemeColor,
    /// Accent: links, pills, markers.
    pub accent: ThemeColor,
    /// Body text.
    pub text: ThemeColor,
    /// Secondary text.
    pub text_muted: ThemeColor,
    /// Page background.
    pub background: ThemeColor,
    /// Card/panel background.
    pub surface: ThemeColor,
    /// Resting border.
    pub border: ThemeColor,
    /// Highlighted border (active card, nav underline).
    pub border_active: ThemeColor,
}

impl Default for Theme {
    fn default() -> Self {
        dark()
    }
}

// =============================================================================
// Tests
// =============================================================================
