//! Navigation Bar - fixed rows above the scrolling page.
//!
//! Brand on the left, section labels in page order (the active one
//! highlighted), key hints on the right, and a separator row underneath.

use unicode_width::UnicodeWidthStr;

use crate::content::{Portfolio, Section};
use crate::theme::Theme;

use super::line::{Line, Span};

/// Rows the nav bar occupies; the viewport starts below them.
pub const NAV_ROWS: u16 = 2;

const HINTS: &str = "t theme · q quit";

/// Build the nav bar rows.
pub fn nav_lines(
    portfolio: &Portfolio,
    sections: &[Section],
    active: &str,
    theme: &Theme,
    width: u16,
) -> Vec<Line> {
    let width = width as usize;
    let bg = theme.background.resolve();
    let text = theme.text.resolve();
    let muted = theme.text_muted.resolve();
    let primary = theme.primary.resolve();
    let border = theme.border.resolve();

    let mut bar = Line::new();
    bar.push(Span::new(" ", text, bg));
    bar.push(Span::new(portfolio.brand, primary, bg).bold());
    bar.push(Span::new("   ", text, bg));

    for section in sections {
        if section.id == active {
            bar.push(Span::new(section.label, primary, bg).bold().underline());
        } else {
            bar.push(Span::new(section.label, muted, bg));
        }
        bar.push(Span::new("  ", text, bg));
    }

    // Right-aligned hints when the row has room for them
    let used = bar.width();
    let hints_width = UnicodeWidthStr::width(HINTS) + 1;
    if used + hints_width <= width {
        bar.push(Span::new(" ".repeat(width - used - hints_width), text, bg));
        bar.push(Span::new(HINTS, muted, bg));
    }

    let separator = Line::single(Span::new("─".repeat(width), border, bg));

    vec![bar, separator]
}

// =============================================================================
// Tests
// =============================================================================
