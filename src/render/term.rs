//! Terminal Writer - alternate-screen lifecycle and row-diff output.
//!
//! Frames are full screens of [`Line`] rows. The writer compares each frame
//! to the previous one and rewrites only the rows that changed, wrapped in
//! a synchronized update so partial frames never flash. `invalidate()`
//! forces the next frame to redraw everything (resize, corruption).

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::types::{Attr, Rgba};

use super::line::Line;

// =============================================================================
// Frame
// =============================================================================

/// One full screen: nav rows plus the visible page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Line>,
    /// Fill color for row tails and empty rows.
    pub bg: Rgba,
}

/// Map an [`Rgba`] onto a crossterm color.
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else if color.is_ansi() {
        Color::AnsiValue(color.ansi_index())
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

/// Rows of `next` that need rewriting against `prev`.
///
/// Returns None when the frames are incomparable (different row counts or
/// background) and the whole screen must be redrawn.
pub fn changed_rows(prev: &Frame, next: &Frame) -> Option<Vec<usize>> {
    if prev.rows.len() != next.rows.len() || prev.bg != next.bg {
        return None;
    }
    Some(
        (0..next.rows.len())
            .filter(|&i| prev.rows[i] != next.rows[i])
            .collect(),
    )
}

// =============================================================================
// Renderer
// =============================================================================

/// Row-diff terminal renderer.
pub struct TermRenderer {
    out: io::Stdout,
    previous: Option<Frame>,
    entered: bool,
}

impl TermRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            previous: None,
            entered: false,
        }
    }

    /// Enter the alternate screen: raw mode, hidden cursor, mouse capture.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            Hide,
            Clear(ClearType::All)
        )?;
        self.entered = true;
        self.invalidate();
        Ok(())
    }

    /// Leave the alternate screen and restore the terminal. Idempotent.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            DisableMouseCapture,
            Show,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Forget the previous frame; the next render redraws every row.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Draw a frame, rewriting only changed rows.
    pub fn render(&mut self, frame: &Frame) -> io::Result<()> {
        let rows: Vec<usize> = match self.previous.as_ref().and_then(|p| changed_rows(p, frame)) {
            Some(rows) => rows,
            None => {
                queue!(
                    self.out,
                    SetBackgroundColor(to_color(frame.bg)),
                    Clear(ClearType::All)
                )?;
                (0..frame.rows.len()).collect()
            }
        };

        if rows.is_empty() {
            return Ok(());
        }

        queue!(self.out, BeginSynchronizedUpdate)?;
        for y in rows {
            self.draw_row(y as u16, &frame.rows[y], frame.bg)?;
        }
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.previous = Some(frame.clone());
        Ok(())
    }

    fn draw_row(&mut self, y: u16, line: &Line, bg: Rgba) -> io::Result<()> {
        queue!(self.out, MoveTo(0, y))?;
        for span in &line.spans {
            queue!(
                self.out,
                SetAttribute(Attribute::Reset),
                SetForegroundColor(to_color(span.fg)),
                SetBackgroundColor(to_color(span.bg))
            )?;
            if span.attrs.contains(Attr::BOLD) {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            if span.attrs.contains(Attr::DIM) {
                queue!(self.out, SetAttribute(Attribute::Dim))?;
            }
            if span.attrs.contains(Attr::ITALIC) {
                queue!(self.out, SetAttribute(Attribute::Italic))?;
            }
            if span.attrs.contains(Attr::UNDERLINE) {
                queue!(self.out, SetAttribute(Attribute::Underlined))?;
            }
            if span.attrs.contains(Attr::INVERSE) {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(self.out, Print(span.text.as_str()))?;
        }
        // Fill the tail of the row with the frame background
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(to_color(bg)),
            Clear(ClearType::UntilNewLine)
        )
    }
}

impl Default for TermRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TermRenderer {
    fn drop(&mut self) {
        // Best effort: never leave the terminal in raw/alt-screen state
        let _ = self.exit();
    }
}

// =============================================================================
// Tests
// =============================================================================
