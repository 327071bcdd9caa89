//! Styled text building blocks.
//!
//! A [`Line`] is a row of [`Span`]s; the page builder produces lines and
//! the terminal writer draws them. Widths are display columns (unicode
//! width), not bytes or chars.

use unicode_width::UnicodeWidthStr;

use crate::types::{Attr, Rgba};

// =============================================================================
// Span
// =============================================================================

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Span {
    pub fn new(text: impl Into<String>, fg: Rgba, bg: Rgba) -> Self {
        Self {
            text: text.into(),
            fg,
            bg,
            attrs: Attr::NONE,
        }
    }

    pub fn styled(text: impl Into<String>, fg: Rgba, bg: Rgba, attrs: Attr) -> Self {
        Self {
            text: text.into(),
            fg,
            bg,
            attrs,
        }
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }

    pub fn bold(mut self) -> Self {
        self.attrs |= Attr::BOLD;
        self
    }

    pub fn italic(mut self) -> Self {
        self.attrs |= Attr::ITALIC;
        self
    }

    pub fn underline(mut self) -> Self {
        self.attrs |= Attr::UNDERLINE;
        self
    }

    /// Dim the foreground toward the background color (fade-out styling).
    pub fn faded(mut self, factor: f32) -> Self {
        self.fg = self.fg.dim(factor);
        self
    }
}

// =============================================================================
// Line
// =============================================================================

/// One page row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// A single-span line.
    pub fn single(span: Span) -> Self {
        Self { spans: vec![span] }
    }

    /// An empty row painted with `bg`.
    pub fn blank(bg: Rgba) -> Self {
        Self::single(Span::new("", Rgba::TERMINAL_DEFAULT, bg))
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Apply a fade factor to every span (one-shot fade-in styling).
    pub fn faded(self, factor: f32) -> Self {
        Self {
            spans: self.spans.into_iter().map(|s| s.faded(factor)).collect(),
        }
    }
}

// =============================================================================
// Word wrap
// =============================================================================

/// Greedy word wrap to `width` columns.
///
/// Words wider than the width land on their own line unbroken (the terminal
/// clips them). Empty input yields one empty line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Tests
// =============================================================================
