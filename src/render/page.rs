//! Page Builder - the scrollable portfolio page.
//!
//! Builds the full page as styled lines and, in the same pass, the region
//! geometry the viewport observers consume. Layout depends only on content
//! and width; reveal progress, fades, and theme change styling, never row
//! positions, so the observer regions stay valid across reveals and theme
//! flips.

use crate::content::{Portfolio, SECTIONS};
use crate::state::fade::FadeSet;
use crate::state::viewport::RegionGeom;
use crate::theme::Theme;
use crate::types::Rgba;

use super::chart::{CHART_HEIGHT, chart_lines};
use super::line::{Line, Span, wrap};

/// Foreground dim factor for sections that have not faded in yet.
const FADE_DIM: f32 = 0.45;

/// Left page margin in columns.
const MARGIN: usize = 2;

/// Content column cap: keep prose readable on wide terminals.
const MAX_CONTENT: usize = 96;

// =============================================================================
// PageView
// =============================================================================

/// Snapshot of the reveal state the hero row renders from.
#[derive(Debug, Clone, Copy)]
pub struct PageView {
    /// Characters of the headline currently revealed.
    pub revealed: usize,
    /// Trailing caret cell: visible, blank placeholder, or gone.
    pub caret_visible: bool,
    /// Reveal finished: the caret cell is dropped entirely.
    pub reveal_done: bool,
}

impl PageView {
    /// View with the full headline shown (layout passes, tests).
    pub fn completed() -> Self {
        Self {
            revealed: usize::MAX,
            caret_visible: false,
            reveal_done: true,
        }
    }
}

/// The built page: rows plus the section geometry of the same pass.
#[derive(Debug, Clone)]
pub struct Page {
    pub lines: Vec<Line>,
    pub regions: Vec<RegionGeom>,
}

impl Page {
    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

// =============================================================================
// Page assembly
// =============================================================================

/// Build the page for `width` terminal columns.
pub fn build_page(
    portfolio: &Portfolio,
    width: u16,
    view: &PageView,
    fades: &FadeSet,
    theme: &Theme,
) -> Page {
    let content_width = (width as usize).saturating_sub(2 * MARGIN).min(MAX_CONTENT).max(16);

    let mut page = Page {
        lines: Vec::new(),
        regions: Vec::new(),
    };

    for section in SECTIONS {
        let mut body = match section.id {
            "home" => hero(portfolio, content_width, view, theme),
            "about" => about(portfolio, content_width, theme),
            "skills" => skills(portfolio, content_width, theme),
            "projects" => projects(portfolio, content_width, theme),
            "experience" => experience(portfolio, content_width, theme),
            "education" => education(portfolio, content_width, theme),
            "contact" => contact(portfolio, content_width, theme),
            _ => Vec::new(),
        };

        // The hero animates on mount, not on scroll; everything else stays
        // dim until its fade latches.
        if section.id != "home" && !fades.is_shown(section.id) {
            body = body.into_iter().map(|line| line.faded(FADE_DIM)).collect();
        }

        let top = page.lines.len() as u16;
        let height = body.len() as u16;
        page.lines.extend(body);
        page.regions.push(RegionGeom {
            id: section.id.to_string(),
            top,
            height,
        });
    }

    page.lines.extend(footer(portfolio, content_width, theme));
    page
}

fn margin(bg: Rgba) -> Span {
    Span::new(" ".repeat(MARGIN), Rgba::TERMINAL_DEFAULT, bg)
}

fn body_line(span: Span, bg: Rgba) -> Line {
    Line::from_spans(vec![margin(bg), span])
}

fn wrapped_lines(text: &str, width: usize, fg: Rgba, bg: Rgba) -> Vec<Line> {
    wrap(text, width)
        .into_iter()
        .map(|row| body_line(Span::new(row, fg, bg), bg))
        .collect()
}

fn header(label: &str, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    vec![
        body_line(
            Span::new(label, theme.primary.resolve(), bg).bold().underline(),
            bg,
        ),
        Line::blank(bg),
    ]
}

// =============================================================================
// Sections
// =============================================================================

fn hero(portfolio: &Portfolio, width: usize, view: &PageView, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    let primary = theme.primary.resolve();
    let accent = theme.accent.resolve();
    let muted = theme.text_muted.resolve();

    // Typewriter headline: a fixed-grid prefix plus the caret cell
    let shown: String = portfolio.headline.chars().take(view.revealed).collect();
    let mut title = Line::from_spans(vec![margin(bg), Span::new(shown, primary, bg).bold()]);
    if !view.reveal_done {
        let caret = if view.caret_visible { "▍" } else { " " };
        title.push(Span::new(caret, muted, bg));
    }

    let mut lines = vec![Line::blank(bg), title, Line::blank(bg)];
    lines.extend(wrapped_lines(portfolio.summary, width, muted, bg));
    lines.push(Line::blank(bg));
    lines.push(Line::from_spans(vec![
        margin(bg),
        Span::new("View Projects ↓", primary, bg).bold(),
        Span::new("   ", muted, bg),
        Span::new("GitHub", accent, bg).underline(),
        Span::new(" · ", muted, bg),
        Span::new("LinkedIn", accent, bg).underline(),
        Span::new(" · ", muted, bg),
        Span::new(portfolio.socials.email, accent, bg).underline(),
    ]));
    lines.push(Line::blank(bg));
    lines
}

fn about(portfolio: &Portfolio, width: usize, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    let muted = theme.text_muted.resolve();

    let mut lines = header("About", theme);
    lines.extend(wrapped_lines(portfolio.about, width, muted, bg));
    lines.push(Line::blank(bg));

    // "Learning Velocity" chart card
    let chart_width = width.saturating_sub(4).min(52);
    let mut inner = vec![Line::single(
        Span::new("Learning Velocity (sample)", theme.text.resolve(), theme.surface.resolve())
            .bold(),
    )];
    inner.push(Line::blank(theme.surface.resolve()));
    inner.extend(chart_lines(portfolio.trend, chart_width, CHART_HEIGHT, theme));
    lines.extend(card(inner, chart_width, theme));

    lines.push(Line::blank(bg));
    lines
}

fn skills(portfolio: &Portfolio, width: usize, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();

    let mut lines = header("Skills", theme);
    for group in portfolio.skills {
        lines.push(body_line(
            Span::new(group.name, theme.text.resolve(), bg).bold(),
            bg,
        ));
        lines.extend(pill_rows(group.items, width, theme));
        lines.push(Line::blank(bg));
    }
    lines
}

fn projects(portfolio: &Portfolio, width: usize, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    let surface = theme.surface.resolve();
    let muted = theme.text_muted.resolve();
    let accent = theme.accent.resolve();
    let inner_width = width.saturating_sub(4);

    let mut lines = header("Projects", theme);
    for project in portfolio.projects {
        let mut inner = vec![Line::single(
            Span::new(project.title, theme.text.resolve(), surface).bold(),
        )];
        for row in wrap(project.description, inner_width) {
            inner.push(Line::single(Span::new(row, muted, surface)));
        }
        inner.push(Line::single(Span::new(
            project.tags.join(" · "),
            accent,
            surface,
        )));

        let mut links = Line::new();
        if !project.link.is_empty() {
            links.push(Span::new("Live", accent, surface).underline());
            links.push(Span::new("  ", muted, surface));
        }
        if !project.repo.is_empty() {
            links.push(Span::new("Repo", accent, surface).underline());
        }
        if !links.spans.is_empty() {
            inner.push(links);
        }

        lines.extend(card(inner, inner_width, theme));
        lines.push(Line::blank(bg));
    }
    lines
}

fn experience(portfolio: &Portfolio, width: usize, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    let surface = theme.surface.resolve();
    let muted = theme.text_muted.resolve();
    let inner_width = width.saturating_sub(4);

    let mut lines = header("Experience", theme);
    for entry in portfolio.experience {
        let mut inner = vec![Line::from_spans(vec![
            Span::new(entry.role, theme.text.resolve(), surface).bold(),
            Span::new(format!(" · {}", entry.org), muted, surface),
        ])];
        inner.push(Line::single(Span::new(
            format!("{}   {}", entry.period, entry.location),
            muted,
            surface,
        )));
        for bullet in entry.bullets {
            let rows = wrap(bullet, inner_width.saturating_sub(2));
            for (i, row) in rows.into_iter().enumerate() {
                let prefix = if i == 0 { "• " } else { "  " };
                inner.push(Line::single(Span::new(
                    format!("{prefix}{row}"),
                    muted,
                    surface,
                )));
            }
        }
        lines.extend(card(inner, inner_width, theme));
        lines.push(Line::blank(bg));
    }
    lines
}

fn education(portfolio: &Portfolio, width: usize, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    let surface = theme.surface.resolve();
    let inner_width = width.saturating_sub(4);

    let mut lines = header("Education", theme);
    for entry in portfolio.education {
        let inner = vec![
            Line::single(Span::new(entry.degree, theme.text.resolve(), surface).bold()),
            Line::single(Span::new(
                format!("{}   {}   {}", entry.inst, entry.place, entry.when),
                theme.text_muted.resolve(),
                surface,
            )),
        ];
        lines.extend(card(inner, inner_width, theme));
        lines.push(Line::blank(bg));
    }
    lines
}

fn contact(portfolio: &Portfolio, width: usize, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    let muted = theme.text_muted.resolve();
    let accent = theme.accent.resolve();

    let mut lines = header("Contact", theme);
    lines.extend(wrapped_lines(portfolio.contact_blurb, width, muted, bg));
    lines.push(Line::blank(bg));
    lines.push(Line::from_spans(vec![
        margin(bg),
        Span::new(portfolio.socials.email, accent, bg).bold().underline(),
        Span::new("   ", muted, bg),
        Span::new(portfolio.socials.linkedin, accent, bg),
    ]));
    lines.push(body_line(
        Span::new(portfolio.socials.github, accent, bg),
        bg,
    ));
    lines.push(Line::blank(bg));
    lines
}

fn footer(portfolio: &Portfolio, width: usize, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    let muted = theme.text_muted.resolve();
    vec![
        body_line(Span::new("─".repeat(width), theme.border.resolve(), bg), bg),
        body_line(Span::new(portfolio.footer, muted, bg).italic(), bg),
        Line::blank(bg),
    ]
}

// =============================================================================
// Building blocks
// =============================================================================

/// Wrap `inner` lines in a rounded border on the surface color, padding
/// every row to `inner_width`.
fn card(inner: Vec<Line>, inner_width: usize, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    let surface = theme.surface.resolve();
    let border = theme.border.resolve();

    let mut lines = Vec::with_capacity(inner.len() + 2);
    lines.push(body_line(
        Span::new(format!("╭{}╮", "─".repeat(inner_width + 2)), border, surface),
        bg,
    ));
    for mut row in inner {
        let pad = (inner_width).saturating_sub(row.width());
        let mut spans = vec![margin(bg), Span::new("│ ", border, surface)];
        spans.append(&mut row.spans);
        spans.push(Span::new(" ".repeat(pad), border, surface));
        spans.push(Span::new(" │", border, surface));
        lines.push(Line::from_spans(spans));
    }
    lines.push(body_line(
        Span::new(format!("╰{}╯", "─".repeat(inner_width + 2)), border, surface),
        bg,
    ));
    lines
}

/// Lay skill pills out in rows that fit `width`.
fn pill_rows(items: &[&str], width: usize, theme: &Theme) -> Vec<Line> {
    let bg = theme.background.resolve();
    let surface = theme.surface.resolve();
    let accent = theme.accent.resolve();

    let mut lines = Vec::new();
    let mut row = Line::from_spans(vec![margin(bg)]);
    let mut row_width = 0usize;

    for item in items {
        let pill_width = item.chars().count() + 2;
        if row_width > 0 && row_width + 1 + pill_width > width {
            lines.push(std::mem::replace(&mut row, Line::from_spans(vec![margin(bg)])));
            row_width = 0;
        }
        if row_width > 0 {
            row.push(Span::new(" ", Rgba::TERMINAL_DEFAULT, bg));
            row_width += 1;
        }
        row.push(Span::new(format!(" {item} "), accent, surface));
        row_width += pill_width;
    }
    if row.spans.len() > 1 {
        lines.push(row);
    }
    lines
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::portfolio;
    use crate::theme;

    fn page_text(page: &Page) -> String {
        page.lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.text.as_str())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn build(view: &PageView, fades: &FadeSet) -> Page {
        build_page(&portfolio(), 100, view, fades, &theme::dark())
    }

    #[test]
    fn test_regions_cover_all_sections_in_order() {
        let page = build(&PageView::completed(), &FadeSet::new());
        assert_eq!(page.regions.len(), SECTIONS.len());
        for (region, section) in page.regions.iter().zip(SECTIONS) {
            assert_eq!(region.id, section.id);
        }
    }

    #[test]
    fn test_regions_are_contiguous_and_in_bounds() {
        let page = build(&PageView::completed(), &FadeSet::new());
        let mut expected_top = 0u16;
        for region in &page.regions {
            assert_eq!(region.top, expected_top);
            assert!(region.height > 0);
            expected_top += region.height;
        }
        // Only the footer lies beyond the last region
        assert!(expected_top <= page.height());
    }

    #[test]
    fn test_hero_shows_only_revealed_prefix() {
        let view = PageView {
            revealed: 7,
            caret_visible: true,
            reveal_done: false,
        };
        let page = build(&view, &FadeSet::new());
        let text = page_text(&page);

        assert!(text.contains("Hi, I'm"));
        assert!(!text.contains("Hi, I'm Avery"));
        assert!(text.contains('▍'));
    }

    #[test]
    fn test_hero_caret_dropped_when_done() {
        let page = build(&PageView::completed(), &FadeSet::new());
        let text = page_text(&page);
        assert!(text.contains(portfolio().headline));
        assert!(!text.contains('▍'));
    }

    #[test]
    fn test_caret_placeholder_keeps_grid_stable() {
        let on = PageView {
            revealed: 3,
            caret_visible: true,
            reveal_done: false,
        };
        let off = PageView {
            revealed: 3,
            caret_visible: false,
            reveal_done: false,
        };
        let fades = FadeSet::new();
        let with_caret = build(&on, &fades);
        let without = build(&off, &fades);
        assert_eq!(with_caret.height(), without.height());
        // Same row width whether the caret cell is on or off phase
        assert_eq!(with_caret.lines[1].width(), without.lines[1].width());
    }

    #[test]
    fn test_layout_independent_of_reveal_progress() {
        let early = PageView {
            revealed: 0,
            caret_visible: true,
            reveal_done: false,
        };
        let fades = FadeSet::new();
        let a = build(&early, &fades);
        let b = build(&PageView::completed(), &fades);
        assert_eq!(a.height(), b.height());
        assert_eq!(a.regions, b.regions);
    }

    #[test]
    fn test_unfaded_sections_render_dim() {
        let fades = FadeSet::new();
        let dim_page = build(&PageView::completed(), &fades);

        fades.mark_shown("about");
        let lit_page = build(&PageView::completed(), &fades);

        let about = &dim_page.regions[1];
        let dim_rows = &dim_page.lines[about.top as usize..(about.top + about.height) as usize];
        let lit_rows = &lit_page.lines[about.top as usize..(about.top + about.height) as usize];
        assert_ne!(dim_rows, lit_rows);

        // Hero is exempt from fading
        let home = &dim_page.regions[0];
        assert_eq!(
            &dim_page.lines[home.top as usize..(home.top + home.height) as usize],
            &lit_page.lines[home.top as usize..(home.top + home.height) as usize],
        );
    }

    #[test]
    fn test_page_contains_all_content() {
        let page = build(&PageView::completed(), &FadeSet::new());
        let text = page_text(&page);
        let p = portfolio();

        for project in p.projects {
            assert!(text.contains(project.title));
        }
        for group in p.skills {
            assert!(text.contains(group.name));
        }
        assert!(text.contains("Learning Velocity"));
        assert!(text.contains(p.footer));
    }

    #[test]
    fn test_theme_changes_styling_not_layout() {
        let fades = FadeSet::new();
        let dark = build_page(&portfolio(), 100, &PageView::completed(), &fades, &theme::dark());
        let light = build_page(&portfolio(), 100, &PageView::completed(), &fades, &theme::light());
        assert_eq!(dark.height(), light.height());
        assert_eq!(dark.regions, light.regions);
    }

    #[test]
    fn test_narrow_terminal_degrades_gracefully() {
        let page = build_page(
            &portfolio(),
            24,
            &PageView::completed(),
            &FadeSet::new(),
            &theme::dark(),
        );
        assert!(page.height() > 0);
        assert_eq!(page.regions.len(), SECTIONS.len());
    }
}
