//! Trend Chart - a small line chart on a row grid.
//!
//! Renders the "skill growth" trend as a y-axis (0-100), one interpolated
//! marker column per plot column, and month labels under the x-axis. The
//! chart is pure: content in, styled lines out.

use crate::content::TrendPoint;
use crate::theme::Theme;

use super::line::{Line, Span};

/// Y-axis gutter: "100 ┤" is 5 columns.
const GUTTER: usize = 5;

/// Default plot height in rows (axis rows excluded).
pub const CHART_HEIGHT: usize = 8;

/// Render the trend as `height` plot rows plus an x-axis row and a month
/// label row, fitted to `width` columns. Returns no lines when the data or
/// the width cannot carry a plot.
pub fn chart_lines(points: &[TrendPoint], width: usize, height: usize, theme: &Theme) -> Vec<Line> {
    if points.len() < 2 || height < 2 || width <= GUTTER + 2 {
        return Vec::new();
    }

    let plot_w = width - GUTTER;
    let surface = theme.surface.resolve();
    let line_color = theme.primary.resolve();
    let axis_color = theme.text_muted.resolve();

    // Row for a score: 0 at the bottom row, 100 at the top row
    let row_for = |score: f32| -> usize {
        let t = (score / 100.0).clamp(0.0, 1.0);
        (height - 1) - (t * (height - 1) as f32).round() as usize
    };

    // Column for a data point index
    let col_for = |i: usize| -> usize { i * (plot_w - 1) / (points.len() - 1) };

    // Interpolated score per plot column
    let score_at = |col: usize| -> f32 {
        let t = col as f32 / (plot_w - 1) as f32;
        let x = t * (points.len() - 1) as f32;
        let i = (x.floor() as usize).min(points.len() - 2);
        let frac = x - i as f32;
        let a = points[i].score as f32;
        let b = points[i + 1].score as f32;
        a + (b - a) * frac
    };

    let mut grid = vec![vec![' '; plot_w]; height];
    for col in 0..plot_w {
        grid[row_for(score_at(col))][col] = '·';
    }
    for (i, point) in points.iter().enumerate() {
        grid[row_for(point.score as f32)][col_for(i)] = '●';
    }

    let mut lines = Vec::with_capacity(height + 2);
    for (row, cells) in grid.iter().enumerate() {
        let label = if row == 0 {
            "100 ┤"
        } else if row == height / 2 {
            " 50 ┤"
        } else if row == height - 1 {
            "  0 ┤"
        } else {
            "    │"
        };
        let plot: String = cells.iter().collect();
        lines.push(Line::from_spans(vec![
            Span::new(label, axis_color, surface),
            Span::new(plot, line_color, surface),
        ]));
    }

    // X axis
    let mut axis = String::from("    └");
    axis.push_str(&"─".repeat(plot_w));
    lines.push(Line::single(Span::new(axis, axis_color, surface)));

    // Month labels, placed at their marker columns (clipped to the plot)
    let mut labels = vec![' '; plot_w];
    for (i, point) in points.iter().enumerate() {
        let start = col_for(i).min(plot_w.saturating_sub(point.month.len()));
        for (j, c) in point.month.chars().enumerate() {
            if start + j < plot_w {
                labels[start + j] = c;
            }
        }
    }
    let labels: String = labels.into_iter().collect();
    lines.push(Line::from_spans(vec![
        Span::new("     ", axis_color, surface),
        Span::new(labels, axis_color, surface),
    ]));

    lines
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn plot_row(line: &Line) -> &str {
        &line.spans[1].text
    }

    fn points(scores: &[(&'static str, u8)]) -> Vec<TrendPoint> {
        scores
            .iter()
            .map(|&(month, score)| TrendPoint { month, score })
            .collect()
    }

    #[test]
    fn test_dimensions() {
        let data = points(&[("Jan", 10), ("Mar", 50), ("May", 90)]);
        let lines = chart_lines(&data, 40, CHART_HEIGHT, &theme::dark());

        assert_eq!(lines.len(), CHART_HEIGHT + 2);
        for line in &lines {
            assert!(line.width() <= 40);
        }
    }

    #[test]
    fn test_min_max_row_mapping() {
        let data = points(&[("Lo", 0), ("Hi", 100)]);
        let lines = chart_lines(&data, 30, 6, &theme::dark());

        // Score 100 lands on the top plot row, score 0 on the bottom one
        assert!(plot_row(&lines[0]).contains('●'));
        assert!(plot_row(&lines[5]).contains('●'));
        // Top-row marker sits at the right edge
        assert_eq!(plot_row(&lines[0]).chars().last(), Some('●'));
        assert_eq!(plot_row(&lines[5]).chars().next(), Some('●'));
    }

    #[test]
    fn test_every_column_is_plotted() {
        let data = points(&[("Jan", 20), ("Jun", 80)]);
        let lines = chart_lines(&data, 30, 6, &theme::dark());

        let plot_w = 30 - GUTTER;
        for col in 0..plot_w {
            let marked = (0..6).any(|row| {
                let c = plot_row(&lines[row]).chars().nth(col).unwrap();
                c == '·' || c == '●'
            });
            assert!(marked, "column {col} has no marker");
        }
    }

    #[test]
    fn test_axis_labels_present() {
        let data = points(&[("Jan", 45), ("Nov", 85)]);
        let lines = chart_lines(&data, 40, CHART_HEIGHT, &theme::dark());

        assert!(lines[0].spans[0].text.starts_with("100"));
        assert!(lines[CHART_HEIGHT - 1].spans[0].text.trim_start().starts_with('0'));

        let label_row = &lines[CHART_HEIGHT + 1];
        assert!(label_row.spans[1].text.contains("Jan"));
        assert!(label_row.spans[1].text.contains("Nov"));
    }

    #[test]
    fn test_degenerate_inputs_render_nothing() {
        let one = points(&[("Jan", 45)]);
        assert!(chart_lines(&one, 40, CHART_HEIGHT, &theme::dark()).is_empty());

        let two = points(&[("Jan", 45), ("Feb", 50)]);
        assert!(chart_lines(&two, 6, CHART_HEIGHT, &theme::dark()).is_empty());
        assert!(chart_lines(&two, 40, 1, &theme::dark()).is_empty());
    }
}
