//! Sentiment chart panel
//!
//! Draws the current pie chart as a proportional bar with a legend below it.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::sentiment::ChartConfig;
use crate::tui::app::JournalApp;
use crate::tui::theme::{hex_color, Theme};

/// Render the sentiment panel
pub fn render_sentiment(f: &mut Frame, area: Rect, app: &JournalApp, theme: &Theme) {
    let block = Block::default()
        .title(" SENTIMENT ")
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(chart) = app.journal.sentiment().chart() else {
        let empty = Paragraph::new("Enter bullish/bearish percentages to draw the chart")
            .style(theme.inactive_style());
        f.render_widget(empty, inner);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Bar
        Constraint::Length(1), // Spacer
        Constraint::Min(2),    // Legend
    ])
    .split(inner);

    let bar_width = inner.width.saturating_sub(2) as usize;
    f.render_widget(Paragraph::new(bar_line(chart, bar_width, theme)), chunks[0]);
    f.render_widget(Paragraph::new(legend_lines(chart, theme)), chunks[2]);
}

/// Slice colors from the chart definition, falling back to the theme
fn slice_colors(chart: &ChartConfig, theme: &Theme) -> (Color, Color) {
    let colors = chart
        .data
        .datasets
        .first()
        .map(|d| d.background_color.as_slice())
        .unwrap_or(&[]);
    let pick = |i: usize, default: Color| {
        colors
            .get(i)
            .and_then(|c| hex_color(c))
            .unwrap_or(default)
    };
    (pick(0, theme.bullish), pick(1, theme.bearish))
}

/// Cells given to the bullish slice out of `width`
fn bullish_cells(chart: &ChartConfig, width: usize) -> usize {
    let (bullish_share, _) = chart.shares();
    ((bullish_share / 100.0) * width as f64).round() as usize
}

fn bar_line(chart: &ChartConfig, width: usize, theme: &Theme) -> Line<'static> {
    let (bullish_share, bearish_share) = chart.shares();
    if bullish_share == 0.0 && bearish_share == 0.0 {
        return Line::from(Span::styled(
            format!("[{}]", "░".repeat(width)),
            theme.inactive_style(),
        ));
    }

    let (bull_color, bear_color) = slice_colors(chart, theme);
    let filled = bullish_cells(chart, width).min(width);
    Line::from(vec![
        Span::raw("["),
        Span::styled("█".repeat(filled), Style::default().fg(bull_color)),
        Span::styled(
            "█".repeat(width.saturating_sub(filled)),
            Style::default().fg(bear_color),
        ),
        Span::raw("]"),
    ])
}

fn legend_lines(chart: &ChartConfig, theme: &Theme) -> Vec<Line<'static>> {
    let (bull_color, bear_color) = slice_colors(chart, theme);
    let legend_color = hex_color(&chart.options.plugins.legend.labels.color).unwrap_or(theme.text);
    let (bullish, bearish) = chart.values();
    let (bullish_share, bearish_share) = chart.shares();

    chart
        .data
        .labels
        .iter()
        .zip([
            (bull_color, bullish, bullish_share),
            (bear_color, bearish, bearish_share),
        ])
        .map(|(label, (color, value, share))| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(
                    format!("{label}: {value} ({share:.1}%)"),
                    Style::default().fg(legend_color),
                ),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentVisualizer;
    use crate::theme::ThemeName;

    #[test]
    fn test_bullish_cells_proportional() {
        let mut viz = SentimentVisualizer::new(ThemeName::Light);
        let chart = viz.update_sentiment_chart("75", "25");
        assert_eq!(bullish_cells(chart, 20), 15);
    }

    #[test]
    fn test_dark_slices_use_dark_palette() {
        let mut viz = SentimentVisualizer::new(ThemeName::Dark);
        let chart = viz.update_sentiment_chart("60", "40").clone();
        let (bull, bear) = slice_colors(&chart, &Theme::default());
        assert_eq!(bull, Color::Rgb(0x4c, 0xaf, 0x50));
        assert_eq!(bear, Color::Rgb(0xf4, 0x43, 0x36));
    }

    #[test]
    fn test_legend_lists_both_slices() {
        let mut viz = SentimentVisualizer::new(ThemeName::Light);
        let chart = viz.update_sentiment_chart("60", "40").clone();
        let lines = legend_lines(&chart, &Theme::default());
        assert_eq!(lines.len(), 2);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "■ Bullish: 60 (60.0%)");
    }
}
