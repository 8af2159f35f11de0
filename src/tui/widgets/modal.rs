//! Overlays: report preview modal and help

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::page::{ReportModal, DOWNLOAD_PDF_LABEL};
use crate::tui::theme::Theme;
use crate::tui::widgets::centered_rect;

/// Render the report preview over the whole screen
pub fn render_report_modal(f: &mut Frame, area: Rect, modal: &ReportModal, theme: &Theme) {
    let rect = centered_rect(area, 84, area.height.saturating_sub(4));
    f.render_widget(Clear, rect);

    let block = Block::default()
        .title(" REPORT PREVIEW ")
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(theme.base_style());

    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::vertical([
        Constraint::Min(3),    // Report text
        Constraint::Length(1), // Buttons
        Constraint::Length(1), // Status
    ])
    .split(inner);

    let body = Paragraph::new(modal.report.as_str())
        .style(theme.text_style())
        .scroll((modal.scroll, 0));
    f.render_widget(body, chunks[0]);

    let buttons = Line::from(vec![
        Span::styled(format!("[c] {}", modal.copy_button.label()), theme.focus_style()),
        Span::raw("   "),
        Span::styled(format!("[p] {DOWNLOAD_PDF_LABEL}"), theme.focus_style()),
        Span::raw("   "),
        Span::styled("[Esc] Close", theme.inactive_style()),
    ]);
    f.render_widget(Paragraph::new(buttons), chunks[1]);

    if let Some(status) = modal.status.as_deref() {
        f.render_widget(
            Paragraph::new(status).style(theme.inactive_style()),
            chunks[2],
        );
    }
}

const HELP_ROWS: [(&str, &str); 12] = [
    ("Tab / Down", "Next field"),
    ("Shift+Tab / Up", "Previous field"),
    ("Left / Right", "Change selection"),
    ("Space", "Check box or radio"),
    ("Enter", "Next field / run checklist"),
    ("Ctrl+S", "Save observation"),
    ("Ctrl+R", "Preview daily report"),
    ("Ctrl+T", "Toggle light/dark theme"),
    ("F2", "Journal / checklist"),
    ("c / p", "Copy / PDF (in report)"),
    ("F1", "Toggle this help"),
    ("Esc / Ctrl+Q", "Close / quit"),
];

/// Render the key binding overlay
pub fn render_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let rect = centered_rect(area, 52, HELP_ROWS.len() as u16 + 2);
    f.render_widget(Clear, rect);

    let lines: Vec<Line> = HELP_ROWS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:<16}"), theme.focus_style()),
                Span::styled(*action, theme.text_style()),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" HELP ")
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .style(theme.base_style()),
    );
    f.render_widget(help, rect);
}
