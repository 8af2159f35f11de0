//! Footer status bar widget
//!
//! Shows the theme toggle label, the latest notice and the main shortcuts.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::JournalApp;
use crate::tui::theme::Theme;

/// Render the footer status bar
pub fn render_footer(f: &mut Frame, area: Rect, app: &JournalApp, theme: &Theme) {
    let toggle = app
        .journal
        .root()
        .toggle_label()
        .unwrap_or_default()
        .to_string();
    let observations = app.journal.research().observations().len();

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(format!("[{toggle}]"), theme.focus_style()),
        Span::raw("  "),
        Span::styled(format!("{observations} saved"), theme.text_style()),
        Span::raw("  "),
    ];

    match app.notice.as_deref() {
        Some(notice) => spans.push(Span::styled(notice.to_string(), theme.focus_style())),
        None => spans.push(Span::styled(
            "^S save  ^R report  ^T theme  F2 checklist  F1 help",
            theme.inactive_style(),
        )),
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
