//! Main UI rendering logic
//!
//! Orchestrates the layout and renders all widgets.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{JournalApp, Tab};
use crate::tui::theme::Theme;
use crate::tui::widgets;

/// Render the entire UI
pub fn render(f: &mut Frame, app: &JournalApp) {
    let theme = Theme::from_root(app.journal.root());
    f.render_widget(Block::default().style(theme.base_style()), f.area());

    // Scrolled header collapses to a single line
    let header_height = if app.header.class().is_some() { 1 } else { 3 };

    let chunks = Layout::vertical([
        Constraint::Length(header_height), // Header
        Constraint::Min(8),                // Body
        Constraint::Length(1),             // Footer status bar
    ])
    .split(f.area());

    render_header(f, chunks[0], app, &theme);

    match app.tab {
        Tab::Journal => {
            let body = Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(chunks[1]);
            widgets::render_form(f, body[0], app, &theme);
            widgets::render_sentiment(f, body[1], app, &theme);
        }
        Tab::Checklist => widgets::render_checklist(f, chunks[1], app, &theme),
    }

    widgets::render_footer(f, chunks[2], app, &theme);

    if let Some(modal) = app.modal.as_ref() {
        widgets::render_report_modal(f, f.area(), modal, &theme);
    } else if app.show_help {
        widgets::render_help(f, f.area(), &theme);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &JournalApp, theme: &Theme) {
    let tab = match app.tab {
        Tab::Journal => "Journal",
        Tab::Checklist => "Checklist",
    };
    let title = Line::from(vec![
        Span::styled(" Trading Research Journal ", theme.title_style()),
        Span::styled(format!("· {tab}"), theme.inactive_style()),
    ]);

    let header = if app.header.class().is_some() {
        Paragraph::new(title).style(theme.header_style())
    } else {
        Paragraph::new(title).style(theme.header_style()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
    };
    f.render_widget(header, area);
}
