//! Pre-trade checklist panel

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{ChecklistField, JournalApp};
use crate::tui::theme::Theme;

/// Render the checklist form and its result line
pub fn render_checklist(f: &mut Frame, area: Rect, app: &JournalApp, theme: &Theme) {
    let block = Block::default()
        .title(" PRE-TRADE CHECKLIST ")
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    let checklist = &app.checklist;
    let style_for = |field: ChecklistField| {
        if app.checklist_focus == field {
            theme.focus_style()
        } else {
            theme.text_style()
        }
    };
    let mark = |checked: bool| if checked { "[x]" } else { "[ ]" };
    let bias = if checklist.bias.is_empty() {
        "-- select --".to_string()
    } else {
        checklist.bias.to_uppercase()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Bias: ", theme.inactive_style()),
            Span::styled(format!("< {bias} >"), style_for(ChecklistField::Bias)),
        ]),
        Line::from(vec![
            Span::styled("Sentiment: ", theme.inactive_style()),
            Span::styled(
                format!("{}_", checklist.sentiment),
                style_for(ChecklistField::Sentiment),
            ),
        ]),
        Line::from(Span::styled(
            format!("{} Asia Sweep", mark(checklist.asia_sweep)),
            style_for(ChecklistField::AsiaSweep),
        )),
        Line::from(Span::styled(
            format!("{} EAB", mark(checklist.eab)),
            style_for(ChecklistField::Eab),
        )),
        Line::default(),
        Line::from(Span::styled("Enter: execute trade", theme.inactive_style())),
        Line::default(),
        Line::from(Span::styled(app.checklist_result.clone(), theme.title_style())),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}
