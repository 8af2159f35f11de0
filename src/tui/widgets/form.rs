//! Research form panel
//!
//! Renders the four sections as a scrolling list of inputs, keeping the
//! focused element in view.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::form::{ElementKind, FormElement};
use crate::tui::app::JournalApp;
use crate::tui::theme::Theme;

/// Render the research form
pub fn render_form(f: &mut Frame, area: Rect, app: &JournalApp, theme: &Theme) {
    let block = Block::default()
        .title(" RESEARCH ")
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = form_lines(app, theme);
    let cursor = app.cursor_line() as u16;
    let scroll = cursor.saturating_sub(inner.height.saturating_sub(2));

    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

/// One line per section title, group caption and element, in the same order
/// `JournalApp::cursor_line` counts them
fn form_lines<'a>(app: &'a JournalApp, theme: &Theme) -> Vec<Line<'a>> {
    let focused = app.focused();
    let mut lines = Vec::new();

    for (s, section) in app.journal.form.sections.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            section.section.title().to_uppercase(),
            theme.title_style(),
        )));

        let mut last_group: Option<&str> = None;
        for (e, el) in section.elements.iter().enumerate() {
            if el.is_group_member() && last_group != Some(el.id.as_str()) {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{}:", group_caption(&el.id)), theme.text_style()),
                ]));
            }
            last_group = el.is_group_member().then_some(el.id.as_str());

            let is_focused = focused.is_some_and(|p| p.section == s && p.element == e);
            lines.push(element_line(el, is_focused, theme));
        }
    }

    lines
}

fn element_line<'a>(el: &'a FormElement, focused: bool, theme: &Theme) -> Line<'a> {
    let value_style = if focused {
        theme.focus_style()
    } else {
        theme.text_style()
    };
    let marker = if focused { "> " } else { "  " };

    match &el.kind {
        ElementKind::Text | ElementKind::Number | ElementKind::TextArea => {
            let caret = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(marker, theme.focus_style()),
                Span::styled(format!("{}: ", el.label), theme.inactive_style()),
                Span::styled(format!("{}{}", el.value, caret), value_style),
            ])
        }
        ElementKind::Select { .. } => {
            let shown = if el.value.is_empty() {
                "-- select --"
            } else {
                el.value.as_str()
            };
            Line::from(vec![
                Span::styled(marker, theme.focus_style()),
                Span::styled(format!("{}: ", el.label), theme.inactive_style()),
                Span::styled(format!("< {shown} >"), value_style),
            ])
        }
        ElementKind::Checkbox { checked } => {
            let mark = if *checked { "[x]" } else { "[ ]" };
            Line::from(vec![
                Span::styled(marker, theme.focus_style()),
                Span::raw("  "),
                Span::styled(format!("{mark} {}", el.label), value_style),
            ])
        }
        ElementKind::Radio { checked } => {
            let mark = if *checked { "(*)" } else { "( )" };
            Line::from(vec![
                Span::styled(marker, theme.focus_style()),
                Span::raw("  "),
                Span::styled(format!("{mark} {}", el.label), value_style),
            ])
        }
    }
}

/// "economicEvents" -> "Economic Events"
fn group_caption(id: &str) -> String {
    let mut caption = String::with_capacity(id.len() + 4);
    for (i, c) in id.chars().enumerate() {
        if i == 0 {
            caption.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            caption.push(' ');
            caption.push(c);
        } else {
            caption.push(c);
        }
    }
    caption
}
