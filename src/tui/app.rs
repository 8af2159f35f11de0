//! TUI application state
//!
//! Wraps the journal with the screen-only state: focus, active tab, the report
//! modal, status notices and the standalone checklist.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::checklist::TradeChecklist;
use crate::config::UiConfig;
use crate::form::{ElementPos, BEARISH_FIELD, BULLISH_FIELD};
use crate::journal::Journal;
use crate::page::{spawn_copy, Clipboard, CopyOutcome, HeaderState, Osc52Clipboard, ReportModal};
use crate::tui::event::KeyAction;

/// Biases offered on the checklist tab
pub const BIAS_OPTIONS: [&str; 3] = ["", "long", "short"];

/// Screen tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Journal,
    Checklist,
}

/// Checklist tab inputs, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistField {
    Bias,
    Sentiment,
    AsiaSweep,
    Eab,
}

impl ChecklistField {
    const ORDER: [ChecklistField; 4] = [
        ChecklistField::Bias,
        ChecklistField::Sentiment,
        ChecklistField::AsiaSweep,
        ChecklistField::Eab,
    ];

    fn step(self, forward: bool) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Self::ORDER.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        Self::ORDER[next]
    }
}

/// TUI Application state
pub struct JournalApp {
    pub journal: Journal,
    pub tab: Tab,
    /// Index into the form's element positions
    pub cursor: usize,
    pub header: HeaderState,
    pub modal: Option<ReportModal>,
    /// One-line status shown in the footer (alerts, save confirmations)
    pub notice: Option<String>,
    pub checklist: TradeChecklist,
    pub checklist_focus: ChecklistField,
    pub checklist_result: String,
    pub show_help: bool,
    running: bool,
    copied_hold: Duration,
    copy_tx: mpsc::UnboundedSender<CopyOutcome>,
    copy_rx: mpsc::UnboundedReceiver<CopyOutcome>,
}

impl JournalApp {
    pub fn new(journal: Journal, ui: &UiConfig) -> Self {
        let (copy_tx, copy_rx) = mpsc::unbounded_channel();
        let notice = journal.theme_notice();
        Self {
            journal,
            tab: Tab::Journal,
            cursor: 0,
            header: HeaderState::new(ui.scroll_threshold),
            modal: None,
            notice,
            checklist: TradeChecklist::default(),
            checklist_focus: ChecklistField::Bias,
            checklist_result: String::new(),
            show_help: false,
            running: true,
            copied_hold: Duration::from_secs(ui.copied_label_secs),
            copy_tx,
            copy_rx,
        }
    }

    /// Check if app should continue running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Signal the app to quit
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Position of the focused form element
    pub fn focused(&self) -> Option<ElementPos> {
        self.journal.form.positions().get(self.cursor).copied()
    }

    /// Line of the focused element in the rendered form (section headers and
    /// group captions included)
    pub fn cursor_line(&self) -> usize {
        let mut line = 0;
        for (s, section) in self.journal.form.sections.iter().enumerate() {
            line += 1;
            let mut last_group: Option<&str> = None;
            for (e, el) in section.elements.iter().enumerate() {
                if el.is_group_member() && last_group != Some(el.id.as_str()) {
                    line += 1;
                }
                last_group = el.is_group_member().then_some(el.id.as_str());
                if let Some(pos) = self.focused() {
                    if pos.section == s && pos.element == e {
                        return line;
                    }
                }
                line += 1;
            }
        }
        line
    }

    /// Drain finished clipboard writes and expire transient labels
    pub fn tick(&mut self, now: Instant) {
        while let Ok(outcome) = self.copy_rx.try_recv() {
            if let Some(modal) = self.modal.as_mut() {
                modal.copy_button.complete(&outcome, now);
            }
        }
        if let Some(modal) = self.modal.as_mut() {
            modal.copy_button.tick(now);
        }
    }

    /// Dispatch one key press
    pub fn handle_key(&mut self, action: KeyAction) {
        if self.modal.is_some() {
            self.handle_modal_key(action);
            return;
        }
        if self.show_help {
            if matches!(action, KeyAction::Help | KeyAction::Escape) {
                self.show_help = false;
            }
            return;
        }

        match action {
            KeyAction::Quit => self.quit(),
            KeyAction::Escape => self.quit(),
            KeyAction::Help => self.show_help = true,
            KeyAction::ToggleTab => {
                self.tab = match self.tab {
                    Tab::Journal => Tab::Checklist,
                    Tab::Checklist => Tab::Journal,
                }
            }
            KeyAction::ToggleTheme => self.toggle_theme(),
            KeyAction::Save => self.save_observation(),
            KeyAction::Report => self.open_report(),
            _ => match self.tab {
                Tab::Journal => self.handle_form_key(action),
                Tab::Checklist => self.handle_checklist_key(action),
            },
        }
    }

    fn handle_form_key(&mut self, action: KeyAction) {
        let count = self.journal.form.positions().len();
        if count == 0 {
            return;
        }
        let Some(pos) = self.focused() else {
            return;
        };

        match action {
            KeyAction::NextField | KeyAction::Confirm => self.move_cursor(true, count),
            KeyAction::PrevField => self.move_cursor(false, count),
            KeyAction::Left | KeyAction::Right => {
                if let Some(el) = self.journal.form.element_mut(pos) {
                    el.cycle_option(action == KeyAction::Right);
                }
            }
            KeyAction::Activate => {
                let accepts_text = self
                    .journal
                    .form
                    .element(pos)
                    .is_some_and(|el| el.accepts_text());
                if accepts_text {
                    self.type_char(pos, ' ');
                } else {
                    self.journal.form.activate(pos);
                }
            }
            KeyAction::Input(c) => self.type_char(pos, c),
            KeyAction::Backspace => {
                let edited = match self.journal.form.element_mut(pos) {
                    Some(el) if el.accepts_text() => el.value.pop().is_some(),
                    _ => false,
                };
                if edited {
                    self.after_edit(pos);
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, forward: bool, count: usize) {
        self.cursor = if forward {
            (self.cursor + 1) % count
        } else {
            (self.cursor + count - 1) % count
        };
        let line = self.cursor_line() as u16;
        self.header.on_scroll(line);
    }

    fn type_char(&mut self, pos: ElementPos, c: char) {
        let edited = match self.journal.form.element_mut(pos) {
            Some(el) if el.accepts_text() => {
                el.value.push(c);
                true
            }
            _ => false,
        };
        if edited {
            self.after_edit(pos);
        }
    }

    /// Sentiment inputs redraw the chart as they change
    fn after_edit(&mut self, pos: ElementPos) {
        let is_sentiment = self
            .journal
            .form
            .element(pos)
            .is_some_and(|el| el.id == BULLISH_FIELD || el.id == BEARISH_FIELD);
        if is_sentiment {
            self.journal.update_sentiment_chart();
        }
    }

    fn handle_checklist_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::NextField => self.checklist_focus = self.checklist_focus.step(true),
            KeyAction::PrevField => self.checklist_focus = self.checklist_focus.step(false),
            KeyAction::Confirm => self.execute_checklist(),
            KeyAction::Left | KeyAction::Right if self.checklist_focus == ChecklistField::Bias => {
                let idx = BIAS_OPTIONS
                    .iter()
                    .position(|b| *b == self.checklist.bias)
                    .unwrap_or(0);
                let len = BIAS_OPTIONS.len();
                let next = if action == KeyAction::Right {
                    (idx + 1) % len
                } else {
                    (idx + len - 1) % len
                };
                self.checklist.bias = BIAS_OPTIONS[next].to_string();
            }
            KeyAction::Activate => match self.checklist_focus {
                ChecklistField::AsiaSweep => self.checklist.asia_sweep = !self.checklist.asia_sweep,
                ChecklistField::Eab => self.checklist.eab = !self.checklist.eab,
                ChecklistField::Sentiment => self.checklist.sentiment.push(' '),
                ChecklistField::Bias => {}
            },
            KeyAction::Input(c) if self.checklist_focus == ChecklistField::Sentiment => {
                self.checklist.sentiment.push(c);
            }
            KeyAction::Backspace if self.checklist_focus == ChecklistField::Sentiment => {
                self.checklist.sentiment.pop();
            }
            _ => {}
        }
    }

    pub fn execute_checklist(&mut self) {
        self.checklist.execute(&mut self.checklist_result);
    }

    fn handle_modal_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Escape | KeyAction::Report => self.close_modal(),
            KeyAction::Quit => self.quit(),
            KeyAction::PrevField => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.scroll_up();
                }
            }
            KeyAction::NextField => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.scroll_down();
                }
            }
            KeyAction::Input('c') => self.copy_report_with(Osc52Clipboard::stdout()),
            KeyAction::Input('p') => self.download_pdf(),
            _ => {}
        }
    }

    pub fn toggle_theme(&mut self) {
        match self.journal.toggle_theme() {
            Ok(theme) => self.notice = Some(format!("Switched to {theme} theme")),
            Err(e) => {
                error!("Theme toggle failed: {}", e);
                self.notice = Some(e.to_string());
            }
        }
    }

    pub fn save_observation(&mut self) {
        match self.journal.save_observation() {
            Ok(obs) => {
                let total = self.journal.research().observations().len();
                self.notice = Some(format!("Observation saved ({total} total) at {}", obs.timestamp));
            }
            Err(e) => {
                error!("Saving observation failed: {}", e);
                self.notice = Some(format!("Save failed: {e}"));
            }
        }
    }

    /// Open the report modal, or show the no-data notice
    pub fn open_report(&mut self) {
        match self.journal.generate_daily_report() {
            Some(report) => {
                self.modal = Some(ReportModal::new(report, self.copied_hold));
            }
            None => {
                self.notice = Some(crate::error::TradebookError::NoObservation.to_string());
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Start a clipboard write of the previewed report
    pub fn copy_report_with<C: Clipboard>(&mut self, clipboard: C) {
        if let Some(modal) = self.modal.as_ref() {
            spawn_copy(clipboard, modal.report.clone(), self.copy_tx.clone());
        }
    }

    pub fn download_pdf(&mut self) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        match self.journal.download_report_as_pdf(&modal.report) {
            Ok(path) => {
                info!("PDF written to {:?}", path);
                modal.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                error!("PDF export failed: {}", e);
                modal.status = Some(format!("PDF export failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{COPIED_LABEL, COPY_LABEL};
    use crate::pdf::PdfLayout;
    use crate::storage::MemoryStore;
    use crate::theme::ThemeName;
    use std::io;
    use std::rc::Rc;

    struct NullClipboard;

    impl Clipboard for NullClipboard {
        fn write_text(&mut self, _text: &str) -> io::Result<()> {
            Ok(())
        }
    }

    fn app(dir: &std::path::Path) -> JournalApp {
        let journal = Journal::with_store(
            Rc::new(MemoryStore::new()),
            dir.to_path_buf(),
            PdfLayout::default(),
        )
        .unwrap();
        JournalApp::new(journal, &UiConfig::default())
    }

    fn focus(app: &mut JournalApp, id: &str) {
        let positions = app.journal.form.positions();
        app.cursor = positions
            .iter()
            .position(|p| app.journal.form.element(*p).unwrap().id == id)
            .unwrap();
    }

    #[test]
    fn test_typing_sentiment_redraws_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        focus(&mut app, BULLISH_FIELD);

        app.handle_key(KeyAction::Input('6'));
        app.handle_key(KeyAction::Input('5'));

        let chart = app.journal.sentiment().chart().unwrap();
        assert_eq!(chart.values(), (65.0, 0.0));
        assert_eq!(app.journal.sentiment().rendered_charts(), 1);
    }

    #[test]
    fn test_bad_stored_theme_shows_startup_notice() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new().with_entry(crate::storage::THEME_KEY, "sepia");
        let journal =
            Journal::with_store(Rc::new(store), dir.path().to_path_buf(), PdfLayout::default())
                .unwrap();
        let app = JournalApp::new(journal, &UiConfig::default());

        assert_eq!(app.journal.theme(), ThemeName::Light);
        assert_eq!(
            app.notice.as_deref(),
            Some("Stored theme ignored, using light (Invalid theme: sepia)")
        );
    }

    #[test]
    fn test_report_without_observation_shows_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_key(KeyAction::Report);
        assert!(app.modal.is_none());
        assert_eq!(
            app.notice.as_deref(),
            Some("No observation data available. Please save your observations first.")
        );
    }

    #[test]
    fn test_save_then_report_opens_modal() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_key(KeyAction::Save);
        app.handle_key(KeyAction::Report);

        let modal = app.modal.as_ref().unwrap();
        assert!(modal.report.starts_with("DAILY TRADING RESEARCH REPORT"));

        app.handle_key(KeyAction::Escape);
        assert!(app.modal.is_none());
        assert!(app.is_running());
    }

    #[tokio::test]
    async fn test_copy_relabels_button_until_hold_expires() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_key(KeyAction::Save);
        app.handle_key(KeyAction::Report);

        app.copy_report_with(NullClipboard);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let now = Instant::now();
        app.tick(now);
        assert_eq!(app.modal.as_ref().unwrap().copy_button.label(), COPIED_LABEL);

        app.tick(now + Duration::from_secs(2));
        assert_eq!(app.modal.as_ref().unwrap().copy_button.label(), COPY_LABEL);
    }

    #[test]
    fn test_pdf_download_from_modal() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_key(KeyAction::Save);
        app.handle_key(KeyAction::Report);
        app.handle_key(KeyAction::Input('p'));

        let status = app.modal.as_ref().unwrap().status.clone().unwrap();
        assert!(status.starts_with("Saved"), "{status}");
        assert!(std::fs::read_dir(dir.path()).unwrap().count() == 1);
    }

    #[test]
    fn test_theme_toggle_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_key(KeyAction::ToggleTheme);
        assert_eq!(app.journal.theme(), ThemeName::Dark);
        assert_eq!(app.notice.as_deref(), Some("Switched to dark theme"));
    }

    #[test]
    fn test_checklist_tab_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_key(KeyAction::ToggleTab);
        assert_eq!(app.tab, Tab::Checklist);

        app.handle_key(KeyAction::Confirm);
        assert_eq!(app.checklist_result, "Please select a bias.");

        app.handle_key(KeyAction::Right);
        app.handle_key(KeyAction::NextField);
        for c in "CPI miss".chars() {
            let action = if c == ' ' { KeyAction::Activate } else { KeyAction::Input(c) };
            app.handle_key(action);
        }
        app.handle_key(KeyAction::NextField);
        app.handle_key(KeyAction::Activate);
        app.handle_key(KeyAction::NextField);
        app.handle_key(KeyAction::Activate);
        app.handle_key(KeyAction::Confirm);

        assert_eq!(
            app.checklist_result,
            "Trade executed: LONG with sentiment 'CPI miss'."
        );
    }

    #[test]
    fn test_radio_activation_through_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        focus(&mut app, "tradingBias");
        app.handle_key(KeyAction::Activate);

        let pos = app.focused().unwrap();
        assert!(app.journal.form.element(pos).unwrap().is_checked());
    }

    #[test]
    fn test_cursor_wraps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_key(KeyAction::PrevField);
        assert_eq!(app.cursor, app.journal.form.positions().len() - 1);
        app.handle_key(KeyAction::NextField);
        assert_eq!(app.cursor, 0);
    }
}
