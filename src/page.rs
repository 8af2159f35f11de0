//! Page furniture around the journal: the report modal with its clipboard
//! button, and the header scroll marker.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub const COPY_LABEL: &str = "Copy to Clipboard";
pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_FAILED_LABEL: &str = "Copy failed";
pub const DOWNLOAD_PDF_LABEL: &str = "Download PDF";

/// Class the header carries once the page is scrolled past the threshold
pub const SCROLLED_CLASS: &str = "scrolled";

/// Destination for copied report text
pub trait Clipboard: Send + 'static {
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// OSC 52 escape sequence asking the terminal to set the clipboard
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Clipboard backed by the terminal's OSC 52 support
pub struct Osc52Clipboard<W> {
    out: W,
}

impl<W: Write + Send + 'static> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()
    }
}

/// Result of a finished clipboard write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed(String),
}

/// Write `text` to the clipboard on a background task and report back on `done`.
/// Fire-and-forget: nothing waits on it and it cannot be cancelled.
pub fn spawn_copy<C: Clipboard>(
    mut clipboard: C,
    text: String,
    done: mpsc::UnboundedSender<CopyOutcome>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = match clipboard.write_text(&text) {
            Ok(()) => CopyOutcome::Copied,
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                CopyOutcome::Failed(e.to_string())
            }
        };
        // Receiver gone means the modal was closed; nothing left to update
        let _ = done.send(outcome);
    })
}

/// Copy button that shows a transient label after each completed copy
#[derive(Debug, Clone)]
pub struct CopyButton {
    label: &'static str,
    reset_at: Option<Instant>,
    hold: Duration,
}

impl CopyButton {
    pub fn new(hold: Duration) -> Self {
        Self {
            label: COPY_LABEL,
            reset_at: None,
            hold,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Record a finished copy at `now`
    pub fn complete(&mut self, outcome: &CopyOutcome, now: Instant) {
        self.label = match outcome {
            CopyOutcome::Copied => COPIED_LABEL,
            CopyOutcome::Failed(_) => COPY_FAILED_LABEL,
        };
        self.reset_at = Some(now + self.hold);
    }

    /// Restore the default label once the hold time has passed
    pub fn tick(&mut self, now: Instant) {
        if self.reset_at.is_some_and(|at| now >= at) {
            self.label = COPY_LABEL;
            self.reset_at = None;
        }
    }
}

/// Transient overlay previewing a generated report
#[derive(Debug, Clone)]
pub struct ReportModal {
    pub report: String,
    pub copy_button: CopyButton,
    pub scroll: u16,
    /// Last action result shown under the buttons
    pub status: Option<String>,
}

impl ReportModal {
    pub fn new(report: String, copied_hold: Duration) -> Self {
        Self {
            report,
            copy_button: CopyButton::new(copied_hold),
            scroll: 0,
            status: None,
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = self.report.lines().count().saturating_sub(1) as u16;
        if self.scroll < max {
            self.scroll += 1;
        }
    }
}

/// Header marker keyed to the vertical scroll position
#[derive(Debug, Clone)]
pub struct HeaderState {
    threshold: u16,
    scrolled: bool,
}

impl HeaderState {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    /// Update from the current scroll offset
    pub fn on_scroll(&mut self, offset: u16) {
        let scrolled = offset > self.threshold;
        if scrolled != self.scrolled {
            debug!("Header scrolled: {}", scrolled);
        }
        self.scrolled = scrolled;
    }

    pub fn class(&self) -> Option<&'static str> {
        self.scrolled.then_some(SCROLLED_CLASS)
    }
}
