//! Pre-trade checklist
//!
//! Standalone from the research journal: validates the bias, the sentiment
//! behind it and the two checklist confirmations, then reports the outcome.

use tracing::info;

/// Checklist inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeChecklist {
    pub bias: String,
    pub sentiment: String,
    pub asia_sweep: bool,
    pub eab: bool,
}

/// Why a checklist was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistIssue {
    MissingBias,
    MissingSentiment,
    IncompleteChecklist,
}

impl ChecklistIssue {
    pub fn message(&self) -> &'static str {
        match self {
            ChecklistIssue::MissingBias => "Please select a bias.",
            ChecklistIssue::MissingSentiment => "Please provide the sentiment behind the bias.",
            ChecklistIssue::IncompleteChecklist => "Please complete all checklist items.",
        }
    }
}

/// Anything that can show the result line
pub trait ResultSink {
    fn display_result(&mut self, message: &str);
}

impl ResultSink for String {
    fn display_result(&mut self, message: &str) {
        self.clear();
        self.push_str(message);
    }
}

impl TradeChecklist {
    /// First failing check, in bias, sentiment, checklist order
    pub fn validate(&self) -> Result<(), ChecklistIssue> {
        if self.bias.is_empty() {
            return Err(ChecklistIssue::MissingBias);
        }
        if self.sentiment.is_empty() {
            return Err(ChecklistIssue::MissingSentiment);
        }
        if !self.asia_sweep || !self.eab {
            return Err(ChecklistIssue::IncompleteChecklist);
        }
        Ok(())
    }

    /// Validate and write either the failure or the confirmation to `sink`.
    /// Returns whether the trade was confirmed.
    pub fn execute(&self, sink: &mut impl ResultSink) -> bool {
        match self.validate() {
            Err(issue) => {
                sink.display_result(issue.message());
                false
            }
            Ok(()) => {
                let message = format!(
                    "Trade executed: {} with sentiment '{}'.",
                    self.bias.to_uppercase(),
                    self.sentiment
                );
                info!("{}", message);
                sink.display_result(&message);
                true
            }
        }
    }
}
