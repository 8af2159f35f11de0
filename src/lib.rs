pub mod checklist;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod journal;
pub mod observation;
pub mod page;
pub mod pdf;
pub mod report;
pub mod research;
pub mod sentiment;
pub mod storage;
pub mod theme;
pub mod tui;

pub use checklist::{ChecklistIssue, ResultSink, TradeChecklist};
pub use config::AppConfig;
pub use error::{Result, TradebookError};
pub use form::{FormElement, ResearchForm};
pub use journal::Journal;
pub use observation::{FieldValue, Observation, ResearchStore, Section};
pub use research::{ExportFormat, ResearchManager};
pub use sentiment::{ChartConfig, SentimentVisualizer};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStore};
pub use theme::{DocumentRoot, ThemeManager, ThemeName};
