//! Journal composition root
//!
//! Owns one session's state: the document root, theme manager, sentiment chart,
//! research manager and the form being edited. Theme changes are forwarded from
//! here to the chart; no component holds a reference to another.

use std::path::PathBuf;
use std::rc::Rc;

use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::form::ResearchForm;
use crate::observation::Observation;
use crate::pdf::PdfLayout;
use crate::research::ResearchManager;
use crate::sentiment::{ChartConfig, SentimentVisualizer};
use crate::storage::{FileStore, SharedStore};
use crate::theme::{DocumentRoot, ThemeChanged, ThemeManager, ThemeName};

pub struct Journal {
    root: DocumentRoot,
    theme: ThemeManager,
    sentiment: SentimentVisualizer,
    research: ResearchManager,
    pub form: ResearchForm,
}

impl Journal {
    /// Open the journal stored in the configured data directory
    pub fn open(config: &AppConfig) -> Result<Self> {
        let store: SharedStore = Rc::new(FileStore::new(&config.storage.data_dir));
        Self::with_store(
            store,
            config.export.dir.clone(),
            PdfLayout::from(&config.export),
        )
    }

    /// Assemble a journal over any store
    pub fn with_store(store: SharedStore, export_dir: PathBuf, layout: PdfLayout) -> Result<Self> {
        let mut theme = ThemeManager::new(store.clone());
        let research = ResearchManager::load(store, export_dir)?.with_layout(layout);

        let mut root = DocumentRoot::with_toggle_control();
        let initial = theme.current();
        theme.apply(initial, &mut root);

        let mut journal = Self {
            root,
            theme,
            sentiment: SentimentVisualizer::new(initial),
            research,
            form: ResearchForm::research_layout(),
        };
        journal.update_sentiment_chart();
        info!(
            "Journal ready: {} theme, {} observations",
            initial,
            journal.research.observations().len()
        );
        Ok(journal)
    }

    pub fn root(&self) -> &DocumentRoot {
        &self.root
    }

    pub fn theme(&self) -> ThemeName {
        self.theme.current()
    }

    pub fn research(&self) -> &ResearchManager {
        &self.research
    }

    pub fn sentiment(&self) -> &SentimentVisualizer {
        &self.sentiment
    }

    /// Startup notice when the stored theme could not be used
    pub fn theme_notice(&self) -> Option<String> {
        self.theme
            .load_error()
            .map(|e| format!("Stored theme ignored, using light ({e})"))
    }

    /// Flip the theme, persist it and recolor the chart
    pub fn toggle_theme(&mut self) -> Result<ThemeName> {
        let changed = self.theme.toggle_theme(&mut self.root)?;
        self.forward(changed);
        Ok(changed.current)
    }

    /// Switch to a named theme and persist it
    pub fn set_theme(&mut self, name: &str) -> Result<ThemeName> {
        let changed = self.theme.apply_theme(name, &mut self.root)?;
        self.theme.save()?;
        self.forward(changed);
        Ok(changed.current)
    }

    fn forward(&mut self, changed: ThemeChanged) {
        self.sentiment.on_theme_changed(changed.current);
    }

    /// Redraw the chart from the form's sentiment inputs
    pub fn update_sentiment_chart(&mut self) -> &ChartConfig {
        let (bullish, bearish) = self.form.sentiment_inputs();
        self.sentiment.update_sentiment_chart(&bullish, &bearish)
    }

    /// Save the current form as a new observation
    pub fn save_observation(&mut self) -> Result<Observation> {
        let observation = self.research.collect_observation_data(&self.form)?;
        self.update_sentiment_chart();
        Ok(observation)
    }

    pub fn generate_daily_report(&self) -> Option<String> {
        self.research.generate_daily_report()
    }

    pub fn export_report(&self, format: &str) -> Result<PathBuf> {
        self.research.export_report(format)
    }

    pub fn download_report_as_pdf(&self, text: &str) -> Result<PathBuf> {
        self.research.download_report_as_pdf(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, RESEARCH_KEY, THEME_KEY};
    use crate::theme::DARK_MODE_CLASS;

    fn journal(store: Rc<MemoryStore>, dir: &std::path::Path) -> Journal {
        Journal::with_store(store, dir.to_path_buf(), PdfLayout::default()).unwrap()
    }

    #[test]
    fn test_startup_applies_persisted_theme() {
        let dir = tempfile::tempdir().unwrap();
        let store = Rc::new(MemoryStore::new().with_entry(THEME_KEY, "dark"));
        let j = journal(store, dir.path());

        assert_eq!(j.theme(), ThemeName::Dark);
        assert!(j.root().has_class(DARK_MODE_CLASS));
        assert_eq!(j.root().toggle_label(), Some("☀️ Light Mode"));
        assert_eq!(j.sentiment().rendered_charts(), 1);
    }

    #[test]
    fn test_toggle_forwards_to_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut j = journal(Rc::new(MemoryStore::new()), dir.path());
        j.form
            .set_assignment("marketSentiments.bullishPercentage=70")
            .unwrap();
        j.form
            .set_assignment("marketSentiments.bearishPercentage=30")
            .unwrap();
        j.update_sentiment_chart();

        assert_eq!(j.toggle_theme().unwrap(), ThemeName::Dark);

        let chart = j.sentiment().chart().unwrap();
        assert_eq!(chart.data.datasets[0].data, vec![70.0, 30.0]);
        assert_eq!(
            chart.data.datasets[0].background_color,
            vec!["#4CAF50", "#F44336"]
        );
    }

    #[test]
    fn test_set_theme_rejects_unknown_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = Rc::new(MemoryStore::new());
        let mut j = journal(store.clone(), dir.path());

        assert!(j.set_theme("neon").is_err());
        assert_eq!(j.theme(), ThemeName::Light);
        assert!(store.get(THEME_KEY).is_none());

        j.set_theme("dark").unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_bad_stored_theme_does_not_block_journal() {
        let dir = tempfile::tempdir().unwrap();
        let store = Rc::new(MemoryStore::new().with_entry(THEME_KEY, "\"dark"));
        let mut j = journal(store.clone(), dir.path());

        assert_eq!(j.theme(), ThemeName::Light);
        assert!(!j.root().has_class(DARK_MODE_CLASS));
        assert!(j.theme_notice().unwrap().starts_with("Stored theme ignored"));
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("\"dark"));

        j.save_observation().unwrap();
        assert!(j.generate_daily_report().is_some());

        j.set_theme("light").unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(j.theme_notice(), None);
    }

    #[test]
    fn test_save_observation_then_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = Rc::new(MemoryStore::new());
        let mut j = journal(store.clone(), dir.path());
        assert!(j.generate_daily_report().is_none());

        j.form
            .set_assignment("tradingObservations.entryTarget=4520")
            .unwrap();
        j.save_observation().unwrap();

        let report = j.generate_daily_report().unwrap();
        assert!(report.contains("Entry Target: 4520"));
        assert!(store.get(RESEARCH_KEY).is_some());
    }
}
