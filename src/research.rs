//! Trading research manager
//!
//! Owns the persisted research store: collects the form into observations,
//! formats the daily report and exports it as text or PDF.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};

use crate::error::{Result, TradebookError};
use crate::form::{collect_section, ResearchForm};
use crate::observation::{Observation, ResearchStore, Section};
use crate::pdf::{render_report_pdf, PdfLayout};
use crate::report::{format_report, report_file_name};
use crate::storage::{SharedStore, RESEARCH_KEY};

/// Report export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = TradebookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(TradebookError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Manages observations and report export
pub struct ResearchManager {
    store: SharedStore,
    data: ResearchStore,
    export_dir: PathBuf,
    layout: PdfLayout,
}

impl ResearchManager {
    /// Load the persisted store. A missing blob starts an empty journal; a
    /// blob that fails to parse is reported as corruption, never discarded.
    pub fn load(store: SharedStore, export_dir: impl Into<PathBuf>) -> Result<Self> {
        let data = match store.load(RESEARCH_KEY)? {
            None => {
                debug!("No research data stored, starting fresh");
                ResearchStore::default()
            }
            Some(blob) => serde_json::from_str(&blob).map_err(|e| {
                warn!("Research data failed to parse: {}", e);
                TradebookError::StorageCorrupted {
                    key: RESEARCH_KEY.to_string(),
                    reason: e.to_string(),
                }
            })?,
        };
        info!("Loaded {} observations", data.len());

        Ok(Self {
            store,
            data,
            export_dir: export_dir.into(),
            layout: PdfLayout::default(),
        })
    }

    pub fn with_layout(mut self, layout: PdfLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn observations(&self) -> &[Observation] {
        &self.data.observations
    }

    pub fn current_observation(&self) -> Option<&Observation> {
        self.data.current_observation.as_ref()
    }

    /// Snapshot the form into a new observation, append it and persist the store
    pub fn collect_observation_data(&mut self, form: &ResearchForm) -> Result<Observation> {
        self.collect_at(form, Utc::now())
    }

    fn collect_at(&mut self, form: &ResearchForm, at: DateTime<Utc>) -> Result<Observation> {
        let mut observation = Observation::new(at);
        for section in Section::ALL {
            if let Some(form_section) = form.section(section) {
                *observation.section_mut(section) = collect_section(form_section);
            }
        }

        self.data.push(observation.clone());
        self.save()?;
        info!(
            "Observation saved ({} total) at {}",
            self.data.len(),
            observation.timestamp
        );
        Ok(observation)
    }

    /// Persist the whole store as one blob
    fn save(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.data)?;
        self.store.save(RESEARCH_KEY, &blob)
    }

    /// Report for the current observation, `None` if nothing was saved yet
    pub fn generate_daily_report(&self) -> Option<String> {
        match self.current_observation() {
            Some(observation) => Some(format_report(observation)),
            None => {
                warn!("{}", TradebookError::NoObservation);
                None
            }
        }
    }

    /// Regenerate the current report and write it out in `format`
    pub fn export_report(&self, format: &str) -> Result<PathBuf> {
        let format: ExportFormat = format.parse()?;
        let text = self
            .generate_daily_report()
            .ok_or(TradebookError::NoObservation)?;

        match format {
            ExportFormat::Text => {
                let name = report_file_name(Utc::now(), format.extension());
                self.download_text_file(&name, &text)
            }
            ExportFormat::Pdf => self.download_report_as_pdf(&text),
        }
    }

    /// Save plain UTF-8 text under `name` in the export directory
    pub fn download_text_file(&self, name: &str, text: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(name);
        std::fs::write(&path, text)?;
        info!("Report saved to {:?}", path);
        Ok(path)
    }

    /// Lay the report out as a PDF and save it under a date-stamped name
    pub fn download_report_as_pdf(&self, text: &str) -> Result<PathBuf> {
        let now = Local::now();
        let bytes = render_report_pdf(text, now, &self.layout)?;

        std::fs::create_dir_all(&self.export_dir)?;
        let path = self
            .export_dir
            .join(report_file_name(now.with_timezone(&Utc), ExportFormat::Pdf.extension()));
        std::fs::write(&path, bytes)?;
        info!("PDF report saved to {:?}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::FieldValue;
    use crate::storage::{MemoryStore, MockKeyValueStore};
    use chrono::TimeZone;
    use std::path::Path;
    use std::rc::Rc;

    fn manager(dir: &Path) -> (ResearchManager, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::new());
        let mgr = ResearchManager::load(store.clone(), dir).unwrap();
        (mgr, store)
    }

    fn filled_form() -> ResearchForm {
        let mut form = ResearchForm::research_layout();
        form.set_assignment("marketSentiments.bullishPercentage=70").unwrap();
        form.set_assignment("marketSentiments.bearishPercentage=30").unwrap();
        form.set_assignment("tradingObservations.tradingBias=Long").unwrap();
        form.set_assignment("economicOutlook.economicEvents=CPI,FOMC").unwrap();
        form
    }

    #[test]
    fn test_collect_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let (mut mgr, store) = manager(dir.path());

        let obs = mgr.collect_observation_data(&filled_form()).unwrap();

        assert_eq!(mgr.observations().len(), 1);
        assert_eq!(mgr.current_observation(), Some(&obs));
        assert_eq!(
            obs.market_sentiments["bullishPercentage"],
            FieldValue::Text("70".into())
        );
        assert_eq!(
            obs.economic_outlook["economicEvents"],
            FieldValue::Multi(vec!["CPI".into(), "FOMC".into()])
        );

        let persisted: ResearchStore =
            serde_json::from_str(&store.get(RESEARCH_KEY).unwrap()).unwrap();
        assert_eq!(persisted.observations, vec![obs.clone()]);
        assert_eq!(persisted.current_observation, Some(obs));
    }

    #[test]
    fn test_duplicate_submissions_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let (mut mgr, _) = manager(dir.path());
        let form = filled_form();
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();

        let a = mgr.collect_at(&form, at).unwrap();
        let b = mgr.collect_at(&form, at).unwrap();

        assert_eq!(a, b);
        assert_eq!(mgr.observations().len(), 2);
    }

    #[test]
    fn test_persist_then_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (mut mgr, store) = manager(dir.path());
        mgr.collect_observation_data(&filled_form()).unwrap();
        mgr.collect_observation_data(&ResearchForm::research_layout())
            .unwrap();

        let reloaded = ResearchManager::load(store.clone(), dir.path()).unwrap();
        assert_eq!(reloaded.observations(), mgr.observations());
        assert_eq!(reloaded.current_observation(), mgr.current_observation());
    }

    #[test]
    fn test_corrupted_store_is_surfaced() {
        let store = Rc::new(MemoryStore::new().with_entry(RESEARCH_KEY, "{not json"));
        let err = ResearchManager::load(store, "/tmp").err().unwrap();
        assert!(matches!(
            err,
            TradebookError::StorageCorrupted { key, .. } if key == RESEARCH_KEY
        ));
    }

    #[test]
    fn test_report_requires_observation() {
        let dir = tempfile::tempdir().unwrap();
        let (mgr, _) = manager(dir.path());

        assert!(mgr.generate_daily_report().is_none());
        assert!(matches!(
            mgr.export_report("txt"),
            Err(TradebookError::NoObservation)
        ));
    }

    #[test]
    fn test_export_unsupported_format_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (mut mgr, _) = manager(&dir.path().join("reports"));
        mgr.collect_observation_data(&filled_form()).unwrap();

        let err = mgr.export_report("xml").unwrap_err();

        assert!(matches!(err, TradebookError::UnsupportedFormat(f) if f == "xml"));
        assert!(!dir.path().join("reports").exists());
    }

    #[test]
    fn test_export_text_and_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let (mut mgr, _) = manager(dir.path());
        mgr.collect_observation_data(&filled_form()).unwrap();

        let txt = mgr.export_report("txt").unwrap();
        let content = std::fs::read_to_string(&txt).unwrap();
        assert_eq!(Some(content), mgr.generate_daily_report());
        assert!(txt
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("trading-report-"));

        let pdf = mgr.export_report("PDF").unwrap();
        assert_eq!(pdf.extension().unwrap(), "pdf");
        assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_save_failure_propagates() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_load().returning(|_| Ok(None));
        mock.expect_save()
            .times(1)
            .returning(|_, _| Err(std::io::Error::other("read-only").into()));

        let mut mgr = ResearchManager::load(Rc::new(mock), "/tmp").unwrap();
        let err = mgr
            .collect_observation_data(&ResearchForm::research_layout())
            .unwrap_err();
        assert!(matches!(err, TradebookError::Io(_)));
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("Txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!("docx".parse::<ExportFormat>().is_err());
    }
}
