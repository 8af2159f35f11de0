//! Journal records: observations and the persisted research store

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TradebookError};

/// Captured value of one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, textarea, select and radio inputs
    Text(String),
    /// Checkbox groups: every checked value
    Multi(Vec<String>),
}

impl FieldValue {
    /// Display form used in reports; empty values count as absent
    pub fn display(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) if s.trim().is_empty() => None,
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Multi(values) if values.is_empty() => None,
            FieldValue::Multi(values) => Some(values.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Field id to captured value, for one section
pub type SectionData = BTreeMap<String, FieldValue>;

/// One logical group of the research form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    BuyersResearch,
    EconomicOutlook,
    MarketSentiments,
    TradingObservations,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::BuyersResearch,
        Section::EconomicOutlook,
        Section::MarketSentiments,
        Section::TradingObservations,
    ];

    /// Key used in persisted observations and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Section::BuyersResearch => "buyersResearch",
            Section::EconomicOutlook => "economicOutlook",
            Section::MarketSentiments => "marketSentiments",
            Section::TradingObservations => "tradingObservations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::BuyersResearch => "Buyers Research",
            Section::EconomicOutlook => "Economic Outlook",
            Section::MarketSentiments => "Market Sentiments",
            Section::TradingObservations => "Trading Observations",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = TradebookError;

    fn from_str(s: &str) -> Result<Self> {
        Section::ALL
            .into_iter()
            .find(|section| section.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| TradebookError::UnknownField(s.to_string()))
    }
}

/// One journal entry: a snapshot of the research form at save time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// ISO-8601 creation time
    pub timestamp: String,
    #[serde(default)]
    pub buyers_research: SectionData,
    #[serde(default)]
    pub economic_outlook: SectionData,
    #[serde(default)]
    pub market_sentiments: SectionData,
    #[serde(default)]
    pub trading_observations: SectionData,
}

impl Observation {
    /// Empty observation stamped with `at`
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            buyers_research: SectionData::new(),
            economic_outlook: SectionData::new(),
            market_sentiments: SectionData::new(),
            trading_observations: SectionData::new(),
        }
    }

    pub fn section(&self, section: Section) -> &SectionData {
        match section {
            Section::BuyersResearch => &self.buyers_research,
            Section::EconomicOutlook => &self.economic_outlook,
            Section::MarketSentiments => &self.market_sentiments,
            Section::TradingObservations => &self.trading_observations,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut SectionData {
        match section {
            Section::BuyersResearch => &mut self.buyers_research,
            Section::EconomicOutlook => &mut self.economic_outlook,
            Section::MarketSentiments => &mut self.market_sentiments,
            Section::TradingObservations => &mut self.trading_observations,
        }
    }

    /// Displayable value of one field, `None` when absent or empty
    pub fn field(&self, section: Section, id: &str) -> Option<String> {
        self.section(section).get(id).and_then(FieldValue::display)
    }

    /// Parsed creation time, if the stored timestamp is well formed
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Persisted journal state: every observation plus the latest one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStore {
    #[serde(default)]
    pub observations: Vec<Observation>,
    #[serde(default)]
    pub current_observation: Option<Observation>,
}

impl ResearchStore {
    /// Append an observation and make it current
    pub fn push(&mut self, observation: Observation) {
        self.current_observation = Some(observation.clone());
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_observation_json_shape() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 13, 30, 0).unwrap();
        let mut obs = Observation::new(at);
        obs.market_sentiments
            .insert("bullishPercentage".into(), "70".into());
        obs.economic_outlook.insert(
            "economicEvents".into(),
            FieldValue::Multi(vec!["CPI".into(), "FOMC".into()]),
        );

        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["timestamp"], "2026-10-19T13:30:00.000Z");
        assert_eq!(json["marketSentiments"]["bullishPercentage"], "70");
        assert_eq!(
            json["economicOutlook"]["economicEvents"],
            serde_json::json!(["CPI", "FOMC"])
        );
        assert!(json["buyersResearch"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_field_display_treats_empty_as_absent() {
        let mut obs = Observation::new(Utc::now());
        obs.trading_observations.insert("entryTarget".into(), "".into());
        obs.trading_observations
            .insert("setups".into(), FieldValue::Multi(vec![]));

        assert_eq!(obs.field(Section::TradingObservations, "entryTarget"), None);
        assert_eq!(obs.field(Section::TradingObservations, "setups"), None);
        assert_eq!(obs.field(Section::TradingObservations, "missing"), None);
    }

    #[test]
    fn test_store_push_sets_current() {
        let mut store = ResearchStore::default();
        assert!(store.is_empty());

        let first = Observation::new(Utc::now());
        store.push(first.clone());
        store.push(first.clone());

        assert_eq!(store.len(), 2);
        assert_eq!(store.current_observation.as_ref(), Some(&first));
    }

    #[test]
    fn test_section_parse() {
        assert_eq!(
            "economicOutlook".parse::<Section>().unwrap(),
            Section::EconomicOutlook
        );
        assert!("weather".parse::<Section>().is_err());
    }

    #[test]
    fn test_store_accepts_null_current() {
        let store: ResearchStore =
            serde_json::from_str(r#"{"observations":[],"currentObservation":null}"#).unwrap();
        assert!(store.current_observation.is_none());
    }
}
