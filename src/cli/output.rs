//! Output formatting for `tradebook` commands.
//!
//! Supports two modes: human-readable tables (default) and JSON (--json).

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::observation::{Observation, Section};
use crate::report::MISSING;
use crate::sentiment::ChartConfig;

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

/// Print a vec of Tabled + Serialize items in the chosen mode.
pub fn print_items<T: Tabled + Serialize>(items: &[T], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            if items.is_empty() {
                println!("(no observations)");
            } else {
                let table = Table::new(items).to_string();
                println!("{table}");
            }
        }
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(items)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Print a single Serialize item as pretty JSON.
pub fn print_item<T: Serialize>(item: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(item)?;
    println!("{json}");
    Ok(())
}

/// One line of `tradebook list`
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct ObservationRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Recorded")]
    pub timestamp: String,
    #[tabled(rename = "Control")]
    pub market_control: String,
    #[tabled(rename = "USD")]
    pub usd_outlook: String,
    #[tabled(rename = "Bull %")]
    pub bullish: String,
    #[tabled(rename = "Bear %")]
    pub bearish: String,
    #[tabled(rename = "Bias")]
    pub bias: String,
}

impl ObservationRow {
    pub fn new(index: usize, observation: &Observation) -> Self {
        let field = |section: Section, id: &str| {
            observation
                .field(section, id)
                .unwrap_or_else(|| MISSING.to_string())
        };
        Self {
            index,
            timestamp: observation.timestamp.clone(),
            market_control: field(Section::BuyersResearch, "marketControl"),
            usd_outlook: field(Section::EconomicOutlook, "usdOutlook"),
            bullish: field(Section::MarketSentiments, "bullishPercentage"),
            bearish: field(Section::MarketSentiments, "bearishPercentage"),
            bias: field(Section::TradingObservations, "tradingBias"),
        }
    }
}

/// One slice of `tradebook chart`
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct SliceRow {
    #[tabled(rename = "Slice")]
    pub label: String,
    #[tabled(rename = "Value")]
    pub value: f64,
    #[tabled(rename = "Share %")]
    pub share: String,
    #[tabled(rename = "Color")]
    pub color: String,
}

pub fn slice_rows(chart: &ChartConfig) -> Vec<SliceRow> {
    let (bullish, bearish) = chart.values();
    let (bullish_share, bearish_share) = chart.shares();
    let colors = chart
        .data
        .datasets
        .first()
        .map(|d| d.background_color.clone())
        .unwrap_or_default();

    chart
        .data
        .labels
        .iter()
        .zip([(bullish, bullish_share), (bearish, bearish_share)])
        .enumerate()
        .map(|(i, (label, (value, share)))| SliceRow {
            label: label.clone(),
            value,
            share: format!("{share:.1}"),
            color: colors.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}
