//! Daily report text layout

use chrono::{DateTime, Local, Utc};

use crate::observation::{Observation, Section};

/// Placeholder for any field that is absent or empty
pub const MISSING: &str = "N/A";

const RULE: &str = "==================================================";
const SUBRULE: &str = "--------------------------------------------------";

/// Report line layout: section, then (label, field id) rows
const LAYOUT: &[(Section, &[(&str, &str)])] = &[
    (
        Section::BuyersResearch,
        &[
            ("Market Control", "marketControl"),
            ("Key Levels", "keyLevels"),
            ("Volume Profile", "volumeProfile"),
            ("Notes", "buyersNotes"),
        ],
    ),
    (
        Section::EconomicOutlook,
        &[
            ("USD Outlook", "usdOutlook"),
            ("Interest Rates", "interestRates"),
            ("Inflation Trend", "inflation"),
            ("Key Events", "economicEvents"),
            ("Notes", "outlookNotes"),
        ],
    ),
    (
        Section::MarketSentiments,
        &[
            ("Bullish", "bullishPercentage"),
            ("Bearish", "bearishPercentage"),
            ("Risk Mood", "riskMood"),
            ("Drivers", "sentimentDrivers"),
        ],
    ),
    (
        Section::TradingObservations,
        &[
            ("Trading Bias", "tradingBias"),
            ("Entry Target", "entryTarget"),
            ("Stop Loss", "stopLoss"),
            ("Take Profit", "takeProfit"),
            ("Setups", "setups"),
            ("Notes", "observationNotes"),
        ],
    ),
];

/// Long-form date, e.g. "Monday, October 19, 2026"
pub fn long_date(at: DateTime<Local>) -> String {
    at.format("%A, %B %-d, %Y").to_string()
}

/// Render an observation as the fixed-layout daily report.
///
/// Each field falls back to "N/A" on its own; an observation with an
/// unparseable timestamp reports the date as "N/A" too.
pub fn format_report(observation: &Observation) -> String {
    let date = observation
        .created_at()
        .map(|at| long_date(at.with_timezone(&Local)))
        .unwrap_or_else(|| MISSING.to_string());

    let mut out = String::new();
    out.push_str("DAILY TRADING RESEARCH REPORT\n");
    out.push_str(&format!("Date: {date}\n"));
    out.push_str(RULE);
    out.push('\n');

    for (section, rows) in LAYOUT {
        out.push('\n');
        out.push_str(&section.title().to_uppercase());
        out.push('\n');
        out.push_str(SUBRULE);
        out.push('\n');
        for (label, id) in rows.iter() {
            let value = observation
                .field(*section, id)
                .map(|v| decorate(id, v))
                .unwrap_or_else(|| MISSING.to_string());
            out.push_str(&format!("{label}: {value}\n"));
        }
    }

    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Recorded: {}\n", recorded(observation)));
    out
}

/// Percent sign for the sentiment fields
fn decorate(id: &str, value: String) -> String {
    match id {
        "bullishPercentage" | "bearishPercentage" if !value.ends_with('%') => format!("{value}%"),
        _ => value,
    }
}

/// Report file name for a given day, e.g. `trading-report-2026-10-19.txt`
pub fn report_file_name(at: DateTime<Utc>, extension: &str) -> String {
    format!(
        "trading-report-{}.{extension}",
        at.with_timezone(&Local).format("%Y-%m-%d")
    )
}

fn recorded(observation: &Observation) -> &str {
    if observation.timestamp.trim().is_empty() {
        MISSING
    } else {
        &observation.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::FieldValue;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn empty_observation() -> Observation {
        Observation {
            timestamp: String::new(),
            buyers_research: Default::default(),
            economic_outlook: Default::default(),
            market_sentiments: Default::default(),
            trading_observations: Default::default(),
        }
    }

    #[test]
    fn test_empty_observation_is_all_placeholders() {
        let report = format_report(&empty_observation());

        assert!(report.contains("Date: N/A"));
        assert!(report.contains("Recorded: N/A"));
        let rows: Vec<&str> = report.lines().filter(|l| l.contains(": ")).collect();
        assert_eq!(rows.len(), 21);
        assert!(rows.iter().all(|l| l.ends_with(": N/A")), "{report}");
    }

    #[test]
    fn test_report_layout() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let mut obs = Observation::new(at);
        obs.market_sentiments
            .insert("bullishPercentage".into(), "70".into());
        obs.trading_observations
            .insert("tradingBias".into(), "Long".into());
        obs.trading_observations.insert(
            "setups".into(),
            FieldValue::Multi(vec!["Asia Sweep".into(), "EAB".into()]),
        );

        let report = format_report(&obs);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "DAILY TRADING RESEARCH REPORT");
        assert_eq!(lines[1], format!("Date: {}", long_date(at.with_timezone(&Local))));
        assert!(lines.contains(&"MARKET SENTIMENTS"));
        assert!(lines.contains(&"Bullish: 70%"));
        assert!(lines.contains(&"Bearish: N/A"));
        assert!(lines.contains(&"Trading Bias: Long"));
        assert!(lines.contains(&"Setups: Asia Sweep, EAB"));
        assert_eq!(
            lines.last().copied(),
            Some("Recorded: 2026-10-19T12:00:00.000Z")
        );
    }

    #[test]
    fn test_long_date() {
        let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        assert_eq!(long_date(at), "Monday, October 19, 2026");
    }

    #[test]
    fn test_report_file_name() {
        let at = Local
            .with_ymd_and_hms(2026, 3, 5, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(report_file_name(at, "pdf"), "trading-report-2026-03-05.pdf");
    }
}
