//! Sentiment pie chart
//!
//! Builds the two-slice bullish/bearish chart from the raw sentiment inputs.
//! The chart definition keeps the `{type, data, options}` shape of a pie chart
//! config so it can be dumped as JSON, and the TUI draws it from the same data.

use serde::Serialize;
use tracing::debug;

use crate::theme::ThemeName;

pub const BULLISH_LABEL: &str = "Bullish";
pub const BEARISH_LABEL: &str = "Bearish";

/// Complete chart definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: ChartPlugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: String,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLabels {
    pub color: String,
}

impl ChartConfig {
    fn pie(bullish: f64, bearish: f64, theme: ThemeName) -> Self {
        let mut config = Self {
            chart_type: "pie".to_string(),
            data: ChartData {
                labels: vec![BULLISH_LABEL.to_string(), BEARISH_LABEL.to_string()],
                datasets: vec![Dataset {
                    data: vec![bullish, bearish],
                    background_color: Vec::new(),
                }],
            },
            options: ChartOptions {
                responsive: true,
                plugins: ChartPlugins {
                    legend: Legend {
                        position: "bottom".to_string(),
                        labels: LegendLabels {
                            color: String::new(),
                        },
                    },
                },
            },
        };
        config.recolor(theme);
        config
    }

    /// Apply theme colors to the slices and legend
    fn recolor(&mut self, theme: ThemeName) {
        let palette = theme.palette();
        let colors = palette.chart_colors();
        for dataset in &mut self.data.datasets {
            dataset.background_color = colors.iter().map(|c| c.to_string()).collect();
        }
        self.options.plugins.legend.labels.color =
            palette.get("--text-color").unwrap_or("#000000").to_string();
    }

    /// Bullish and bearish values
    pub fn values(&self) -> (f64, f64) {
        let data = self
            .data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[]);
        (
            data.first().copied().unwrap_or(0.0),
            data.get(1).copied().unwrap_or(0.0),
        )
    }

    /// Slice shares in percent of the total; both zero when the total is zero
    pub fn shares(&self) -> (f64, f64) {
        let (bullish, bearish) = self.values();
        let total = bullish + bearish;
        if total == 0.0 {
            return (0.0, 0.0);
        }
        (bullish / total * 100.0, bearish / total * 100.0)
    }
}

/// Parse a sentiment input from its leading number, so `70%` and `70abc`
/// both read as 70. No leading number counts as 0; range is not checked.
pub fn parse_sentiment(raw: &str) -> f64 {
    let text = raw.trim_start();
    let number = &text[..numeric_prefix_len(text)];
    match number.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Byte length of the decimal number (sign, digits, fraction, exponent) at the start of `text`
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(end);
    end += whole;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    end
}

/// Owns the chart currently shown in the sentiment container
#[derive(Debug)]
pub struct SentimentVisualizer {
    chart: Option<ChartConfig>,
    theme: ThemeName,
    redraws: u64,
}

impl SentimentVisualizer {
    pub fn new(theme: ThemeName) -> Self {
        Self {
            chart: None,
            theme,
            redraws: 0,
        }
    }

    /// Discard any previous chart and draw a new one from the raw inputs
    pub fn update_sentiment_chart(&mut self, bullish: &str, bearish: &str) -> &ChartConfig {
        let bullish = parse_sentiment(bullish);
        let bearish = parse_sentiment(bearish);

        if self.chart.take().is_some() {
            debug!("Replacing existing sentiment chart");
        }
        self.redraws += 1;
        self.chart.insert(ChartConfig::pie(bullish, bearish, self.theme))
    }

    /// Recolor the existing chart in place; no-op before the first draw
    pub fn on_theme_changed(&mut self, theme: ThemeName) {
        self.theme = theme;
        if let Some(chart) = self.chart.as_mut() {
            chart.recolor(theme);
            debug!("Sentiment chart recolored for {} theme", theme);
        }
    }

    pub fn chart(&self) -> Option<&ChartConfig> {
        self.chart.as_ref()
    }

    /// Number of charts currently in the container (0 or 1)
    pub fn rendered_charts(&self) -> usize {
        usize::from(self.chart.is_some())
    }

    /// Total draws since creation
    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}
