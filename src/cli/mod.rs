//! Tradebook CLI
//!
//! Commands:
//! - `tradebook tui` - Interactive journal (default)
//! - `tradebook record` - Save an observation from flags or a values file
//! - `tradebook report` / `export` - Show or write the daily report
//! - `tradebook list` - Observation history
//! - `tradebook theme` - Show or change the stored theme
//! - `tradebook chart` - Sentiment chart definition
//! - `tradebook execute` - Pre-trade checklist

pub mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::checklist::TradeChecklist;
use crate::config::AppConfig;
use crate::error::TradebookError;
use crate::journal::Journal;
use crate::sentiment::SentimentVisualizer;
use output::{print_item, print_items, slice_rows, ObservationRow, OutputMode};

/// Trading Research Journal CLI
#[derive(Parser, Debug)]
#[command(name = "tradebook")]
#[command(author, version, about = "Daily trading research journal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (default: layered config/ directory)
    #[arg(short, long, global = true, env = "TRADEBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep data and reports under this directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive journal
    Tui,

    /// Save a new observation
    Record {
        /// TOML file with `[section] field = value` entries
        #[arg(long)]
        values: Option<PathBuf>,
        /// `section.field=value`, repeatable; applied after --values
        #[arg(long = "set", value_name = "SECTION.FIELD=VALUE")]
        set: Vec<String>,
    },

    /// Print the daily report for the latest observation
    Report,

    /// Write the daily report to the export directory
    Export {
        /// txt or pdf
        #[arg(short, long, default_value = "txt")]
        format: String,
    },

    /// List saved observations
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show or change the theme
    #[command(subcommand)]
    Theme(ThemeCommands),

    /// Build the sentiment chart for two percentages
    Chart {
        #[arg(long)]
        bullish: String,
        #[arg(long)]
        bearish: String,
        #[arg(long)]
        json: bool,
    },

    /// Run the pre-trade checklist
    Execute {
        /// long or short
        #[arg(long, default_value = "")]
        bias: String,
        #[arg(long, default_value = "")]
        sentiment: String,
        #[arg(long)]
        asia_sweep: bool,
        #[arg(long)]
        eab: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Print the stored theme
    Show,
    /// Flip between light and dark
    Toggle,
    /// Set the theme by name
    Set { name: String },
}

impl Cli {
    /// Resolve configuration from `--config` and `--data-dir`
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_file(path)
                .with_context(|| format!("loading config file {}", path.display()))?,
            None => AppConfig::load().context("loading configuration")?,
        };
        if let Some(root) = &self.data_dir {
            let rooted = AppConfig::rooted_at(root);
            config.storage = rooted.storage;
            config.export.dir = rooted.export.dir;
        }
        Ok(config)
    }
}

/// Run one non-interactive command
pub fn run_command(config: &AppConfig, command: Commands) -> Result<()> {
    debug!("Running command: {:?}", command);
    match command {
        Commands::Tui => anyhow::bail!("the TUI is started by the binary, not run_command"),
        Commands::Record { values, set } => {
            let mut journal = Journal::open(config)?;
            let timestamp = record(&mut journal, values.as_deref(), &set)?;
            println!(
                "Observation saved at {} ({} total)",
                timestamp,
                journal.research().observations().len()
            );
        }
        Commands::Report => {
            let journal = Journal::open(config)?;
            let report = journal
                .generate_daily_report()
                .ok_or(TradebookError::NoObservation)?;
            println!("{report}");
        }
        Commands::Export { format } => {
            let journal = Journal::open(config)?;
            let path = journal.export_report(&format)?;
            println!("Report written to {}", path.display());
        }
        Commands::List { json } => {
            let journal = Journal::open(config)?;
            let observations = journal.research().observations();
            match OutputMode::from_json_flag(json) {
                OutputMode::Json => print_item(&observations)?,
                OutputMode::Table => {
                    let rows: Vec<ObservationRow> = observations
                        .iter()
                        .enumerate()
                        .map(|(i, obs)| ObservationRow::new(i + 1, obs))
                        .collect();
                    print_items(&rows, OutputMode::Table)?;
                }
            }
        }
        Commands::Theme(cmd) => {
            let mut journal = Journal::open(config)?;
            let theme = match cmd {
                ThemeCommands::Show => journal.theme(),
                ThemeCommands::Toggle => journal.toggle_theme()?,
                ThemeCommands::Set { name } => journal.set_theme(&name)?,
            };
            println!("{theme}");
        }
        Commands::Chart {
            bullish,
            bearish,
            json,
        } => {
            let journal = Journal::open(config)?;
            let mut visualizer = SentimentVisualizer::new(journal.theme());
            let chart = visualizer.update_sentiment_chart(&bullish, &bearish);
            match OutputMode::from_json_flag(json) {
                OutputMode::Json => print_item(chart)?,
                OutputMode::Table => print_items(&slice_rows(chart), OutputMode::Table)?,
            }
        }
        Commands::Execute {
            bias,
            sentiment,
            asia_sweep,
            eab,
        } => {
            let message = execute(TradeChecklist {
                bias,
                sentiment,
                asia_sweep,
                eab,
            })?;
            println!("{message}");
        }
    }
    Ok(())
}

/// Fill the journal form from a values file and assignments, then save it.
/// Returns the new observation's timestamp.
pub fn record(journal: &mut Journal, values: Option<&Path>, set: &[String]) -> Result<String> {
    if let Some(path) = values {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading values file {}", path.display()))?;
        journal.form.fill_from_toml(&content)?;
    }
    for assignment in set {
        journal.form.set_assignment(assignment)?;
    }
    let observation = journal.save_observation()?;
    Ok(observation.timestamp)
}

/// Run the checklist; a rejected checklist is an error carrying its message
pub fn execute(checklist: TradeChecklist) -> Result<String> {
    let mut result = String::new();
    if checklist.execute(&mut result) {
        Ok(result)
    } else {
        Err(TradebookError::Validation(result).into())
    }
}
