use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tradebook::cli::{self, Cli, Commands};
use tradebook::config::AppConfig;
use tradebook::journal::Journal;
use tradebook::tui::{self, JournalApp};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    match cli.command {
        None | Some(Commands::Tui) => {
            // The terminal belongs to the UI, so logs go to a file
            let _guard = init_tui_logging(&config);
            let journal = Journal::open(&config).context("opening journal")?;
            let app = JournalApp::new(journal, &config.ui);
            if let Err(e) = tui::run_tui(app).await {
                error!("TUI error: {}", e);
                return Err(e.into());
            }
        }
        Some(command) => {
            init_logging_simple();
            cli::run_command(&config, command)?;
        }
    }

    Ok(())
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tradebook=debug", config.logging.level)))
}

/// File logging for the TUI. Returns the writer guard, which must live until exit.
fn init_tui_logging(config: &AppConfig) -> Option<WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let log_dir = config.log_dir();

    // `rolling::daily` panics if it can't create the initial file, so check first
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "Warning: Could not create log directory {} ({}), file logging disabled",
            log_dir.display(),
            e
        );
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "tradebook.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let json_layer = config.logging.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking.clone())
            .with_target(true)
    });
    let text_layer = (!config.logging.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking.clone())
            .with_ansi(false) // No color codes in file
            .with_target(true)
    });

    let initialized = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .is_ok();

    if initialized {
        info!("Logging to {}/tradebook.log", log_dir.display());
    }
    Some(guard)
}

/// Minimal logging for CLI commands
fn init_logging_simple() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .try_init();
}
