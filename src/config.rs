use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON blob per storage key
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory reports are written into
    pub dir: PathBuf,
    /// Title printed at the top of PDF reports
    #[serde(default = "default_pdf_title")]
    pub pdf_title: String,
    /// Footer printed at the bottom of PDF reports
    #[serde(default = "default_pdf_footer")]
    pub pdf_footer: String,
    /// Body text wrap width in millimetres
    #[serde(default = "default_wrap_width")]
    pub wrap_width_mm: f32,
}

fn default_pdf_title() -> String {
    "Daily Trading Research Report".to_string()
}

fn default_pdf_footer() -> String {
    "Generated by Trading Research Journal".to_string()
}

fn default_wrap_width() -> f32 {
    180.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for the TUI log file
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Form line past which the header is marked as scrolled
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: u16,
    /// Seconds the copy button keeps its "Copied!" label
    #[serde(default = "default_copied_label_secs")]
    pub copied_label_secs: u64,
}

fn default_scroll_threshold() -> u16 {
    8
}

fn default_copied_label_secs() -> u64 {
    2
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: default_scroll_threshold(),
            copied_label_secs: default_copied_label_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let base = base_dir();

        let builder = Config::builder()
            // Start with default values
            .set_default("storage.data_dir", base.join("data").to_string_lossy().to_string())?
            .set_default("export.dir", base.join("reports").to_string_lossy().to_string())?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("ui.scroll_threshold", 8)?
            .set_default("ui.copied_label_secs", 2)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("TRADEBOOK_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (TRADEBOOK__STORAGE__DATA_DIR, etc.)
            .add_source(
                Environment::with_prefix("TRADEBOOK")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a single explicit file, still honouring env overrides
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let base = base_dir();

        Config::builder()
            .set_default("storage.data_dir", base.join("data").to_string_lossy().to_string())?
            .set_default("export.dir", base.join("reports").to_string_lossy().to_string())?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::from(path.as_ref()).required(true))
            .add_source(
                Environment::with_prefix("TRADEBOOK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Configuration rooted at an explicit directory, used by tests and `--data-dir`
    pub fn rooted_at<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            storage: StorageConfig {
                data_dir: root.join("data"),
            },
            export: ExportConfig {
                dir: root.join("reports"),
                pdf_title: default_pdf_title(),
                pdf_footer: default_pdf_footer(),
                wrap_width_mm: default_wrap_width(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                json: false,
                dir: Some(root.join("logs")),
            },
            ui: UiConfig::default(),
        }
    }

    /// Directory the TUI writes its log file into
    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .dir
            .clone()
            .unwrap_or_else(|| base_dir().join("logs"))
    }
}

/// Per-user application directory (e.g. ~/.local/share/tradebook)
fn base_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tradebook")
}
