//! Light/dark palettes and the theme manager
//!
//! A palette is a fixed set of style variables written onto the document root.
//! The manager persists the active choice under its own storage key and reports
//! every change back to the caller so dependents (the sentiment chart) can be
//! recolored by the composition root.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, TradebookError};
use crate::storage::{SharedStore, THEME_KEY};

/// Class set on the document root while the dark palette is active
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Named theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(&self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    /// Label shown on the toggle control while this theme is active
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemeName::Light => "🌙 Dark Mode",
            ThemeName::Dark => "☀️ Light Mode",
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            ThemeName::Light => &LIGHT_PALETTE,
            ThemeName::Dark => &DARK_PALETTE,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = TradebookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            other => Err(TradebookError::InvalidTheme(other.to_string())),
        }
    }
}

/// A named set of style variables
#[derive(Debug)]
pub struct Palette {
    pub name: ThemeName,
    pub variables: [(&'static str, &'static str); 9],
}

impl Palette {
    /// Value of one style variable
    pub fn get(&self, variable: &str) -> Option<&'static str> {
        self.variables
            .iter()
            .find(|(name, _)| *name == variable)
            .map(|(_, value)| *value)
    }

    /// Bullish/bearish slice colors for the sentiment chart
    pub fn chart_colors(&self) -> [&'static str; 2] {
        [
            self.get("--bullish-color").unwrap_or("#4CAF50"),
            self.get("--bearish-color").unwrap_or("#F44336"),
        ]
    }
}

pub static LIGHT_PALETTE: Palette = Palette {
    name: ThemeName::Light,
    variables: [
        ("--bg-color", "#f5f7fa"),
        ("--text-color", "#1f2933"),
        ("--card-bg", "#ffffff"),
        ("--border-color", "#d9e2ec"),
        ("--accent-color", "#2563eb"),
        ("--header-bg", "#ffffff"),
        ("--input-bg", "#ffffff"),
        ("--bullish-color", "#28a745"),
        ("--bearish-color", "#dc3545"),
    ],
};

pub static DARK_PALETTE: Palette = Palette {
    name: ThemeName::Dark,
    variables: [
        ("--bg-color", "#121212"),
        ("--text-color", "#e0e0e0"),
        ("--card-bg", "#1e1e1e"),
        ("--border-color", "#333333"),
        ("--accent-color", "#64b5f6"),
        ("--header-bg", "#1a1a1a"),
        ("--input-bg", "#2a2a2a"),
        ("--bullish-color", "#4CAF50"),
        ("--bearish-color", "#F44336"),
    ],
};

/// Root of the rendered document: live style variables, classes and the
/// optional theme toggle control
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentRoot {
    style: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    toggle_label: Option<String>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document that carries a theme toggle control
    pub fn with_toggle_control() -> Self {
        Self {
            toggle_label: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn set_property(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_string(), value.to_string());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.style
    }

    pub fn set_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn toggle_label(&self) -> Option<&str> {
        self.toggle_label.as_deref()
    }

    fn set_toggle_label(&mut self, label: &str) {
        if let Some(existing) = self.toggle_label.as_mut() {
            *existing = label.to_string();
        }
    }
}

/// Notification produced by every successful theme application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChanged {
    pub previous: ThemeName,
    pub current: ThemeName,
}

/// Holds the active theme and persists it
pub struct ThemeManager {
    store: SharedStore,
    current: ThemeName,
    /// Why the stored theme was ignored at startup, until a new one is saved
    load_error: Option<String>,
}

impl ThemeManager {
    /// Create a manager with the persisted theme. An unreadable or unknown
    /// stored value falls back to light and is kept as `load_error`; the
    /// stored blob is left untouched until the next save.
    pub fn new(store: SharedStore) -> Self {
        let (current, load_error) = match Self::load_from(&store) {
            Ok(theme) => (theme, None),
            Err(e) => {
                warn!("Ignoring stored theme, using light: {}", e);
                (ThemeName::Light, Some(e.to_string()))
            }
        };
        Self {
            store,
            current,
            load_error,
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn current(&self) -> ThemeName {
        self.current
    }

    /// Persisted theme name, `light` when nothing is stored
    pub fn load_theme(&self) -> Result<ThemeName> {
        Self::load_from(&self.store)
    }

    fn load_from(store: &SharedStore) -> Result<ThemeName> {
        let Some(blob) = store.load(THEME_KEY)? else {
            debug!("No stored theme, defaulting to light");
            return Ok(ThemeName::Light);
        };
        blob.trim().parse()
    }

    /// Apply a theme by name onto the document root
    pub fn apply_theme(&mut self, name: &str, root: &mut DocumentRoot) -> Result<ThemeChanged> {
        let theme: ThemeName = name.parse()?;
        Ok(self.apply(theme, root))
    }

    /// Apply an already-parsed theme onto the document root
    pub fn apply(&mut self, theme: ThemeName, root: &mut DocumentRoot) -> ThemeChanged {
        for (variable, value) in theme.palette().variables.iter() {
            root.set_property(variable, value);
        }
        root.set_class(DARK_MODE_CLASS, theme == ThemeName::Dark);
        root.set_toggle_label(theme.toggle_label());

        let previous = self.current;
        self.current = theme;
        debug!("Applied {} theme", theme);

        ThemeChanged {
            previous,
            current: theme,
        }
    }

    /// Flip between light and dark, apply and persist
    pub fn toggle_theme(&mut self, root: &mut DocumentRoot) -> Result<ThemeChanged> {
        let next = self.current.toggled();
        let changed = self.apply(next, root);
        self.save()?;
        info!("Theme switched to {}", next);
        Ok(changed)
    }

    /// Persist the active theme as its plain name
    pub fn save(&mut self) -> Result<()> {
        self.store.save(THEME_KEY, self.current.as_str())?;
        self.load_error = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MockKeyValueStore};
    use std::rc::Rc;

    fn manager() -> (ThemeManager, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::new());
        let mgr = ThemeManager::new(store.clone());
        (mgr, store)
    }

    #[test]
    fn test_load_theme_defaults_to_light() {
        let (mgr, _) = manager();
        assert_eq!(mgr.load_theme().unwrap(), ThemeName::Light);
        assert_eq!(mgr.current(), ThemeName::Light);
    }

    #[test]
    fn test_load_theme_reads_plain_name() {
        let store = Rc::new(MemoryStore::new().with_entry(THEME_KEY, "dark"));
        let mgr = ThemeManager::new(store);
        assert_eq!(mgr.current(), ThemeName::Dark);
        assert_eq!(mgr.load_error(), None);
    }

    #[test]
    fn test_load_theme_trims_whitespace() {
        let store = Rc::new(MemoryStore::new().with_entry(THEME_KEY, " dark\n"));
        assert_eq!(ThemeManager::new(store).current(), ThemeName::Dark);
    }

    #[test]
    fn test_unknown_stored_theme_falls_back_to_light() {
        let store = Rc::new(MemoryStore::new().with_entry(THEME_KEY, "sepia"));
        let mgr = ThemeManager::new(store.clone());

        assert_eq!(mgr.current(), ThemeName::Light);
        assert_eq!(mgr.load_error(), Some("Invalid theme: sepia"));
        assert!(matches!(
            mgr.load_theme().unwrap_err(),
            TradebookError::InvalidTheme(name) if name == "sepia"
        ));
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("sepia"));
    }

    #[test]
    fn test_save_replaces_bad_stored_theme() {
        let store = Rc::new(MemoryStore::new().with_entry(THEME_KEY, "{garbage"));
        let mut mgr = ThemeManager::new(store.clone());
        assert!(mgr.load_error().is_some());

        mgr.toggle_theme(&mut DocumentRoot::new()).unwrap();

        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(mgr.load_error(), None);
        assert_eq!(mgr.load_theme().unwrap(), ThemeName::Dark);
    }

    #[test]
    fn test_unreadable_store_falls_back_to_light() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_load()
            .returning(|_| Err(std::io::Error::other("permission denied").into()));

        let mgr = ThemeManager::new(Rc::new(mock));
        assert_eq!(mgr.current(), ThemeName::Light);
        assert!(mgr.load_error().unwrap().contains("permission denied"));
    }

    #[test]
    fn test_apply_theme_writes_every_variable() {
        let (mut mgr, _) = manager();
        let mut root = DocumentRoot::with_toggle_control();

        let changed = mgr.apply_theme("dark", &mut root).unwrap();

        assert_eq!(changed.previous, ThemeName::Light);
        assert_eq!(changed.current, ThemeName::Dark);
        assert_eq!(root.properties().len(), 9);
        assert_eq!(root.property("--bg-color"), Some("#121212"));
        assert!(root.has_class(DARK_MODE_CLASS));
        assert_eq!(root.toggle_label(), Some("☀️ Light Mode"));
    }

    #[test]
    fn test_apply_theme_without_toggle_control() {
        let (mut mgr, _) = manager();
        let mut root = DocumentRoot::new();
        mgr.apply_theme("light", &mut root).unwrap();
        assert_eq!(root.toggle_label(), None);
        assert!(!root.has_class(DARK_MODE_CLASS));
    }

    #[test]
    fn test_apply_invalid_theme_fails_and_leaves_root_untouched() {
        let (mut mgr, _) = manager();
        let mut root = DocumentRoot::new();
        mgr.apply_theme("light", &mut root).unwrap();
        let before = root.clone();

        let err = mgr.apply_theme("solarized", &mut root).unwrap_err();

        assert!(matches!(err, TradebookError::InvalidTheme(_)));
        assert_eq!(root, before);
        assert_eq!(mgr.current(), ThemeName::Light);
    }

    #[test]
    fn test_toggle_twice_restores_variables() {
        let (mut mgr, store) = manager();
        let mut root = DocumentRoot::with_toggle_control();
        mgr.apply(ThemeName::Light, &mut root);
        let original = root.clone();

        mgr.toggle_theme(&mut root).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_ne!(root, original);

        mgr.toggle_theme(&mut root).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(root, original);
    }

    #[test]
    fn test_toggle_surfaces_storage_failure() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_load().returning(|_| Ok(None));
        mock.expect_save()
            .returning(|_, _| Err(std::io::Error::other("disk full").into()));

        let mut mgr = ThemeManager::new(Rc::new(mock));
        let mut root = DocumentRoot::new();
        let err = mgr.toggle_theme(&mut root).unwrap_err();
        assert!(matches!(err, TradebookError::Io(_)));
    }

    #[test]
    fn test_chart_colors_follow_palette() {
        assert_eq!(DARK_PALETTE.chart_colors(), ["#4CAF50", "#F44336"]);
        assert_eq!(LIGHT_PALETTE.chart_colors(), ["#28a745", "#dc3545"]);
    }
}
