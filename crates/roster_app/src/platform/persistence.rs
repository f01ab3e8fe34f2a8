use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::{engine_error, engine_info, engine_warn};
use roster_core::Settings;
use roster_engine::{write_atomically, DEFAULT_OUTPUT_FILE, DEFAULT_WEBDRIVER_URL};
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILENAME: &str = ".roster_settings.ron";

/// On-disk settings. Fields missing from older files take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    pub headless: bool,
    pub date_filter_enabled: bool,
    pub days_back: String,
    pub output_path: PathBuf,
    pub webdriver_url: String,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        let ui = Settings::default();
        Self {
            headless: ui.headless,
            date_filter_enabled: ui.date_filter_enabled,
            days_back: ui.days_back_input,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
        }
    }
}

impl PersistedSettings {
    /// The user-editable part, as the display state knows it.
    pub fn ui_settings(&self) -> Settings {
        Settings {
            headless: self.headless,
            date_filter_enabled: self.date_filter_enabled,
            days_back_input: self.days_back.clone(),
        }
    }

    fn merge(&mut self, settings: &Settings) {
        self.headless = settings.headless;
        self.date_filter_enabled = settings.date_filter_enabled;
        self.days_back = settings.days_back_input.clone();
    }
}

/// Settings file plus the last values read from or written to it.
pub struct SettingsStore {
    path: PathBuf,
    current: PersistedSettings,
}

impl SettingsStore {
    pub fn load(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            current: read_settings(path),
        }
    }

    pub fn current(&self) -> &PersistedSettings {
        &self.current
    }

    /// Records new UI settings and writes the file; failures are only logged.
    pub fn save(&mut self, settings: &Settings) {
        self.current.merge(settings);

        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&self.current, pretty) {
            Ok(text) => text,
            Err(err) => {
                engine_error!("Failed to serialize settings: {}", err);
                return;
            }
        };

        if let Err(err) = write_atomically(&self.path, &content) {
            engine_error!("Failed to write settings to {:?}: {}", self.path, err);
        }
    }
}

fn read_settings(path: &Path) -> PersistedSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return PersistedSettings::default();
        }
        Err(err) => {
            engine_warn!("Failed to read settings from {:?}: {}", path, err);
            return PersistedSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            engine_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            engine_warn!("Failed to parse settings from {:?}: {}", path, err);
            PersistedSettings::default()
        }
    }
}
