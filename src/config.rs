/// Tunable settings for the classifier, the format handlers and the text analyzer
///
/// Every default reproduces the stock heuristics. A JSON settings file may override
/// any subset of the fields; missing fields keep their defaults.

use log::{error, info};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub classifier: ClassifierSettings,
    pub handlers: HandlerSettings,
    pub analytics: AnalyticsSettings,
}

/// Thresholds used by the format classifier rules
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Share of the text the extracted numbers must cover for the `numbers` label
    pub numeric_density_threshold: f64,
    /// Number of numeric tokens that must be exceeded
    pub min_numbers: usize,
    /// Number of URLs that must be exceeded
    pub min_urls: usize,
    /// Number of email addresses that must be exceeded
    pub min_emails: usize,
    /// Number of non-empty lines that must be exceeded for a text list
    pub min_list_lines: usize,
    /// Every list line must be strictly shorter than this
    pub max_list_line_chars: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            numeric_density_threshold: 0.5,
            min_numbers: 3,
            min_urls: 2,
            min_emails: 2,
            min_list_lines: 3,
            max_list_line_chars: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HandlerSettings {
    /// How many domains the URL summary ranks
    pub top_domains: usize,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self { top_domains: 5 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub words_per_minute: f64,
    /// How many frequent words the report lists
    pub top_words: usize,
    /// A language is only reported when its marker score exceeds this
    pub language_min_score: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            words_per_minute: 200.0,
            top_words: 5,
            language_min_score: 2,
        }
    }
}

/// Load settings from a JSON file if provided
///
/// A missing or malformed file is logged and the defaults are used instead.
///
/// # Arguments
///
/// * `config_path` - Optional path to a JSON settings file
///
/// # Returns
///
/// The effective settings
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let path = match config_path {
        Some(path) => path,
        None => return Settings::default(),
    };

    if !path.exists() {
        error!("Configuration file not found: {}", path.display());
        return Settings::default();
    }

    let config_str = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!("Could not read configuration file {}: {}", path.display(), e);
            return Settings::default();
        }
    };

    match serde_json::from_str(&config_str) {
        Ok(settings) => {
            info!("Loaded configuration from {}", path.display());
            settings
        }
        Err(e) => {
            error!("Invalid JSON in configuration file: {}", e);
            Settings::default()
        }
    }
}
