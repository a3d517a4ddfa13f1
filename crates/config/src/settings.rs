// Display and export settings
// Loaded from ~/.config/potgrid/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use potgrid_engine::rounding::{Rounding, DEFAULT_EPSILON, DEFAULT_MAX_DECIMALS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Display
    #[serde(rename = "display.roundValues")]
    pub round_values: bool,

    #[serde(rename = "display.maxDecimals")]
    pub max_decimals: u32,

    #[serde(rename = "display.epsilon")]
    pub epsilon: f64,

    // Export
    #[serde(rename = "export.delimiter")]
    pub delimiter: char,

    #[serde(rename = "export.includeColumnIds")]
    pub include_column_ids: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_values: true,
            max_decimals: DEFAULT_MAX_DECIMALS,
            epsilon: DEFAULT_EPSILON,
            delimiter: ',',
            include_column_ids: false,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("potgrid");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }
        Self::load_from(&path)
    }

    /// Load settings from `path`. Never fails: problems are logged and
    /// defaults used instead.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    /// Save current settings to the default location
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Display rounding, or `None` when rounding is switched off.
    pub fn rounding(&self) -> Option<Rounding> {
        self.round_values
            .then(|| Rounding::new(self.max_decimals, self.epsilon))
    }

    /// Delimiter as the single byte the CSV writer takes. Non-ASCII
    /// delimiters fall back to a comma.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            log::warn!("Delimiter {:?} is not ASCII; using ','", self.delimiter);
            b','
        }
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Values are rounded for display only; stored tensors are never rounded
    "display.roundValues": true,
    "display.maxDecimals": 10,
    "display.epsilon": 1e-12,

    // CSV export
    "export.delimiter": ",",
    "export.includeColumnIds": false
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }
}
