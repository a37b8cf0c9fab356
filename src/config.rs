use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::logging::{log_info, log_warning};
use crate::rules::{Category, LineType, Pattern, RuleConfig};

pub const DEFAULT_RULES_PATH: &str = "conf/rules.conf";

impl RuleConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_config_str(&content)
    }

    /// Parses `key = value` lines. Missing keys fall back to the defaults.
    pub fn from_config_str(content: &str) -> Result<Self, ConfigError> {
        let config_map = parse_config(content);
        let defaults = RuleConfig::default();

        let category = match config_map.get("category") {
            Some(value) => value.parse::<Category>()?,
            None => defaults.category(),
        };

        let pattern = match config_map.get("pattern") {
            Some(value) => value.parse::<Pattern>()?,
            None => defaults.selected_pattern(),
        };

        let lines_target = match config_map.get("lines_target") {
            Some(value) => value
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidLinesTarget(value.clone()))?,
            None => defaults.classic_lines_target(),
        };

        let line_types = match config_map.get("line_types") {
            Some(value) => parse_line_types(value)?,
            None => defaults.classic_selected_line_types().iter().copied().collect(),
        };

        RuleConfig::new(category, pattern, lines_target, line_types)
    }

    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path.unwrap_or_else(|| Path::new(DEFAULT_RULES_PATH));

        match Self::from_file(config_path) {
            Ok(config) => {
                log_info(&format!("Loaded rules from {}: {}", config_path.display(), config.describe()));
                config
            }
            Err(e) => {
                let config = Self::default();
                log_warning(&format!(
                    "Could not load rules from {}: {}. Using defaults ({}).",
                    config_path.display(),
                    e,
                    config.describe()
                ));
                config
            }
        }
    }
}

fn parse_line_types(value: &str) -> Result<Vec<LineType>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

fn parse_config(content: &str) -> HashMap<String, String> {
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            config.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    config
}
