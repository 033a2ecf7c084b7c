//! Configuration file and resolved settings
//!
//! Precedence: CLI flag > environment variable (handled by clap) > config
//! file > built-in default.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::consts::DEFAULT_DAILY_GOAL;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) log_path: Option<PathBuf>,
    #[serde(default)]
    pub(crate) daily_goal: Option<i64>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    /// File this config was read from
    #[serde(skip)]
    pub(crate) loaded_from: Option<PathBuf>,
}

impl Config {
    pub(crate) fn load() -> Self {
        Self::load_from(&Self::get_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> Self {
        for path in paths {
            if path.exists()
                && let Ok(content) = fs::read_to_string(path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(mut config) => {
                        config.loaded_from = Some(path.clone());
                        return config;
                    }
                    Err(e) => {
                        // Logging is not initialized yet; it depends on this file
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/focuslog/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("focuslog").join("config.toml"));
        }

        // 2. macOS Application Support: ~/Library/Application Support/focuslog/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let macos_path = config_dir.join("focuslog").join("config.toml");
            if !paths.contains(&macos_path) {
                paths.push(macos_path);
            }
        }

        // 3. Home directory: ~/.focuslog.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".focuslog.toml"));
        }

        paths
    }
}

/// Where the log lives when nothing else says otherwise
pub(crate) fn default_log_path() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        return data.join("focuslog").join("focus.csv");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".focuslog").join("focus.csv");
    }
    PathBuf::from("focus.csv")
}

/// Explicit settings handed to the recorder and the aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) log_path: PathBuf,
    /// Minutes per day that count toward the streak
    pub(crate) daily_goal: i64,
}

impl Settings {
    pub(crate) fn resolve(
        cli_log_path: Option<PathBuf>,
        cli_goal: Option<&str>,
        config: &Config,
    ) -> Result<Self, AppError> {
        let log_path = cli_log_path
            .or_else(|| config.log_path.clone())
            .unwrap_or_else(default_log_path);

        let daily_goal = match (cli_goal, config.daily_goal) {
            (Some(raw), _) => parse_goal(raw)?,
            (None, Some(goal)) => validate_goal(goal)?,
            (None, None) => DEFAULT_DAILY_GOAL,
        };

        Ok(Settings {
            log_path,
            daily_goal,
        })
    }
}

pub(crate) fn parse_goal(raw: &str) -> Result<i64, AppError> {
    let goal = raw.trim().parse::<i64>().map_err(|_| AppError::InvalidGoal {
        input: raw.to_string(),
    })?;
    validate_goal(goal)
}

fn validate_goal(goal: i64) -> Result<i64, AppError> {
    if goal > 0 {
        Ok(goal)
    } else {
        Err(AppError::InvalidGoal {
            input: goal.to_string(),
        })
    }
}
