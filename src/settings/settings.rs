use super::Cli;
use crate::diagnostics::{DEFAULT_FILTER, DiagnosticsConfig};
use crate::logger::{Level, LogConfig};
use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Default, Deserialize)]
pub struct Log {
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub path: String, // "" means stdout
}

#[derive(Debug, Deserialize)]
pub struct Diagnostics {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

impl Settings {
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(level) = cli.level {
            self.log.level = level;
        }
        if let Some(path) = &cli.path {
            self.log.path = path.clone();
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log.level,
            path: self.log.path.clone(),
        }
    }

    pub fn diagnostics_config(&self) -> DiagnosticsConfig {
        DiagnosticsConfig {
            filter: self.diagnostics.filter.clone(),
        }
    }
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Parser;

    #[test]
    fn cli_overrides_file_values() {
        let mut settings = Settings::default();
        settings.apply_cli(&Cli {
            level: Some(Level::Error),
            path: Some("out.log".to_string()),
            ..Cli::default()
        });
        let config = settings.log_config();
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.path, "out.log");
    }

    #[test]
    fn absent_cli_flags_keep_file_values() {
        let mut settings = Settings::default();
        settings.log.level = Level::Warn;
        settings.apply_cli(&Cli::default());
        assert_eq!(settings.log.level, Level::Warn);
        assert_eq!(settings.log.path, "");
        assert_eq!(settings.diagnostics_config().filter, DEFAULT_FILTER);
    }

    #[test]
    fn cli_parses_level_flag() {
        let cli = Cli::try_parse_from(["levellog", "--level", "WARN", "--path", ""]).unwrap();
        assert_eq!(cli.level, Some(Level::Warn));
        assert_eq!(cli.path.as_deref(), Some(""));
        assert!(Cli::try_parse_from(["levellog", "--level", "debug"]).is_err());
    }
}
