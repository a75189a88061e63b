//! Configuration Module
//! Optional `config.toml` overrides; defaults match the shipped data files.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// The three CSV sources of one session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub macro_events: PathBuf,
    pub pre_returns: PathBuf,
    pub post_returns: PathBuf,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            macro_events: PathBuf::from("macro_multi_2019.csv"),
            pre_returns: PathBuf::from("pre_h1_returns_2019_2.csv"),
            post_returns: PathBuf::from("post_h1_returns_2019_filtered.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sources: Sources,
    /// strptime format of the `datetime` column in all three files.
    pub datetime_format: String,
    /// Drop legacy derived columns (sum-of-pips, textual delta) from the
    /// enriched tables.
    pub drop_legacy_columns: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources: Sources::default(),
            datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
            drop_legacy_columns: false,
        }
    }
}

/// Load settings from `config.toml` if present, falling back to defaults.
pub fn load() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_filenames() {
        let settings = Settings::default();
        assert_eq!(
            settings.sources.macro_events,
            PathBuf::from("macro_multi_2019.csv")
        );
        assert_eq!(
            settings.sources.pre_returns,
            PathBuf::from("pre_h1_returns_2019_2.csv")
        );
        assert_eq!(
            settings.sources.post_returns,
            PathBuf::from("post_h1_returns_2019_filtered.csv")
        );
        assert_eq!(settings.datetime_format, "%Y-%m-%d %H:%M:%S");
        assert!(!settings.drop_legacy_columns);
    }
}
