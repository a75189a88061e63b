//! CSV Data Loader Module
//! Reads the macro-event calendar and the two returns tables using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::config::Settings;
use crate::data::parser::parse_value_column;

/// Timestamp column shared by all three tables.
pub const DATETIME_COLUMN: &str = "datetime";
/// Event-name column shared by all three tables.
pub const EVENT_COLUMN: &str = "event";
/// Raw text columns on the macro table that get a parsed `*_val` twin.
pub const MACRO_VALUE_COLUMNS: [&str; 3] = ["actual", "forecast", "previous"];

const MACRO_REQUIRED: [&str; 5] = ["datetime", "event", "actual", "forecast", "previous"];
const RETURNS_REQUIRED: [&str; 2] = ["datetime", "event"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: PolarsError },
    #[error("{path}: required column '{column}' is missing")]
    MissingColumn { path: PathBuf, column: String },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// The three tables of one session, immutable once loaded.
#[derive(Debug, Clone)]
pub struct LoadedTables {
    pub macro_events: DataFrame,
    pub pre: DataFrame,
    pub post: DataFrame,
}

/// Reads the configured CSV sources and derives the parsed value columns.
pub struct DataLoader {
    settings: Settings,
}

impl DataLoader {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Load all three tables.
    ///
    /// Fails if a source is unreadable or a required column is absent.
    /// Individual unparsable cells degrade to null instead.
    pub fn load(&self) -> Result<LoadedTables, LoaderError> {
        let sources = &self.settings.sources;

        let mut macro_events = self.read_table(&sources.macro_events, &MACRO_REQUIRED)?;
        for raw in MACRO_VALUE_COLUMNS {
            let parsed = parse_value_column(macro_events.column(raw)?, &format!("{raw}_val"))?;
            macro_events.with_column(parsed)?;
        }

        let pre = self.read_table(&sources.pre_returns, &RETURNS_REQUIRED)?;
        let post = self.read_table(&sources.post_returns, &RETURNS_REQUIRED)?;

        info!(
            macro_events = macro_events.height(),
            pre_returns = pre.height(),
            post_returns = post.height(),
            "Loaded session tables"
        );

        Ok(LoadedTables {
            macro_events,
            pre,
            post,
        })
    }

    /// Read one CSV, verify its required columns, and parse the timestamp.
    fn read_table(&self, path: &Path, required: &[&str]) -> Result<DataFrame, LoaderError> {
        let read_err = |source: PolarsError| LoaderError::Read {
            path: path.to_path_buf(),
            source,
        };

        let df = LazyCsvReader::new(path.to_path_buf())
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .map_err(&read_err)?
            .collect()
            .map_err(&read_err)?;

        for column in required {
            if df.column(column).is_err() {
                return Err(LoaderError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        self.parse_datetime(df)
    }

    /// Parse the timestamp column in place. Non-strict: cells that do not
    /// match the configured format become null rather than failing the load.
    fn parse_datetime(&self, df: DataFrame) -> Result<DataFrame, LoaderError> {
        if matches!(
            df.column(DATETIME_COLUMN)?.dtype(),
            DataType::Datetime(_, _)
        ) {
            return Ok(df);
        }

        let options = StrptimeOptions {
            format: Some(self.settings.datetime_format.as_str().into()),
            strict: false,
            ..Default::default()
        };

        let parsed = df
            .lazy()
            .with_column(col(DATETIME_COLUMN).str().to_datetime(
                Some(TimeUnit::Microseconds),
                None,
                options,
                lit("raise"),
            ))
            .collect()?;

        Ok(parsed)
    }
}
