//! Merger Module
//! Joins a returns table against the macro calendar and derives the
//! surprise-delta and grouping columns.

use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::data::loader::{DATETIME_COLUMN, EVENT_COLUMN};

/// Macro columns attached to an enriched returns table.
pub const ATTACHED_COLUMNS: [&str; 3] = ["previous_val", "forecast_val", "actual_val"];

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Return table is missing join key column '{0}'")]
    MissingJoinKey(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Which window of a release the returns table measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Pre,
    Post,
}

impl Side {
    /// Name of the surprise-delta column this side derives.
    pub fn delta_column(&self) -> &'static str {
        match self {
            Side::Pre => "delta_prev",
            Side::Post => "delta_act",
        }
    }

    /// Pre: forecast - previous. Post: actual - forecast.
    /// A null operand yields a null delta.
    fn delta_expr(&self) -> Expr {
        match self {
            Side::Pre => col("forecast_val") - col("previous_val"),
            Side::Post => col("actual_val") - col("forecast_val"),
        }
        .alias(self.delta_column())
    }

    /// Columns older schema revisions carry that the pruning flag removes.
    fn legacy_columns(&self) -> &'static [&'static str] {
        match self {
            Side::Pre => &["pre_sum_pips", "delta"],
            Side::Post => &["post_sum_pips", "delta"],
        }
    }
}

/// Left-join `returns` to the macro calendar on (datetime, event) and derive
/// the side's delta plus a calendar-day `date` column.
///
/// Every returns row appears exactly once in the output; rows without a
/// macro counterpart get null `*_val` columns and a null delta. Duplicate
/// macro keys are collapsed before the join, first occurrence wins.
pub fn enrich(
    returns: &DataFrame,
    macro_events: &DataFrame,
    side: Side,
    drop_legacy: bool,
) -> Result<DataFrame, MergeError> {
    for key in [DATETIME_COLUMN, EVENT_COLUMN] {
        if returns.column(key).is_err() {
            return Err(MergeError::MissingJoinKey(key.to_string()));
        }
    }

    let mut selection = vec![col(DATETIME_COLUMN), col(EVENT_COLUMN)];
    selection.extend(ATTACHED_COLUMNS.iter().map(|name| col(*name)));
    let firsts: Vec<Expr> = ATTACHED_COLUMNS.iter().map(|name| col(*name).first()).collect();

    let macro_keyed = macro_events
        .clone()
        .lazy()
        .select(selection)
        .group_by_stable([col(DATETIME_COLUMN), col(EVENT_COLUMN)])
        .agg(firsts);

    let enriched = returns
        .clone()
        .lazy()
        .join(
            macro_keyed,
            [col(DATETIME_COLUMN), col(EVENT_COLUMN)],
            [col(DATETIME_COLUMN), col(EVENT_COLUMN)],
            JoinArgs::new(JoinType::Left),
        )
        .with_columns([
            side.delta_expr(),
            col(DATETIME_COLUMN).dt().date().alias("date"),
        ])
        .collect()?;

    debug!(side = ?side, rows = enriched.height(), "Enriched return table");

    if drop_legacy {
        return Ok(enriched.drop_many(side.legacy_columns().iter().copied()));
    }
    Ok(enriched)
}
