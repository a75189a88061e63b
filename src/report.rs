//! Report Module
//! Thin presentation surface: prints the enriched tables to stdout with the
//! column legend of the dashboard.

use polars::prelude::*;

const PRE_COLUMNS: [&str; 11] = [
    "datetime",
    "event",
    "pre_pips",
    "pre_max_pips",
    "pre_min_pips",
    "pre_mean_pips",
    "pre_sum_pips",
    "previous_val",
    "forecast_val",
    "actual_val",
    "date",
];

const POST_COLUMNS: [&str; 11] = [
    "datetime",
    "event",
    "post_pips",
    "post_max_pips",
    "post_min_pips",
    "post_mean_pips",
    "post_sum_pips",
    "previous_val",
    "forecast_val",
    "actual_val",
    "date",
];

const PRE_LEGEND: &str = "\
- event: name of the macro indicator
- delta_prev: forecast - previous
- pre_pips: movement in pips from 00:00 until the release hour
- pre_max_pips, pre_min_pips, pre_mean_pips, pre_sum_pips: max, min, mean and sum of the movements
- previous_val, forecast_val, actual_val: reference raw values
- date: calendar day (for optional grouping)";

const POST_LEGEND: &str = "\
- event: name of the macro indicator
- delta_act: actual - forecast
- post_pips: movement in pips from the release hour until midnight
- post_max_pips, post_min_pips, post_mean_pips, post_sum_pips: max, min, mean and sum of the movements
- previous_val, forecast_val, actual_val: reference raw values
- date: calendar day (for optional grouping)";

pub fn print_report(pre: &DataFrame, post: &DataFrame) -> PolarsResult<()> {
    println!("Report of pre- and post-event H1 returns\n");
    print_section("Pre-news returns (H1)", PRE_LEGEND, pre, &PRE_COLUMNS)?;
    print_section("Post-news returns (H1)", POST_LEGEND, post, &POST_COLUMNS)?;
    Ok(())
}

fn print_section(
    title: &str,
    legend: &str,
    df: &DataFrame,
    preferred: &[&str],
) -> PolarsResult<()> {
    let view = df.select(display_columns(df, preferred))?;
    println!("## {title}\n");
    println!("{legend}\n");
    println!("{view}\n");
    Ok(())
}

/// Keep the dashboard's column order, skipping columns this schema revision
/// does not carry.
fn display_columns<'a>(df: &DataFrame, preferred: &[&'a str]) -> Vec<&'a str> {
    preferred
        .iter()
        .copied()
        .filter(|name| df.column(name).is_ok())
        .collect()
}
