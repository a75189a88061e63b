//! Macro Returns - macro-event calendar merge & pre/post-event H1 returns report
//!
//! Loads the macro-event calendar and the pre/post H1 returns tables, merges
//! them by (datetime, event), derives the surprise deltas and prints both
//! enriched tables.

mod config;
mod data;
mod report;

use anyhow::Context;
use data::{enrich, DataLoader, SessionCache, Side};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = config::load().context("Failed to load configuration")?;
    let loader = DataLoader::new(settings.clone());

    // One load per session; the tables are immutable afterwards.
    let cache = SessionCache::new();
    let tables = cache.get_or_load(|| loader.load())?;

    let pre = enrich(
        &tables.pre,
        &tables.macro_events,
        Side::Pre,
        settings.drop_legacy_columns,
    )?;
    let post = enrich(
        &tables.post,
        &tables.macro_events,
        Side::Post,
        settings.drop_legacy_columns,
    )?;

    report::print_report(&pre, &post)?;
    Ok(())
}
