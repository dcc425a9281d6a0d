//! `combine`: persisted bundles to one CSV table.

use std::path::Path;

use anyhow::Context;
use reviewscrape_core::EntityBundle;
use reviewscrape_scraper::{aggregate, serialize, store};

/// Aggregates `bundles`, serializes them, and writes the table to `out`.
/// Returns the number of records written.
pub(crate) fn write_combined(bundles: Vec<EntityBundle>, out: &Path) -> anyhow::Result<usize> {
    let entities = bundles.len();
    let records = aggregate(bundles);
    let table = serialize(&records).context("nothing to combine")?;
    store::write_table(out, &table)?;

    tracing::info!(
        entities,
        records = records.len(),
        path = %out.display(),
        "combined table written"
    );
    Ok(records.len())
}

pub(crate) fn run_combine(data_dir: &Path, out: &Path) -> anyhow::Result<()> {
    let bundles = store::load_bundles(data_dir)
        .with_context(|| format!("failed to load bundles from {}", data_dir.display()))?;
    if bundles.is_empty() {
        anyhow::bail!("no bundle files found in {}", data_dir.display());
    }
    write_combined(bundles, out)?;
    Ok(())
}
