//! Download → parse → group → sort.

use anyhow::{Context, Result};
use bytes::Bytes;
use polars::prelude::*;
use std::io::Cursor;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::Config;
use crate::fetch::{ObjectStore, fetch_object};

pub const GROUP_COLUMN: &str = "Country";
pub const COUNT_COLUMN: &str = "Count";

/// Fetches the configured object and returns rows per country, most first.
pub async fn run<S: ObjectStore + ?Sized>(store: &S, config: &Config) -> Result<DataFrame> {
    let bytes = fetch_object(store, &config.bucket, &config.key)
        .await
        .with_context(|| format!("fetching s3://{}/{}", config.bucket, config.key))?;

    aggregate(bytes)
}

/// Parses a CSV payload and counts rows per `Country`, sorted by count
/// descending. The order of equal counts is unspecified.
#[tracing::instrument(skip_all, fields(bytes = payload.len()))]
pub fn aggregate(payload: Bytes) -> Result<DataFrame> {
    let started = Instant::now();

    let df = CsvReadOptions::default()
        .into_reader_with_file_handle(Cursor::new(payload.as_ref()))
        .finish()
        .context("parsing CSV payload")?;
    drop(payload);

    let rows = df.height();
    debug!(rows, columns = df.width(), "CSV parsed");

    let counts = df
        .lazy()
        .group_by([col(GROUP_COLUMN)])
        .agg([len().alias(COUNT_COLUMN)])
        .sort(
            [COUNT_COLUMN],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()
        .with_context(|| format!("counting rows per {GROUP_COLUMN}"))?;

    info!(
        rows,
        groups = counts.height(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Aggregation complete"
    );
    Ok(counts)
}

/// Strips context layers polars adds around an error.
pub fn root_cause(err: &PolarsError) -> &PolarsError {
    match err {
        PolarsError::Context { error, .. } => root_cause(error),
        other => other,
    }
}
