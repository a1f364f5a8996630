//! Dataset list, upload, and leakage detection.
//!
//! The list view keeps the original dashboard's local conveniences:
//! a case-insensitive filename filter and fixed-size pages.

use crate::error::LeakscopeError;

use client_core::api::DatasetRef;
use client_core::route::{self, RouteDecision};
use client_core::session::SessionState;
use client_core::validation::validate_upload_source;

use std::path::{Path, PathBuf};

use log::{debug, info};

/// Datasets shown per page.
pub const ITEMS_PER_PAGE: usize = 5;

/// Case-insensitive filename filter.
pub fn filter_datasets(datasets: &[DatasetRef], query: &str) -> Vec<DatasetRef> {
    let query = query.to_lowercase();
    datasets
        .iter()
        .filter(|dataset| dataset.filename.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Slice of `datasets` for a 1-based page number. Page 0 clamps to the
/// first page; a page past the end is empty rather than an error.
pub fn page_slice(datasets: &[DatasetRef], page: usize) -> &[DatasetRef] {
    let start = page.saturating_sub(1).saturating_mul(ITEMS_PER_PAGE);
    let end = start.saturating_add(ITEMS_PER_PAGE).min(datasets.len());
    if start >= datasets.len() {
        return &[];
    }
    &datasets[start..end]
}

fn require_authenticated(
    view: &'static str,
    decision: RouteDecision,
) -> Result<(), LeakscopeError> {
    match decision {
        RouteDecision::Allowed => Ok(()),
        RouteDecision::Redirected(target) => Err(LeakscopeError::app(format!(
            "{view} requires login (redirected to {target}); run `leakscope login`"
        ))),
    }
}

/// List uploaded datasets, with optional filter and pagination.
pub async fn list(
    state: &SessionState,
    base_url: &str,
    filter: Option<&str>,
    page: usize,
) -> Result<(), LeakscopeError> {
    require_authenticated(
        "datasets",
        route::evaluate(route::DASHBOARD_ROUTE, &state.current().await),
    )?;

    let client = state.client(base_url).await?;
    let datasets = client.list_datasets().await?;
    debug!("Fetched {} datasets", datasets.len());

    let filtered = match filter {
        Some(query) => filter_datasets(&datasets, query),
        None => datasets,
    };

    if filtered.is_empty() {
        println!("No datasets found.");
        return Ok(());
    }

    let total_pages = filtered.len().div_ceil(ITEMS_PER_PAGE);
    for dataset in page_slice(&filtered, page) {
        println!("{:>6}  {}", dataset.id, dataset.filename);
    }
    println!("Page {page}/{total_pages} ({} datasets)", filtered.len());

    Ok(())
}

/// Upload one tabular dataset file.
pub async fn upload(
    state: &SessionState,
    base_url: &str,
    path: &Path,
) -> Result<(), LeakscopeError> {
    require_authenticated(
        "upload",
        route::evaluate(route::UPLOAD_ROUTE, &state.current().await),
    )?;

    validate_upload_source(path)?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LeakscopeError::app(format!("Unusable file name: {}", path.display())))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| LeakscopeError::app(format!("Cannot read {}: {e}", path.display())))?;

    let client = state.client(base_url).await?;
    let message = client.upload_dataset(filename, bytes).await?;

    println!("{message}");
    Ok(())
}

/// Run leakage detection for a dataset and save the result.
///
/// One attempt per invocation; the actual computation is opaque to the
/// client and arrives as a CSV named `leakage_result_<id>.csv`.
pub async fn detect(
    state: &SessionState,
    base_url: &str,
    dataset_id: u64,
    out_dir: &Path,
) -> Result<PathBuf, LeakscopeError> {
    require_authenticated(
        "detect",
        route::evaluate(route::DASHBOARD_ROUTE, &state.current().await),
    )?;

    let client = state.client(base_url).await?;
    let report = client.detect_leakage(dataset_id).await?;

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| LeakscopeError::app(format!("Cannot create {}: {e}", out_dir.display())))?;

    let target = out_dir.join(report.file_name());
    tokio::fs::write(&target, &report.bytes)
        .await
        .map_err(|e| LeakscopeError::app(format!("Cannot write {}: {e}", target.display())))?;

    info!("Leakage result downloaded successfully");
    Ok(target)
}
