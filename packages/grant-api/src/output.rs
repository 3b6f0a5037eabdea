//! Files written by the `grant-generator` CLI.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use grant_pipeline::ConsolidatedReport;

pub const REPORT_FILE: &str = "consolidated_grant_result.json";
pub const DESCRIPTION_FILE: &str = "grant_description.md";
pub const METADATA_FILE: &str = "grant_metadata.json";

/// Write the report, the Markdown description and the metadata into `dir`.
///
/// Returns the paths written, in that order.
pub async fn write_report(dir: &Path, report: &ConsolidatedReport) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let report_path = dir.join(REPORT_FILE);
    let description_path = dir.join(DESCRIPTION_FILE);
    let metadata_path = dir.join(METADATA_FILE);

    let report_json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    let metadata_json =
        serde_json::to_string_pretty(&report.grant_metadata).context("Failed to serialize metadata")?;

    for (path, contents) in [
        (&report_path, report_json),
        (&description_path, report.grant_opportunity_description.clone()),
        (&metadata_path, metadata_json),
    ] {
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote output file");
    }

    Ok(vec![report_path, description_path, metadata_path])
}
