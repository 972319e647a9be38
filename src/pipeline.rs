use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::clustering::{assemble_rows, cluster_records, summarize_clusters, ClusterSummary};
use crate::config::RunConfig;
use crate::entity::build_records;
use crate::io::{load_names, write_rows};
use crate::TARGET_CLUSTER;

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub records: usize,
    pub clusters: Vec<ClusterSummary>,
}

impl RunReport {
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Records that ended up sharing a cluster with at least one other record
    pub fn merged_records(&self) -> usize {
        self.clusters
            .iter()
            .filter(|c| c.size > 1)
            .map(|c| c.size)
            .sum()
    }
}

/// Load, cluster and write in one pass. Nothing is written unless every
/// earlier step succeeded.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    config.validate()?;
    let start_time = Instant::now();
    let output_path = config.output.resolve();

    info!("Loading dataset from {}", config.input.display());
    let names = load_names(&config.input, &config.name_column)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;

    info!("Cleaning company names and creating blocks...");
    let records = build_records(names);

    info!(
        target: TARGET_CLUSTER,
        "Clustering started (metric {}, threshold {})", config.metric, config.threshold
    );
    let clusters = cluster_records(&records, &config.metric, config.threshold);

    info!("Preparing final output...");
    let rows = assemble_rows(&clusters, &records);
    write_rows(&output_path, &rows)?;

    let report = RunReport {
        output_path,
        records: records.len(),
        clusters: summarize_clusters(&clusters, &records),
    };

    info!(
        "Process completed in {:.2?}: {} records in {} clusters, output {}",
        start_time.elapsed(),
        report.records,
        report.cluster_count(),
        report.output_path.display()
    );

    Ok(report)
}
