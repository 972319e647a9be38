// Module declarations
pub mod assignment;
pub mod summary;
pub mod types;

pub use types::*;

pub use assignment::{cluster_records, partition_blocks, Clusterer};
pub use summary::{assemble_rows, largest_clusters, select_parent, summarize_clusters};

/// Minimum score for a candidate to join an anchor's cluster, unless configured otherwise
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 90;

/// Number of clusters listed in the run summary table by default
pub const DEFAULT_SUMMARY_CLUSTERS: usize = 10;
