use std::collections::HashMap;

use tracing::{debug, trace};

use crate::clustering::types::NameCluster;
use crate::entity::matching::Similarity;
use crate::entity::Record;
use crate::TARGET_CLUSTER;

/// Splits record indices into blocks of identical block key.
///
/// Blocks come back in the order their key first appears; indices inside a
/// block keep input order.
pub fn partition_blocks(records: &[Record]) -> Vec<Vec<usize>> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut blocks: Vec<Vec<usize>> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let slot = *positions
            .entry(record.block_key.as_str())
            .or_insert_with(|| {
                blocks.push(Vec::new());
                blocks.len() - 1
            });
        blocks[slot].push(index);
    }

    blocks
}

/// Greedy anchor-based clusterer for a single run.
///
/// Each unclaimed record becomes the anchor of a new cluster and absorbs every
/// later unclaimed record of its block scoring at least `threshold` against
/// it. Candidates are never compared with each other, and a claimed record is
/// never reconsidered.
pub struct Clusterer<'a, S: Similarity + ?Sized> {
    similarity: &'a S,
    threshold: u8,
    claimed: Vec<bool>,
    clusters: Vec<NameCluster>,
    comparisons: usize,
}

impl<'a, S: Similarity + ?Sized> Clusterer<'a, S> {
    pub fn new(similarity: &'a S, threshold: u8) -> Self {
        Self {
            similarity,
            threshold,
            claimed: Vec::new(),
            clusters: Vec::new(),
            comparisons: 0,
        }
    }

    /// Cluster every record. Consumes the clusterer so claimed state cannot
    /// leak into another run.
    pub fn cluster(mut self, records: &[Record]) -> Vec<NameCluster> {
        self.claimed = vec![false; records.len()];

        let blocks = partition_blocks(records);
        debug!(
            target: TARGET_CLUSTER,
            "Clustering {} records across {} blocks (threshold {})",
            records.len(),
            blocks.len(),
            self.threshold
        );

        for block in &blocks {
            self.cluster_block(records, block);
        }

        debug!(
            target: TARGET_CLUSTER,
            "Built {} clusters using {} comparisons",
            self.clusters.len(),
            self.comparisons
        );

        self.clusters
    }

    fn cluster_block(&mut self, records: &[Record], block: &[usize]) {
        for (position, &anchor) in block.iter().enumerate() {
            if self.claimed[anchor] {
                continue;
            }

            self.claimed[anchor] = true;
            let mut cluster = NameCluster::new(self.clusters.len() + 1, anchor);
            let base_name = &records[anchor].normalized_name;

            for &candidate in &block[position + 1..] {
                if self.claimed[candidate] {
                    continue;
                }

                let score = self
                    .similarity
                    .score(base_name, &records[candidate].normalized_name);
                self.comparisons += 1;

                trace!(
                    target: TARGET_CLUSTER,
                    "Compared '{}' with '{}': {}",
                    base_name,
                    records[candidate].normalized_name,
                    score
                );

                if score >= self.threshold {
                    cluster.members.push(candidate);
                    self.claimed[candidate] = true;
                }
            }

            self.clusters.push(cluster);
        }
    }
}

/// Convenience wrapper running a fresh [`Clusterer`] over `records`.
pub fn cluster_records<S: Similarity + ?Sized>(
    records: &[Record],
    similarity: &S,
    threshold: u8,
) -> Vec<NameCluster> {
    Clusterer::new(similarity, threshold).cluster(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::build_records;
    use crate::entity::matching::TokenSortRatio;

    fn records(names: &[&str]) -> Vec<Record> {
        build_records(names.iter().map(|n| Some(n.to_string())))
    }

    #[test]
    fn test_blocks_in_first_appearance_order() {
        let records = records(&["Zeta One", "Acme Ltd", "Zeta Two", "Acme", "Beta"]);
        let blocks = partition_blocks(&records);
        assert_eq!(blocks, vec![vec![0, 2], vec![1, 3], vec![4]]);
    }

    #[test]
    fn test_empty_input() {
        let clusters = cluster_records(&[], &TokenSortRatio, 90);
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_identical_names_merge() {
        let records = records(&["Acme Ltd", "ACME LTD.", "acme-ltd"]);
        let clusters = cluster_records(&records, &TokenSortRatio, 90);
        assert_eq!(clusters, vec![NameCluster { id: 1, members: vec![0, 1, 2] }]);
    }

    #[test]
    fn test_cluster_ids_follow_creation_order() {
        let records = records(&["Zeta One", "Acme", "Zeta Two"]);
        let clusters = cluster_records(&records, &TokenSortRatio, 100);
        let ids: Vec<_> = clusters.iter().map(|c| (c.id, c.anchor())).collect();
        assert_eq!(ids, vec![(1, 0), (2, 2), (3, 1)]);
    }

    #[test]
    fn test_missing_names_share_empty_block() {
        let records = build_records(vec![None, Some("Acme".to_string()), None]);
        let clusters = cluster_records(&records, &TokenSortRatio, 90);
        assert_eq!(clusters[0].members, vec![0, 2]);
        assert_eq!(clusters[1].members, vec![1]);
    }
}
