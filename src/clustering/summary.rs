use crate::clustering::types::{ClusterSummary, NameCluster, OutputRow};
use crate::entity::Record;

/// Picks the representative name for a cluster: the longest original name,
/// first member wins on ties.
pub fn select_parent<'r>(cluster: &NameCluster, records: &'r [Record]) -> &'r Record {
    let mut best = &records[cluster.anchor()];
    for &member in &cluster.members[1..] {
        let candidate = &records[member];
        // Strictly greater keeps the earliest of equal-length names
        if candidate.name_len() > best.name_len() {
            best = candidate;
        }
    }
    best
}

/// Flattens clusters into one row per record, in cluster then member order.
pub fn assemble_rows(clusters: &[NameCluster], records: &[Record]) -> Vec<OutputRow> {
    let mut rows = Vec::with_capacity(records.len());

    for cluster in clusters {
        let parent = select_parent(cluster, records).display_name();
        for &member in &cluster.members {
            rows.push(OutputRow {
                cluster_id: cluster.id,
                parent: parent.to_string(),
                child: records[member].display_name().to_string(),
            });
        }
    }

    rows
}

pub fn summarize_clusters(clusters: &[NameCluster], records: &[Record]) -> Vec<ClusterSummary> {
    clusters
        .iter()
        .map(|cluster| ClusterSummary {
            id: cluster.id,
            parent: select_parent(cluster, records).display_name().to_string(),
            size: cluster.len(),
        })
        .collect()
}

/// The `limit` largest clusters, ties kept in cluster id order.
pub fn largest_clusters(summaries: &[ClusterSummary], limit: usize) -> Vec<ClusterSummary> {
    let mut sorted = summaries.to_vec();
    sorted.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::build_records;

    fn records(names: &[Option<&str>]) -> Vec<Record> {
        build_records(names.iter().map(|n| n.map(str::to_string)))
    }

    #[test]
    fn test_parent_is_longest() {
        let records = records(&[Some("Acme"), Some("Acme Limited"), Some("Acme Ltd")]);
        let cluster = NameCluster { id: 1, members: vec![0, 1, 2] };
        assert_eq!(select_parent(&cluster, &records).display_name(), "Acme Limited");
    }

    #[test]
    fn test_parent_tie_first_wins() {
        let records = records(&[Some("Acme Co"), Some("ACME CO"), Some("acme co")]);
        let cluster = NameCluster { id: 1, members: vec![2, 0, 1] };
        assert_eq!(select_parent(&cluster, &records).display_name(), "acme co");
    }

    #[test]
    fn test_parent_ignores_missing_names() {
        let records = records(&[None, Some("X")]);
        let cluster = NameCluster { id: 1, members: vec![0, 1] };
        assert_eq!(select_parent(&cluster, &records).display_name(), "X");

        let only_missing = NameCluster { id: 2, members: vec![0] };
        assert_eq!(select_parent(&only_missing, &records).display_name(), "");
    }

    #[test]
    fn test_assemble_rows_order_and_count() {
        let records = records(&[Some("Beta"), Some("Acme Ltd"), Some("Acme"), Some("Beta Co")]);
        let clusters = vec![
            NameCluster { id: 1, members: vec![0, 3] },
            NameCluster { id: 2, members: vec![1, 2] },
        ];
        let rows = assemble_rows(&clusters, &records);
        assert_eq!(rows.len(), records.len());

        let flat: Vec<_> = rows
            .iter()
            .map(|r| (r.cluster_id, r.parent.as_str(), r.child.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![
                (1, "Beta Co", "Beta"),
                (1, "Beta Co", "Beta Co"),
                (2, "Acme Ltd", "Acme Ltd"),
                (2, "Acme Ltd", "Acme"),
            ]
        );
    }

    #[test]
    fn test_non_text_value_kept_in_rows() {
        use crate::entity::RawName;

        let records = build_records(vec![
            RawName::Other("20240115".to_string()),
            RawName::Missing,
        ]);
        let cluster = NameCluster { id: 1, members: vec![1, 0] };
        let rows = assemble_rows(&[cluster], &records);
        assert_eq!(rows[0].parent, "20240115");
        assert_eq!(rows[0].child, "");
        assert_eq!(rows[1].child, "20240115");
    }

    #[test]
    fn test_largest_clusters() {
        let summaries = vec![
            ClusterSummary { id: 1, parent: "a".into(), size: 1 },
            ClusterSummary { id: 2, parent: "b".into(), size: 3 },
            ClusterSummary { id: 3, parent: "c".into(), size: 1 },
            ClusterSummary { id: 4, parent: "d".into(), size: 3 },
        ];
        let ids: Vec<_> = largest_clusters(&summaries, 3).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }
}
