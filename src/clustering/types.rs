use serde::Serialize;

/// A group of records judged to name the same company.
///
/// `members[0]` is always the anchor the rest were compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCluster {
    /// 1-based, in creation order
    pub id: usize,
    pub members: Vec<usize>,
}

impl NameCluster {
    pub fn new(id: usize, anchor: usize) -> Self {
        Self {
            id,
            members: vec![anchor],
        }
    }

    pub fn anchor(&self) -> usize {
        self.members[0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One line of the result table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "Cluster_ID")]
    pub cluster_id: usize,
    #[serde(rename = "Parent_Company")]
    pub parent: String,
    #[serde(rename = "Child_Company")]
    pub child: String,
}

/// Per-cluster overview used for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSummary {
    pub id: usize,
    pub parent: String,
    pub size: usize,
}
