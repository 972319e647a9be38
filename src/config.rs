use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::{DateTime, Local};

use crate::clustering::DEFAULT_SIMILARITY_THRESHOLD;
use crate::entity::Metric;

/// Column holding entity names when none is configured
pub const DEFAULT_NAME_COLUMN: &str = "buyer-supplier";

/// Prefix of generated output files, followed by a `%Y%m%d_%H%M` stamp
pub const OUTPUT_FILE_PREFIX: &str = "clusters";

/// Where results go: a fixed file, or a timestamped file inside a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Timestamped { dir: PathBuf },
}

impl OutputTarget {
    /// Resolve to a concrete path using the current local time.
    pub fn resolve(&self) -> PathBuf {
        self.resolve_at(Local::now())
    }

    pub fn resolve_at(&self, now: DateTime<Local>) -> PathBuf {
        match self {
            OutputTarget::File(path) => path.clone(),
            OutputTarget::Timestamped { dir } => dir.join(format!(
                "{}_{}.csv",
                OUTPUT_FILE_PREFIX,
                now.format("%Y%m%d_%H%M")
            )),
        }
    }
}

/// Everything a single clustering run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: OutputTarget,
    pub name_column: String,
    pub threshold: u8,
    pub metric: Metric,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, output: OutputTarget) -> Self {
        Self {
            input: input.into(),
            output,
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            metric: Metric::default(),
        }
    }

    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold > 100 {
            bail!(
                "Similarity threshold must be between 0 and 100, got {}",
                self.threshold
            );
        }
        if self.name_column.trim().is_empty() {
            bail!("Name column must not be empty");
        }
        if is_same_file(&self.input, &self.output) {
            bail!(
                "Output would overwrite the input file {}",
                self.input.display()
            );
        }
        Ok(())
    }
}

fn is_same_file(input: &Path, output: &OutputTarget) -> bool {
    match output {
        OutputTarget::File(path) => path == input,
        OutputTarget::Timestamped { .. } => false,
    }
}
