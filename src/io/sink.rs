use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::clustering::OutputRow;
use crate::TARGET_IO;

/// Header written even when there are no rows
pub const OUTPUT_HEADERS: [&str; 3] = ["Cluster_ID", "Parent_Company", "Child_Company"];

/// Write result rows as CSV.
///
/// The whole file is rendered in memory first, then written to a temporary
/// sibling and renamed over `path`, so a failed run leaves no partial output.
pub fn write_rows(path: &Path, rows: &[OutputRow]) -> Result<()> {
    let bytes = render_csv(rows)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let staging = staging_path(path);
    debug!(target: TARGET_IO, "Staging output at {}", staging.display());
    if let Err(err) = fs::write(&staging, &bytes) {
        let _ = fs::remove_file(&staging);
        return Err(err).with_context(|| format!("Failed to write {}", staging.display()));
    }

    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(err).with_context(|| format!("Failed to move output into {}", path.display()));
    }

    info!(
        target: TARGET_IO,
        "Wrote {} rows to {}", rows.len(), path.display()
    );
    Ok(())
}

fn render_csv(rows: &[OutputRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV output: {}", e))
}

fn staging_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: usize, parent: &str, child: &str) -> OutputRow {
        OutputRow {
            cluster_id: id,
            parent: parent.to_string(),
            child: child.to_string(),
        }
    }

    #[test]
    fn test_render_with_quoting() {
        let rows = vec![
            row(1, "Global Traders, Inc.", "Global Traders, Inc."),
            row(1, "Global Traders, Inc.", "global traders"),
        ];
        let text = String::from_utf8(render_csv(&rows).unwrap()).unwrap();
        assert_eq!(
            text,
            "Cluster_ID,Parent_Company,Child_Company\n\
             1,\"Global Traders, Inc.\",\"Global Traders, Inc.\"\n\
             1,\"Global Traders, Inc.\",global traders\n"
        );
    }

    #[test]
    fn test_header_only_when_empty() {
        let text = String::from_utf8(render_csv(&[]).unwrap()).unwrap();
        assert_eq!(text, "Cluster_ID,Parent_Company,Child_Company\n");
    }

    #[test]
    fn test_write_creates_directory_and_cleans_staging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("clusters.csv");
        write_rows(&path, &[row(1, "Acme", "Acme")]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("1,Acme,Acme\n"));
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_failed_staging_write_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clusters.csv");
        // Occupy the staging location so the write itself fails
        fs::create_dir(staging_path(&path)).unwrap();
        assert!(write_rows(&path, &[row(1, "Acme", "Acme")]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        assert!(write_rows(&path, &[row(1, "Acme", "Acme")]).is_err());
        assert!(!staging_path(&path).exists());
    }
}
