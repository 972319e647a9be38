use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use namecluster::clustering::{largest_clusters, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_SUMMARY_CLUSTERS};
use namecluster::config::{OutputTarget, RunConfig, DEFAULT_NAME_COLUMN};
use namecluster::entity::matching::Similarity;
use namecluster::entity::normalizer::{block_key, normalize_str};
use namecluster::entity::Metric;
use namecluster::pipeline::{self, RunReport};
use prettytable::{Cell, Row as PrettyRow, Table};

/// Group near-duplicate company names and pick a parent name per group.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Also write a daily rolling log file into this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster the names in a CSV or Excel file and write the result as CSV
    Run {
        /// Input dataset (.csv, .xlsx, .xls, .xlsb, .ods)
        #[arg(short, long)]
        input: PathBuf,

        /// Exact output file instead of a timestamped one in --output-dir
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Directory for a timestamped clusters_<YYYYMMDD_HHMM>.csv
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,

        /// Column holding the company names
        #[arg(short, long, default_value = DEFAULT_NAME_COLUMN)]
        column: String,

        /// Minimum similarity (0-100) for a name to join a cluster
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_SIMILARITY_THRESHOLD,
            value_parser = clap::value_parser!(u8).range(0..=100)
        )]
        threshold: u8,

        /// Similarity metric
        #[arg(short, long, value_enum, default_value_t = Metric::TokenSort)]
        metric: Metric,

        /// Number of largest clusters to list after the run
        #[arg(long, default_value_t = DEFAULT_SUMMARY_CLUSTERS)]
        top: usize,
    },

    /// Show how two names normalize, block and score against each other
    Score {
        name1: String,
        name2: String,

        /// Similarity metric
        #[arg(short, long, value_enum, default_value_t = Metric::TokenSort)]
        metric: Metric,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    namecluster::logging::configure_logging(cli.log_dir.as_deref());

    match cli.command {
        Commands::Run {
            input,
            output,
            output_dir,
            column,
            threshold,
            metric,
            top,
        } => {
            let target = match output {
                Some(path) => OutputTarget::File(path),
                None => OutputTarget::Timestamped { dir: output_dir },
            };
            let config = RunConfig::new(input, target)
                .with_name_column(column)
                .with_threshold(threshold)
                .with_metric(metric);

            let report = pipeline::run(&config)?;
            print_report(&report, top);
        }

        Commands::Score {
            name1,
            name2,
            metric,
        } => {
            let norm1 = normalize_str(&name1);
            let norm2 = normalize_str(&name2);
            let key1 = block_key(&norm1);
            let key2 = block_key(&norm2);

            println!("'{}' -> '{}' (block '{}')", name1, norm1, key1);
            println!("'{}' -> '{}' (block '{}')", name2, norm2, key2);
            println!("Same block: {}", if key1 == key2 { "yes" } else { "no" });
            println!("{} score: {}", metric, metric.score(&norm1, &norm2));
        }
    }

    Ok(())
}

fn print_report(report: &RunReport, top: usize) {
    println!(
        "{} records, {} clusters, {} records merged",
        report.records,
        report.cluster_count(),
        report.merged_records()
    );
    println!("Output file: {}", report.output_path.display());

    let largest = largest_clusters(&report.clusters, top);
    if largest.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.add_row(PrettyRow::new(vec![
        Cell::new("Cluster"),
        Cell::new("Size"),
        Cell::new("Parent Company"),
    ]));
    for summary in &largest {
        table.add_row(PrettyRow::new(vec![
            Cell::new(&summary.id.to_string()),
            Cell::new(&summary.size.to_string()),
            Cell::new(&summary.parent),
        ]));
    }
    table.printstd();
}
