//! Feedlot report CLI
//!
//! Loads one snapshot (JSON snapshot file or SQLite database) and prints the
//! requested report to stdout. Logs go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin feedlot_report -- induction-summary --shipment SHP-01
//! cargo run --bin feedlot_report -- --format json lifecycle
//! ```
//!
//! ## Environment Variables
//!
//! - FEEDLOT_DB_PATH - SQLite database path (default: data/feedlot.db); must already exist
//! - FEEDLOT_SNAPSHOT_PATH - JSON snapshot path; read instead of the database when set
//! - FEEDLOT_REPORT_FORMAT - jsonl | json (default: jsonl)
//! - RUST_LOG - Logging level (optional, default: info)

use clap::{Parser, Subcommand};
use feedlot::config::FeedlotConfig;
use feedlot::report_writer::{ReportFormat, ReportWriter};
use feedlot::reports::{self, FilterCatalog, PenStage, TableFilter};
use feedlot::store::{load_snapshot, SqliteStore};
use feedlot::Snapshot;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "feedlot_report", about = "Feedlot lifecycle reports")]
struct Cli {
    /// SQLite database (overrides FEEDLOT_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// JSON snapshot file (overrides FEEDLOT_SNAPSHOT_PATH, takes precedence over --db)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Output format (overrides FEEDLOT_REPORT_FORMAT)
    #[arg(long, value_enum, global = true)]
    format: Option<ReportFormat>,

    #[command(subcommand)]
    report: Report,
}

#[derive(Debug, Subcommand)]
enum Report {
    /// Active (unsold) inductions
    InductionTable {
        #[arg(long, default_value = "")]
        shipment: String,
        #[arg(long, default_value = "")]
        pen: String,
    },
    /// Active inductions grouped by pen
    InductionSummary {
        #[arg(long, default_value = "")]
        shipment: String,
    },
    /// Reweigh events of unsold animals (pen filter applies to the final pen)
    ReweightTable {
        #[arg(long, default_value = "")]
        shipment: String,
        #[arg(long, default_value = "")]
        pen: String,
    },
    /// Reweigh events grouped by initial or final pen
    ReweightSummary {
        #[arg(long, value_enum, default_value = "final")]
        stage: PenStage,
        #[arg(long, default_value = "")]
        shipment: String,
    },
    /// Sale history
    Sales {
        #[arg(long, default_value = "")]
        buyer: String,
    },
    /// Sale history with induction and reweight performance
    StaffReport {
        #[arg(long, default_value = "")]
        buyer: String,
    },
    /// Induction / reweight / sale totals per shipment
    Rollup {
        #[arg(long, default_value = "")]
        shipment: String,
    },
    /// Per-animal lifecycle with DOF/ADG between stages
    Lifecycle {
        #[arg(long, default_value = "")]
        shipment: String,
    },
    /// Distinct shipments, pens and buyers
    Filters,
}

fn load(config: &FeedlotConfig) -> Result<Snapshot, Box<dyn std::error::Error>> {
    match &config.snapshot_path {
        Some(path) => {
            log::info!("📂 Source: JSON snapshot {}", path.display());
            Ok(load_snapshot(path)?)
        }
        None => {
            log::info!("📂 Source: SQLite {}", config.db_path.display());
            let store = SqliteStore::open_existing(&config.db_path)?;
            Ok(Snapshot::load(&store)?)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = FeedlotConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if cli.snapshot.is_some() {
        config.snapshot_path = cli.snapshot;
    }
    if let Some(format) = cli.format {
        config.report_format = format;
    }

    let snapshot = load(&config)?;
    log::info!(
        "📊 {} inductions, {} reweights, {} sales (format: {})",
        snapshot.inductions.len(),
        snapshot.reweights.len(),
        snapshot.sales.len(),
        config.report_format.as_str()
    );

    let stdout = std::io::stdout();
    let mut out = ReportWriter::new(stdout.lock(), config.report_format);

    match cli.report {
        Report::InductionTable { shipment, pen } => {
            let rows = reports::active_inductions(&snapshot, &TableFilter::new(shipment, pen));
            out.write_rows(&rows)?;
        }
        Report::InductionSummary { shipment } => {
            out.write_rows(&reports::induction_pen_summary(&snapshot, &shipment))?;
        }
        Report::ReweightTable { shipment, pen } => {
            let rows = reports::active_reweights(&snapshot, &TableFilter::new(shipment, pen));
            out.write_rows(&rows)?;
        }
        Report::ReweightSummary { stage, shipment } => {
            out.write_rows(&reports::reweight_pen_summary(&snapshot, stage, &shipment))?;
        }
        Report::Sales { buyer } => {
            out.write_rows(&reports::sale_history(&snapshot, &buyer))?;
        }
        Report::StaffReport { buyer } => {
            let sales: Vec<_> = reports::sale_history(&snapshot, &buyer)
                .into_iter()
                .cloned()
                .collect();
            out.write_rows(&reports::staff_sale_report(&sales, &snapshot))?;
        }
        Report::Rollup { shipment } => {
            out.write_rows(&reports::shipment_rollup_report(&snapshot, &shipment))?;
        }
        Report::Lifecycle { shipment } => {
            out.write_rows(&reports::lifecycle_detail(&snapshot, &shipment))?;
        }
        Report::Filters => {
            out.write_one(&FilterCatalog::build(&snapshot))?;
        }
    }

    out.flush()?;
    Ok(())
}
