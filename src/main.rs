use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jobsweep::{
    config::{ScanConfig, Settings},
    fetcher::HttpSource,
    output::write_csv_file,
    scan::{CompanyStatus, ScanPlan, Scanner},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Collect job postings from company careers pages into a CSV file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Companies file (YAML)
    #[arg(short, long, default_value = "companies.yaml")]
    config: PathBuf,

    /// Where to write the CSV output
    #[arg(short, long, default_value = "Jobs.csv")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = Settings::from_env()?;
    let config = ScanConfig::load(&args.config)?;
    let plan = ScanPlan::compile(&config)
        .with_context(|| format!("invalid rules in {}", args.config.display()))?;

    let source = HttpSource::new(&settings)?;
    let scanner = Scanner::new(source, settings.politeness_delay());
    let report = scanner.run(&plan).await;

    for outcome in &report.outcomes {
        if let CompanyStatus::Skipped(reason) = &outcome.status {
            warn!(company = %outcome.company, ?reason, "company skipped");
        }
    }

    write_csv_file(&args.output, &report.postings)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        postings = report.postings.len(),
        skipped = report.skipped().count(),
        output = %args.output.display(),
        "done"
    );
    Ok(())
}
