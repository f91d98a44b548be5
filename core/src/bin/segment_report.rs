use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use runlog_core::cli::print_segment_report;
use runlog_core::ingest::read_csv_samples;
use runlog_core::storage::load_thresholds;
use runlog_core::{analyze_segment, SampleWindow, Section, Thresholds};

/// Analyser et utsnitt av en CSV-eksport fra klokke.
#[derive(Debug, Parser)]
#[command(name = "segment-report", version, about = "Summarize and classify a segment of a watch CSV export")]
struct Args {
    /// UTF-8 CSV file
    csv: PathBuf,

    /// warmup | main | cooldown
    #[arg(long, default_value = "main")]
    section: Section,

    /// Time window start (inclusive, compared as text)
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// Time window end (inclusive)
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Distance window start in meters
    #[arg(long = "from-m", requires = "to_m", conflicts_with = "from")]
    from_m: Option<f64>,
    /// Distance window end in meters
    #[arg(long = "to-m", requires = "from_m")]
    to_m: Option<f64>,

    /// JSON thresholds file (missing fields use defaults)
    #[arg(long)]
    thresholds: Option<PathBuf>,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn window(&self) -> SampleWindow {
        match (&self.from, &self.to, self.from_m, self.to_m) {
            (Some(from), Some(to), _, _) => SampleWindow::time(from, to),
            (_, _, Some(start), Some(end)) => SampleWindow::distance(start, end),
            _ => SampleWindow::All,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let thresholds = match &args.thresholds {
        Some(path) => load_thresholds(path)?,
        None => Thresholds::default(),
    };

    let file = File::open(&args.csv).with_context(|| format!("opening {}", args.csv.display()))?;
    let samples = read_csv_samples(BufReader::new(file))
        .with_context(|| format!("reading {}", args.csv.display()))?;
    if samples.is_empty() {
        bail!("{} contains no rows with distance or duration", args.csv.display());
    }

    let window = args.window();
    let analysis = match analyze_segment(&samples, &window, args.section, &thresholds) {
        Ok(a) => a,
        Err(e) => bail!("{} (window {:?})", e, window),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_segment_report(&analysis)?;
    }
    Ok(())
}
