//! Run command - enrich every account in an input spreadsheet.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tracing::debug;

use taxfetch_core::batch::{BatchEvent, BatchRunner, BatchState, CancelFlag, EventSink};
use taxfetch_core::models::{County, SheetFormat};
use taxfetch_core::sheet::{SpreadsheetSink, SpreadsheetSource};

use super::load_config;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Input spreadsheet (xlsx, xls, ods or csv) with a TAXID column
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// County tax office to query
    #[arg(long)]
    county: Option<County>,

    /// Output file format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Pause between lookups, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook
    Xlsx,
    /// Comma-separated values
    Csv,
}

impl From<OutputFormat> for SheetFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => SheetFormat::Xlsx,
            OutputFormat::Csv => SheetFormat::Csv,
        }
    }
}

pub async fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(dir) = args.output_dir {
        config.output.directory = dir;
    }
    if let Some(county) = args.county {
        config.batch.county = county;
    }
    if let Some(format) = args.format {
        config.output.format = format.into();
    }
    if let Some(delay_ms) = args.delay_ms {
        config.batch.delay_ms = delay_ms;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let source = SpreadsheetSource::new(&args.input);
    let sink = SpreadsheetSink::new(
        config.output.directory.clone(),
        config.batch.county,
        config.output.format,
    );

    println!(
        "{} Looking up {} County accounts from {}",
        style("ℹ").blue(),
        config.batch.county,
        args.input.display()
    );

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let events = EventSink::new(tx);
    let cancel = CancelFlag::new();
    let runner_cancel = cancel.clone();
    // The blocking HTTP client must be built and dropped off the async runtime.
    let handle = tokio::task::spawn_blocking(move || -> taxfetch_core::Result<_> {
        let runner = BatchRunner::from_config(&config)?.with_cancel_flag(runner_cancel);
        runner.run(&source, &sink, &events)
    });

    let mut state = BatchState::Idle;
    let mut cancelling = false;
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => handle_event(&pb, &mut state, event),
                None => break,
            },
            _ = tokio::signal::ctrl_c(), if !cancelling => {
                cancelling = true;
                cancel.cancel();
                pb.println(format!(
                    "{} Cancelling after the current record...",
                    style("!").yellow()
                ));
            }
        }
    }

    let result = handle.await?;
    match &result {
        Ok(_) => pb.finish_with_message("Complete"),
        Err(_) => pb.abandon_with_message("Failed"),
    }
    let summary = result?;
    debug!("Batch ended in state {}", state);

    println!();
    println!(
        "{} Processed {}/{} records in {:?}",
        style("✓").green(),
        summary.processed,
        summary.total,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} skipped",
        style(summary.succeeded()).green(),
        style(summary.errors).red(),
        style(summary.skipped).yellow()
    );
    if summary.cancelled {
        println!("   {}", style("Run was cancelled; partial results saved.").yellow());
    }
    if let Some(output) = &summary.output {
        println!(
            "{} Results written to {}",
            style("✓").green(),
            output.display()
        );
    }

    Ok(())
}

fn handle_event(pb: &ProgressBar, state: &mut BatchState, event: BatchEvent) {
    match event {
        BatchEvent::State(next) => {
            *state = next;
            pb.set_message(next.to_string());
        }
        BatchEvent::Progress { processed, total } => {
            pb.set_length(total as u64);
            pb.set_position(processed as u64);
        }
        BatchEvent::Skipped { index } => {
            debug!("Record {} has no account number", index + 1);
        }
        BatchEvent::RecordFailed { account, message } => {
            pb.println(format!("{} {}: {}", style("✗").red(), account, message));
        }
        BatchEvent::Log(line) => debug!("{}", line),
    }
}
