//! CLI entry point for the quiz response-time extractor.
//!
//! Provides subcommands for aggregating a directory of exam exports into one
//! spreadsheet and for inspecting a single export.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use quiz_response_times::{
    config::{
        DEFAULT_EXTENSION, DEFAULT_OUTPUT_FILE, DEFAULT_SAVED_MARKER, DEFAULT_STARTED_MARKER,
        DEFAULT_TIMESTAMP_FORMAT, ExtractConfig, TimingMarkers,
    },
    extractor::{extract_file, run},
    logging::{self, DEFAULT_LOG_FILE},
    output::{OutputFormat, print_json, print_pretty},
    parser::QuestionParser,
    scan::file_label,
    stats::FileSummary,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "quiz_response_times")]
#[command(about = "Extract per-question response times from exam exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate every export in a directory into one table
    Extract {
        /// Directory containing the exam export files
        #[arg(short, long, default_value = ".")]
        input_dir: PathBuf,

        /// Spreadsheet to write (replaced if it exists)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Output format; inferred from the output extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Extension of the export files to pick up
        #[arg(short, long, default_value = DEFAULT_EXTENSION)]
        extension: String,

        #[command(flatten)]
        markers: MarkerArgs,
    },
    /// Show the response times of a single export
    Inspect {
        /// Export file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        markers: MarkerArgs,
    },
}

#[derive(Args)]
struct MarkerArgs {
    /// Text identifying the attempt-start row of a timing table
    #[arg(long, default_value = DEFAULT_STARTED_MARKER)]
    started_marker: String,

    /// Text identifying the answer-saved row of a timing table
    #[arg(long, default_value = DEFAULT_SAVED_MARKER)]
    saved_marker: String,

    /// chrono format of timing-table timestamps
    #[arg(long, default_value = DEFAULT_TIMESTAMP_FORMAT)]
    timestamp_format: String,
}

impl From<MarkerArgs> for TimingMarkers {
    fn from(args: MarkerArgs) -> Self {
        TimingMarkers {
            started: args.started_marker,
            saved: args.saved_marker,
            timestamp_format: args.timestamp_format,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let log_file = std::env::var("LOG_FILE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE));
    let _log_guard = logging::init(&log_file)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input_dir,
            output,
            format,
            extension,
            markers,
        } => {
            let mut config = ExtractConfig::new(&input_dir, &output)
                .with_extension(&extension)
                .with_markers(markers.into());
            if let Some(format) = format {
                config = config.with_format(format);
            }

            let extraction = run(&config)?;

            let answered: usize = extraction.summaries.iter().map(|s| s.answered).sum();
            info!(
                files = extraction.table.column_count(),
                questions = extraction.table.row_count(),
                answered,
                output = %config.output_path.display(),
                "All response times saved"
            );
        }
        Commands::Inspect {
            file,
            json,
            markers,
        } => {
            let parser = QuestionParser::new()?;
            let times = extract_file(&file, &parser, &markers.into())?;

            for (index, time) in times.iter().enumerate() {
                info!(
                    question = index + 1,
                    seconds = time.seconds(),
                    recorded = time.is_recorded(),
                    "Response time"
                );
            }

            let summary = FileSummary::from_times(&file_label(&file), &times);
            if json {
                print_json(&summary)?;
            } else {
                print_pretty(&summary);
                info!(
                    file = %summary.file,
                    questions = summary.questions,
                    answered_pct = summary.answered_pct(),
                    mean_seconds = summary.mean_seconds,
                    "Summary"
                );
            }
        }
    }

    Ok(())
}
