mod input;
mod model;
mod pipeline;
mod report;
mod taxonomy;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::input::kernel::DeviceKernel;
use crate::input::{InputError, RawResponse, load_transcript};
use crate::report::{build_report, json::render_report_json, text::render_report_card};
use crate::taxonomy::Registry;

#[derive(Debug, Parser)]
#[command(name = "rubricqc", version, about = "Deterministic ceiling-constrained rubric scoring for student writing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score one transcript (or every transcript in a directory).
    Evaluate(EvaluateArgs),
}

#[derive(Debug, clap::Args)]
struct EvaluateArgs {
    /// Transcript JSON file with a `transcription` field.
    #[arg(long, conflicts_with_all = ["text", "batch"])]
    transcript: Option<PathBuf>,

    /// Literal response text instead of a transcript file.
    #[arg(long, conflicts_with = "batch")]
    text: Option<String>,

    /// Directory of transcript JSON files, evaluated independently.
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Rubric variant: component | argument.
    #[arg(long, default_value = "component")]
    variant: String,

    /// Optional device-kernel JSON for device-aware feedback.
    #[arg(long)]
    kernel: Option<PathBuf>,

    /// Output directory; reports go to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportMode::Both)]
    mode: ReportMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportMode {
    Text,
    Json,
    Both,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Command::Evaluate(args) = cli.command;
    if let Err(err) = run(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &EvaluateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::builtin();
    let variant = registry.resolve(&args.variant)?;

    let kernel = match &args.kernel {
        Some(path) => Some(DeviceKernel::load(path)?),
        None => None,
    };
    if let Some(k) = &kernel {
        if k.is_empty() {
            tracing::warn!("kernel has no devices; device-aware feedback disabled");
        }
    }

    let responses = collect_responses(args)?;
    if responses.is_empty() {
        return Err(Box::new(InputError::MissingInput(
            "no transcript given; use --transcript, --text, or --batch".to_string(),
        )));
    }

    for (stem, response) in &responses {
        let result = pipeline::evaluate(response, variant, &registry, kernel.as_ref());
        tracing::info!(
            stem = %stem,
            sm1 = result.sm1,
            sm2 = result.sm2,
            sm3 = result.sm3,
            total = result.total_points,
            "evaluated"
        );
        let doc = build_report(&result, response);

        match &args.out {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                if args.mode != ReportMode::Json {
                    std::fs::write(dir.join(format!("{stem}.report.txt")), render_report_card(&doc))?;
                }
                if args.mode != ReportMode::Text {
                    std::fs::write(dir.join(format!("{stem}.report.json")), render_report_json(&doc)?)?;
                }
            }
            None => {
                if args.mode != ReportMode::Json {
                    print!("{}", render_report_card(&doc));
                }
                if args.mode != ReportMode::Text {
                    println!("{}", render_report_json(&doc)?);
                }
            }
        }
    }

    Ok(())
}

fn collect_responses(args: &EvaluateArgs) -> Result<Vec<(String, RawResponse)>, InputError> {
    if let Some(text) = &args.text {
        return Ok(vec![("response".to_string(), RawResponse::from_text(text))]);
    }
    if let Some(path) = &args.transcript {
        return Ok(vec![(file_stem(path), load_transcript(path)?)]);
    }
    if let Some(dir) = &args.batch {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();
        let mut out = Vec::with_capacity(entries.len());
        for path in entries {
            out.push((file_stem(&path), load_transcript(&path)?));
        }
        return Ok(out);
    }
    Ok(Vec::new())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "response".to_string())
}
