use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cyk::config::Limits;
use cyk::cyk::{run_batch, BatchMetrics, BatchOutcome};
use cyk::io::output_json::grammar_to_json;
use cyk::io::output_text::grammar_to_text;
use cyk::io::reader::{read_grammar_file, read_query_file};
use log::info;
use serde_json::json;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(name = "cyk-utils", version = "0.1.0", about = "Utility tools for CNF grammars")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validates a grammar file and prints it back in normalized form.
    Check {
        /// Path to the grammar file.
        #[clap(short, long, value_parser)]
        grammar: PathBuf,

        /// JSON file overriding the default size limits.
        #[clap(long, value_parser)]
        limits: Option<PathBuf>,

        /// Print the grammar as JSON instead of text.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
    /// Tests every line of an input file against a grammar, in parallel.
    Batch {
        /// Path to the grammar file.
        #[clap(short, long, value_parser)]
        grammar: PathBuf,

        /// File with one candidate string per line.
        #[clap(short, long, value_parser)]
        input: PathBuf,

        /// Number of worker threads (default: number of CPU cores).
        #[clap(short, long, value_parser)]
        threads: Option<usize>,

        /// JSON file overriding the default size limits.
        #[clap(long, value_parser)]
        limits: Option<PathBuf>,

        /// Maximum length of a tested string.
        #[clap(long, value_parser)]
        max_string_length: Option<usize>,

        /// Print outcomes and metrics as JSON.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { grammar, limits, json } => {
            Limits::resolve(limits.as_deref(), None).and_then(|limits| check(&grammar, &limits, json))
        }
        Commands::Batch {
            grammar,
            input,
            threads,
            limits,
            max_string_length,
            json,
        } => Limits::resolve(limits.as_deref(), max_string_length).and_then(|limits| {
            let threads = threads.unwrap_or_else(num_cpus::get).max(1);
            batch(&grammar, &input, &limits, threads, json)
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn check(grammar_path: &Path, limits: &Limits, json: bool) -> Result<()> {
    info!("Checking grammar {}", grammar_path.display());
    let grammar = read_grammar_file(grammar_path, limits)?;

    if json {
        let text = serde_json::to_string_pretty(&grammar_to_json(&grammar))
            .context("Failed to serialize grammar to JSON")?;
        println!("{}", text);
    } else {
        print!("{}", grammar_to_text(&grammar));
        println!(
            "OK: {} productions, {} nonterminals",
            grammar.production_count(),
            grammar.nonterminals().count()
        );
    }
    Ok(())
}

fn batch(
    grammar_path: &Path,
    input_path: &Path,
    limits: &Limits,
    threads: usize,
    json: bool,
) -> Result<()> {
    let grammar = read_grammar_file(grammar_path, limits)?;
    let queries = read_query_file(input_path)?;
    info!(
        "Testing {} strings from {} using {} threads",
        queries.len(),
        input_path.display(),
        threads
    );
    let (outcomes, metrics) = run_batch(&grammar, &queries, limits, threads)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if json {
        let report = json!({
            "outcomes": outcomes,
            "metrics": metrics,
        });
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize batch results")?;
        writeln!(out, "{}", text)?;
    } else {
        for outcome in &outcomes {
            writeln!(out, "{}", format_outcome(outcome))?;
        }
        writeln!(out, "{}", format_metrics(&metrics))?;
    }
    out.flush().context("Failed to flush batch output")?;
    Ok(())
}

fn format_outcome(outcome: &BatchOutcome) -> String {
    match (&outcome.derivable, &outcome.error) {
        (Some(true), _) => format!("{}: yes", outcome.input),
        (Some(false), _) => format!("{}: no", outcome.input),
        (None, Some(error)) => format!("{}: error: {}", outcome.input, error),
        (None, None) => format!("{}: unknown", outcome.input),
    }
}

fn format_metrics(metrics: &BatchMetrics) -> String {
    format!(
        "{} derivable, {} not derivable, {} rejected ({:?})",
        metrics.accepted, metrics.rejected, metrics.failed, metrics.total_time
    )
}
