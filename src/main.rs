use anyhow::Result;
use clap::Parser;
use cyk::args::CykArgs;
use cyk::config::Config;
use cyk::cyk::{recognize, render_table};
use cyk::grammar::Grammar;
use cyk::io::output_json::{
    query_error_to_json, recognition_to_json, write_grammar_json, write_report_json,
};
use cyk::io::output_text::{grammar_to_text, write_grammar_text};
use cyk::io::reader::read_grammar_file;
use cyk::shell::Shell;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let args = CykArgs::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns false when a `--query` string was not derivable.
fn run(args: &CykArgs) -> Result<bool> {
    let config = args.to_config()?;
    let grammar = read_grammar_file(&config.grammar_path, &config.limits)?;
    log::info!(
        "Loaded {} productions over {} nonterminals from {}",
        grammar.production_count(),
        grammar.nonterminals().count(),
        config.grammar_path.display()
    );

    if args.print_grammar {
        print!("{}", grammar_to_text(&grammar));
    }
    if let Some(text_path) = &args.output_text {
        write_grammar_text(&grammar, text_path)?;
    }

    if args.query.is_empty() {
        if let Some(json_path) = &config.output_json_path {
            write_grammar_json(json_path, &grammar)?;
        }
        let stdin = io::stdin();
        Shell::new(&grammar, config.limits)
            .with_table(config.show_table)
            .run(stdin.lock(), io::stdout())?;
        return Ok(true);
    }

    answer_queries(&grammar, &config, &args.query)
}

fn answer_queries(grammar: &Grammar, config: &Config, queries: &[String]) -> Result<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_derivable = true;
    let mut reports = Vec::new();

    for query in queries {
        match recognize(grammar, query, &config.limits) {
            Ok(recognition) => {
                if config.show_table {
                    write!(out, "{}", render_table(&recognition.table))?;
                }
                let verdict = if recognition.accepted { "yes" } else { "no" };
                writeln!(out, "{}: {}", query, verdict)?;
                all_derivable &= recognition.accepted;
                reports.push(recognition_to_json(query, &recognition));
            }
            Err(e) => {
                writeln!(out, "{}: error: {}", query, e)?;
                all_derivable = false;
                reports.push(query_error_to_json(query, &e));
            }
        }
    }
    out.flush()?;

    if let Some(json_path) = &config.output_json_path {
        write_report_json(json_path, grammar, &reports)?;
    }
    Ok(all_derivable)
}
