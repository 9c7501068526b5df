use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use singlish_cli::commands::accuracy::{
    load_corpus, run_corpus, AccuracyResult, AccuracyStatus, CaseFilter,
};
use singlish_cli::commands::convert_ops;
use singlish_engine::Converter;

#[derive(Parser)]
#[command(name = "singlishtool", about = "Singlish to Sinhala conversion tool")]
struct Cli {
    /// Write JSON-lines trace logs to this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert text (reads lines from stdin when no text is given)
    Convert {
        /// Singlish text
        text: Option<String>,
        /// Mapping table file (TOML or compiled; default: embedded)
        #[arg(long)]
        table: Option<String>,
        /// Output as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the per-token conversion trace
    Explain {
        /// Singlish text
        text: String,
        /// Mapping table file (TOML or compiled; default: embedded)
        #[arg(long)]
        table: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run conversion accuracy tests from a TOML corpus
    Accuracy {
        /// Path to the accuracy corpus TOML file
        corpus_file: String,
        /// Filter by category (only run cases in this category)
        #[arg(long)]
        category: Option<String>,
        /// Filter by tag (only run cases with this tag)
        #[arg(long)]
        tag: Option<String>,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn expectation(r: &AccuracyResult) -> String {
    match (&r.expected, r.expect_warnings.is_empty()) {
        (Some(exp), true) => exp.clone(),
        (Some(exp), false) => format!("{exp} [{}]", r.expect_warnings.join(",")),
        (None, _) => format!("[{}]", r.expect_warnings.join(",")),
    }
}

fn print_results(results: &[AccuracyResult], verbose: bool) {
    let mut grouped: BTreeMap<&str, Vec<&AccuracyResult>> = BTreeMap::new();
    for r in results {
        grouped.entry(&r.category).or_default().push(r);
    }

    for (cat, group) in &grouped {
        println!("\n=== {} ({} cases) ===", cat, group.len());
        for r in group {
            match r.status {
                AccuracyStatus::Pass => {
                    if verbose {
                        println!("  \u{2713} {} {} \u{2192} {}", r.id, r.input, expectation(r));
                    }
                }
                AccuracyStatus::Fail => {
                    println!(
                        "  \u{2717} {} {} \u{2192} {} (got: {} [{}])",
                        r.id,
                        r.input,
                        expectation(r),
                        r.actual,
                        r.warnings.join(",")
                    );
                }
                AccuracyStatus::Skip => {
                    let reason = r.note.as_deref().unwrap_or("known failure");
                    println!("  - {} {} [skip: {}]", r.id, r.input, reason);
                }
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Some(ref dir) = cli.trace_dir {
        singlish_engine::init_tracing(dir);
    }

    match cli.command {
        Command::Convert { text, table, json } => {
            convert_ops::convert_cmd(text.as_deref(), table.as_deref(), json);
        }

        Command::Explain { text, table, json } => {
            convert_ops::explain_cmd(&text, table.as_deref(), json);
        }

        Command::Accuracy {
            corpus_file,
            category,
            tag,
            verbose,
            json,
        } => {
            let corpus = load_corpus(Path::new(&corpus_file)).unwrap_or_else(|e| {
                eprintln!("{}: {}", corpus_file, e);
                process::exit(1);
            });
            let filter = CaseFilter {
                category: category.as_deref(),
                tag: tag.as_deref(),
            };
            let report = run_corpus(&Converter::global(), &corpus, &filter);

            if report.results.is_empty() {
                eprintln!("No cases match the given filters");
                process::exit(1);
            }

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("JSON serialization failed")
                );
            } else {
                print_results(&report.results, verbose);
                let s = &report.summary;
                println!();
                println!("=== Summary ===");
                println!("  Total:     {}", s.total);
                println!("  Pass:      {:>3}", s.pass);
                println!("  Fail:      {:>3}", s.fail);
                println!("  Skip:      {:>3}", s.skip);
                println!(
                    "  Pass rate: {} ({}/{})",
                    s.pass_rate,
                    s.pass,
                    s.total - s.skip
                );
            }

            if report.summary.fail > 0 {
                process::exit(1);
            }
        }
    }
}
