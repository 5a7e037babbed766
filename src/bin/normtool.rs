use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use sanifu_engine::model::explain;
use sanifu_engine::pipeline::{Engine, Outcome};
use sanifu_engine::resources::Resources;

#[derive(Parser)]
#[command(name = "normtool", about = "Sanifu normalization diagnostics")]
struct Cli {
    /// Directory for the JSON trace log (needs the `trace` build feature)
    #[arg(long, global = true, value_name = "DIR")]
    trace_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a sentence
    Correct {
        /// Path to a resource directory or compiled bundle
        #[arg(long)]
        resources: String,
        /// Sentence to normalize
        sentence: String,
        /// Print per-token decisions before the result
        #[arg(long)]
        verbose: bool,
    },

    /// Explain the correction pipeline for a single word
    Explain {
        /// Path to a resource directory or compiled bundle
        #[arg(long)]
        resources: String,
        /// Word to explain
        word: String,
        /// Preceding words in sentence order (up to two)
        #[arg(long, num_args = 1..=2, value_name = "WORD")]
        context: Vec<String>,
        /// Number of candidate rows to show
        #[arg(short, long, default_value = "10")]
        n: usize,
        /// Emit JSON instead of the text table
        #[arg(long)]
        json: bool,
    },

    /// Record top-N candidates for each word in a list as JSONL
    Snapshot {
        /// Path to a resource directory or compiled bundle
        #[arg(long)]
        resources: String,
        /// Path to the input file (one word per line)
        input_file: String,
        /// JSONL file to write
        output_file: String,
        /// Number of top candidates to record per word
        #[arg(short, long, default_value = "5")]
        n: usize,
    },

    /// Diff current candidates against a saved snapshot
    DiffSnapshot {
        /// Path to a resource directory or compiled bundle
        #[arg(long)]
        resources: String,
        /// Path to the input file (one word per line)
        input_file: String,
        /// Baseline JSONL file to compare against
        baseline_file: String,
        /// Number of top candidates to compare per word
        #[arg(short, long, default_value = "5")]
        n: usize,
    },
}

/// One JSONL record per input word.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    word: String,
    candidates: Vec<String>,
}

fn open_engine(resources: &str) -> Engine {
    let path = Path::new(resources);
    let resources = if path.is_dir() {
        Resources::load_dir(path)
    } else {
        Resources::open_bundle(path).unwrap_or_else(|e| {
            eprintln!("Cannot open resource bundle {}: {}", path.display(), e);
            process::exit(1);
        })
    };
    Engine::new(resources)
}

/// Reads one word per line, skipping blanks and `#` comment lines.
fn load_word_list(path: &str) -> Vec<String> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Cannot read word list {}: {}", path, e);
        process::exit(1);
    });
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

fn load_baseline(path: &str) -> HashMap<String, Vec<String>> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Cannot read baseline {}: {}", path, e);
        process::exit(1);
    });
    let mut map = HashMap::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        let entry: SnapshotEntry = serde_json::from_str(line).unwrap_or_else(|e| {
            eprintln!("Bad baseline line in {}: {}", path, e);
            process::exit(1);
        });
        map.insert(entry.word, entry.candidates);
    }
    map
}

fn top_candidates(engine: &Engine, word: &str, n: usize) -> Vec<String> {
    let report = engine.explain(word, &[], n);
    report.rows.into_iter().map(|r| r.word).collect()
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.trace_dir {
        sanifu_engine::trace_init::init_tracing(Path::new(dir));
    }

    match cli.command {
        Command::Correct {
            resources,
            sentence,
            verbose,
        } => {
            let engine = open_engine(&resources);
            let decisions = engine.normalize_verbose(&sentence);

            if verbose {
                for decision in &decisions {
                    if decision.outcome == Outcome::Separator {
                        continue;
                    }
                    if decision.original == decision.output {
                        println!("  {:<16} {:?}", decision.original, decision.outcome);
                    } else {
                        println!(
                            "  {:<16} -> {:<16} {:?}",
                            decision.original, decision.output, decision.outcome
                        );
                    }
                }
            }

            let corrected: String = decisions.iter().map(|d| d.output.as_str()).collect();
            println!("{corrected}");
        }

        Command::Explain {
            resources,
            word,
            context,
            n,
            json,
        } => {
            let engine = open_engine(&resources);
            let result = engine.explain(&word, &context, n);

            if json {
                let text =
                    serde_json::to_string_pretty(&result).expect("JSON serialization failed");
                println!("{text}");
            } else {
                print!("{}", explain::format_text(&result));
            }
        }

        Command::Snapshot {
            resources,
            input_file,
            output_file,
            n,
        } => {
            let engine = open_engine(&resources);
            let words = load_word_list(&input_file);

            let mut out = String::new();
            for word in &words {
                let entry = SnapshotEntry {
                    word: word.clone(),
                    candidates: top_candidates(&engine, word, n),
                };
                out.push_str(&serde_json::to_string(&entry).expect("JSON serialization failed"));
                out.push('\n');
            }
            fs::write(&output_file, out).unwrap_or_else(|e| {
                eprintln!("Cannot write {}: {}", output_file, e);
                process::exit(1);
            });

            eprintln!("Recorded {} words to {}", words.len(), output_file);
        }

        Command::DiffSnapshot {
            resources,
            input_file,
            baseline_file,
            n,
        } => {
            let engine = open_engine(&resources);
            let words = load_word_list(&input_file);
            let baseline = load_baseline(&baseline_file);

            let mut unchanged = 0usize;
            let mut drifted = 0usize;
            let mut added = 0usize;

            for word in &words {
                let current = top_candidates(&engine, word, n);
                match baseline.get(word) {
                    Some(recorded) if *recorded == current => unchanged += 1,
                    Some(recorded) => {
                        drifted += 1;
                        let then = recorded.first().map_or("(none)", |s| s.as_str());
                        let now = current.first().map_or("(none)", |s| s.as_str());
                        if then == now {
                            println!("~ {word}: top candidate still {now}, tail differs");
                        } else {
                            println!("~ {word}: {then} is now {now}");
                        }
                    }
                    None => {
                        added += 1;
                        let now = current.first().map_or("(none)", |s| s.as_str());
                        println!("+ {word}: {now}");
                    }
                }
            }

            println!();
            println!(
                "{} words: {} unchanged, {} drifted, {} not in baseline",
                words.len(),
                unchanged,
                drifted,
                added
            );

            if drifted > 0 {
                process::exit(1);
            }
        }
    }
}
