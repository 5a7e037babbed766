use std::fs;
use std::path::Path;
use std::process;

use sanifu_engine::corpus::{self, DEFAULT_CORPUS_URL};
use sanifu_engine::pipeline::Engine;
use sanifu_engine::resources::Resources;

/// Print the formatted error and exit when the Result is Err.
macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
    }

    match args[1].as_str() {
        "fetch" => run_fetch(&args[2..]),
        "build" => {
            if args.len() != 4 {
                eprintln!("Usage: corpustool build <input-dir> <output-dir>");
                process::exit(1);
            }
            build(&args[2], &args[3]);
        }
        "compile" => {
            if args.len() != 4 {
                eprintln!("Usage: corpustool compile <input-dir> <bundle-file>");
                process::exit(1);
            }
            compile(&args[2], &args[3]);
        }
        "info" => {
            if args.len() != 3 {
                eprintln!("Usage: corpustool info <bundle-file>");
                process::exit(1);
            }
            info(&args[2]);
        }
        _ => usage(),
    }
}

fn mb(bytes: u64) -> f64 {
    bytes as f64 / 1_048_576.0
}

fn usage() -> ! {
    eprintln!("Usage: corpustool <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  fetch    [--url <zip-url>] <output-dir>");
    eprintln!("  build    <input-dir> <output-dir>");
    eprintln!("  compile  <input-dir> <bundle-file>");
    eprintln!("  info     <bundle-file>");
    process::exit(1);
}

/// Parse `[--url <zip-url>] <output-dir>`.
fn run_fetch(args: &[String]) {
    let mut url = DEFAULT_CORPUS_URL;
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        if args[i] == "--url" {
            i += 1;
            if i >= args.len() {
                eprintln!("Error: --url requires a value");
                process::exit(1);
            }
            url = args[i].as_str();
        } else {
            positional.push(args[i].as_str());
        }
        i += 1;
    }

    if positional.len() != 1 {
        eprintln!("Usage: corpustool fetch [--url <zip-url>] <output-dir>");
        process::exit(1);
    }

    die!(
        corpus::fetch(url, Path::new(positional[0])),
        "Error fetching corpus: {}"
    );
}

fn build(input_dir: &str, output_dir: &str) {
    let input_path = Path::new(input_dir);
    if !input_path.is_dir() {
        eprintln!("Error: no such directory: {input_dir}");
        process::exit(1);
    }

    let counts = die!(
        corpus::build_ngrams(input_path, Path::new(output_dir)),
        "Error building n-gram tables: {}"
    );

    eprintln!(
        "Wrote {} unigrams, {} bigrams, {} trigrams to {output_dir}",
        counts.unigrams.len(),
        counts.bigrams.len(),
        counts.trigrams.len()
    );
}

fn compile(input_dir: &str, bundle_file: &str) {
    let input_path = Path::new(input_dir);
    if !input_path.is_dir() {
        eprintln!("Error: no such directory: {input_dir}");
        process::exit(1);
    }

    let resources = Resources::load_dir(input_path);
    die!(
        resources.save_bundle(Path::new(bundle_file)),
        "Error writing bundle: {}"
    );

    let file_size = fs::metadata(bundle_file).map(|m| m.len()).unwrap_or(0);
    eprintln!("Wrote {bundle_file} ({:.1} MB)", mb(file_size));
}

fn info(bundle_file: &str) {
    let resources = die!(
        Resources::open_bundle(Path::new(bundle_file)),
        "Error opening bundle: {}"
    );

    let file_size = fs::metadata(bundle_file).map(|m| m.len()).unwrap_or(0);

    println!("Bundle:             {bundle_file}");
    println!("File size:          {:.1} MB", mb(file_size));
    println!("English words:      {}", resources.english_words.len());
    println!("English morphemes:  {}", resources.english_morphemes.len());
    println!("Swahili words:      {}", resources.swahili_words.len());
    println!("Swahili verbs:      {}", resources.swahili_verbs.len());
    println!("Swahili adjectives: {}", resources.swahili_adjectives.len());
    println!("Unigrams:           {}", resources.unigrams.len());
    println!("Bigrams:            {}", resources.bigrams.len());
    println!("Trigrams:           {}", resources.trigrams.len());

    // Sample some corrections
    let engine = Engine::new(resources);
    let sample_words = ["kja", "gr8", "nakam"];
    println!();
    println!("Sample corrections:");
    for word in &sample_words {
        let candidates = engine.candidate_corrections(word);
        if candidates.is_empty() {
            println!("  {word} → (no candidates)");
        } else {
            let shown: Vec<&str> = candidates.iter().take(5).map(|s| s.as_str()).collect();
            println!("  {word} → {}", shown.join(", "));
        }
    }
}
