// chanspell-train: Learn a channel model from a misspelling corpus.
//
// The corpus has one `observed,intended` pair per line. The trained table
// is written as JSON to the --store path.
//
// Usage:
//   chanspell-train --source CORPUS --store MODEL [OPTIONS]
//
// Options:
//   --source PATH          Misspelling corpus
//   --store PATH           Output model file
//   --max-iterations N     Re-estimation cap (default: 100)
//   --prior P              Additive count prior, positive and finite (default: 0.1)
//   -h, --help             Print help

use std::path::Path;

use chanspell_channel::cost::check_prior;
use chanspell_channel::{ChannelModel, Corpus, Trainer, TrainerConfig};
use chanspell_cli::{fatal, parse_number, take_flag};

fn main() {
    chanspell_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if chanspell_cli::wants_help(&args) {
        println!("chanspell-train: Learn a channel model from a misspelling corpus.");
        println!();
        println!("Usage: chanspell-train --source CORPUS --store MODEL [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --source PATH        Misspelling corpus, one observed,intended pair per line");
        println!("  --store PATH         Output model file (JSON)");
        println!("  --max-iterations N   Re-estimation cap (default: 100)");
        println!("  --prior P            Additive count prior (default: 0.1)");
        println!("  -h, --help           Print this help");
        return;
    }

    let (source, args) = take_flag(&args, "--source", None).unwrap_or_else(|e| fatal(&e));
    let (store, args) = take_flag(&args, "--store", None).unwrap_or_else(|e| fatal(&e));
    let (max_iterations, args) =
        take_flag(&args, "--max-iterations", None).unwrap_or_else(|e| fatal(&e));
    let (prior, args) = take_flag(&args, "--prior", None).unwrap_or_else(|e| fatal(&e));

    if let Some(extra) = args.first() {
        fatal(&format!("unexpected argument {extra:?}"));
    }
    let source = source.unwrap_or_else(|| fatal("--source is required"));
    let store = store.unwrap_or_else(|| fatal("--store is required"));

    let mut config = TrainerConfig::default();
    if let Some(value) = max_iterations {
        let max_iterations = parse_number(&value, "--max-iterations").unwrap_or_else(|e| fatal(&e));
        config = config.with_max_iterations(max_iterations);
    }
    if let Some(value) = prior {
        let prior = parse_number(&value, "--prior").unwrap_or_else(|e| fatal(&e));
        let prior = check_prior(prior).unwrap_or_else(|e| fatal(&format!("--prior: {e}")));
        config = config.with_prior(prior);
    }

    let corpus = Corpus::load(Path::new(&source))
        .unwrap_or_else(|e| fatal(&format!("failed to read {source}: {e}")));
    if corpus.is_empty() {
        log::warn!("{source} contains no pairs; the stored model will be uniform");
    }

    let model = ChannelModel::new();
    let report = Trainer::new(config)
        .train(&corpus, &model)
        .unwrap_or_else(|e| fatal(&format!("training failed: {e}")));

    model
        .save(Path::new(&store))
        .unwrap_or_else(|e| fatal(&format!("failed to write {store}: {e}")));

    let status = if report.converged {
        "converged"
    } else {
        "stopped at the iteration cap"
    };
    println!(
        "trained on {} pairs: {} iterations, {status}; model written to {store}",
        corpus.len(),
        report.iterations
    );
}
