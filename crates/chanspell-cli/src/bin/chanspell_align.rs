// chanspell-align: Show the optimal alignment of observed/intended pairs.
//
// Takes an OBSERVED INTENDED pair from the arguments, or reads
// `observed,intended` lines from stdin. Stdin lines follow the corpus
// format; malformed ones are reported and skipped.
//
// Usage:
//   chanspell-align [-m MODEL] [OBSERVED INTENDED]
//
// Options:
//   -m, --model PATH   Channel model file (default: $CHANSPELL_MODEL, else untrained)
//   -h, --help         Print help

use std::io::{self, BufRead, Write};

use chanspell_channel::ChannelModel;
use chanspell_channel::corpus::parse_line;
use chanspell_cli::{MODEL_ENV, fatal, take_flag};

fn main() {
    chanspell_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if chanspell_cli::wants_help(&args) {
        println!("chanspell-align: Show the optimal alignment of a misspelling.");
        println!();
        println!("Usage: chanspell-align [-m MODEL] [OBSERVED INTENDED]");
        println!();
        println!("Without arguments, reads observed,intended lines from stdin.");
        println!();
        println!("Options:");
        println!("  -m, --model PATH   Channel model file (default: ${MODEL_ENV})");
        println!("  -h, --help         Print this help");
        return;
    }

    let (model_path, words) = take_flag(&args, "--model", Some("-m")).unwrap_or_else(|e| fatal(&e));
    let model_path = chanspell_cli::resolve_path(model_path.as_deref(), MODEL_ENV);
    let model = chanspell_cli::load_model(model_path.as_deref()).unwrap_or_else(|e| fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match words.as_slice() {
        [] => {
            let stdin = io::stdin();
            for (index, line) in stdin.lock().lines().enumerate() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        eprintln!("error reading stdin: {e}");
                        break;
                    }
                };
                match parse_line(index + 1, &line) {
                    Ok(Some(pair)) => {
                        print_alignment(&model, &pair.observed, &pair.intended, &mut out)
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("skipping {e}"),
                }
            }
        }
        [observed, intended] => print_alignment(&model, observed, intended, &mut out),
        _ => fatal("expected OBSERVED INTENDED or no arguments"),
    }
}

fn print_alignment(model: &ChannelModel, observed: &str, intended: &str, out: &mut impl Write) {
    let alignment = model.align(observed, intended);
    let _ = writeln!(out, "{alignment}");
    match model.prob(observed, intended) {
        Ok(log_prob) => {
            let _ = writeln!(out, "cost: {:.4}  log prob: {log_prob:.4}", alignment.cost);
        }
        Err(e) => fatal(&e.to_string()),
    }
    let _ = writeln!(out);
}
