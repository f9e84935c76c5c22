// chanspell-suggest: Check text lines and suggest corrections for non-words.
//
// Reads lines from the arguments or stdin. Each token is printed on its own
// line: known words as-is, non-words with their ranked corrections. With
// --autocorrect, each line is printed with every non-word replaced by its
// best correction.
//
// Usage:
//   chanspell-suggest [-m MODEL] [-l LM] [OPTIONS] [LINE...] [-- LINE...]
//
// Options:
//   -m, --model PATH         Channel model file (default: $CHANSPELL_MODEL)
//   -l, --lm PATH            Language-model text file (default: $CHANSPELL_LM)
//   -n, --max-suggestions N  Maximum number of suggestions (default: 5)
//   --distance N             Edit budget for candidates (default: 2)
//   --autocorrect            Print corrected lines instead of suggestions
//   -h, --help               Print help
//
// Lines after `--` are taken as text even when they start with `-`.

use std::io::{self, BufRead, Write};

use chanspell_cli::{
    LM_ENV, MODEL_ENV, fatal, parse_number, split_at_separator, take_flag, take_switch,
};
use chanspell_en::checker::DEFAULT_MAX_SUGGESTIONS;
use chanspell_en::suggestion::DEFAULT_MAX_DISTANCE;
use chanspell_en::{CheckerOptions, CountingLanguageModel, SpellChecker};

fn main() {
    chanspell_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (args, positional) = split_at_separator(&args);

    if chanspell_cli::wants_help(&args) {
        println!("chanspell-suggest: Suggest corrections for misspelled words.");
        println!();
        println!("Usage: chanspell-suggest [-m MODEL] [-l LM] [OPTIONS] [LINE...] [-- LINE...]");
        println!();
        println!("If LINE arguments are given, checks each line.");
        println!("Otherwise reads lines from stdin.");
        println!("Lines after -- are checked even when they start with -.");
        println!();
        println!("Options:");
        println!("  -m, --model PATH         Channel model file (default: ${MODEL_ENV})");
        println!("  -l, --lm PATH            Language-model text file (default: ${LM_ENV})");
        println!(
            "  -n, --max-suggestions N  Maximum suggestions (default: {DEFAULT_MAX_SUGGESTIONS})"
        );
        println!(
            "  --distance N             Candidate edit budget (default: {DEFAULT_MAX_DISTANCE})"
        );
        println!("  --autocorrect            Print corrected lines instead of suggestions");
        println!("  -h, --help               Print this help");
        return;
    }

    let (model_path, args) = take_flag(&args, "--model", Some("-m")).unwrap_or_else(|e| fatal(&e));
    let (lm_path, args) = take_flag(&args, "--lm", Some("-l")).unwrap_or_else(|e| fatal(&e));
    let (max_suggestions, args) =
        take_flag(&args, "--max-suggestions", Some("-n")).unwrap_or_else(|e| fatal(&e));
    let (distance, mut args) = take_flag(&args, "--distance", None).unwrap_or_else(|e| fatal(&e));
    let autocorrect = take_switch(&mut args, "--autocorrect");

    if let Some(unknown) = args.iter().find(|a| a.starts_with('-')) {
        fatal(&format!("unknown option {unknown} (put text starting with - after --)"));
    }
    let mut lines = args;
    lines.extend(positional);

    let mut options = CheckerOptions::default();
    if let Some(value) = max_suggestions {
        let max = parse_number(&value, "--max-suggestions").unwrap_or_else(|e| fatal(&e));
        options = options.with_max_suggestions(max);
    }
    if let Some(value) = distance {
        let distance = parse_number(&value, "--distance").unwrap_or_else(|e| fatal(&e));
        options = options.with_max_distance(distance);
    }

    let model_path = chanspell_cli::resolve_path(model_path.as_deref(), MODEL_ENV);
    let lm_path = chanspell_cli::resolve_path(lm_path.as_deref(), LM_ENV);
    let checker = chanspell_cli::load_checker(model_path.as_deref(), lm_path.as_deref())
        .unwrap_or_else(|e| fatal(&e))
        .with_options(options);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut check = |line: &str| {
        let result = if autocorrect {
            write_corrected(&checker, line, &mut out)
        } else {
            write_suggestions(&checker, line, &mut out)
        };
        if let Err(e) = result {
            fatal(&e);
        }
    };

    if lines.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            check(&line);
        }
    } else {
        for line in &lines {
            check(line);
        }
    }
}

fn write_corrected(
    checker: &SpellChecker<CountingLanguageModel>,
    line: &str,
    out: &mut impl Write,
) -> Result<(), String> {
    let corrected = checker.autocorrect_line(line).map_err(|e| e.to_string())?;
    writeln!(out, "{}", corrected.join(" ")).map_err(|e| e.to_string())
}

fn write_suggestions(
    checker: &SpellChecker<CountingLanguageModel>,
    line: &str,
    out: &mut impl Write,
) -> Result<(), String> {
    let max = checker.options().max_suggestions;
    for sentence in checker.sentences(line) {
        let checked = checker
            .check_sentence(&sentence, false)
            .map_err(|e| e.to_string())?;
        for (token, options) in sentence.iter().zip(checked) {
            let written = if checker.is_known(token) {
                writeln!(out, "{}", options.join(""))
            } else if options.is_empty() {
                writeln!(out, "{token}: (no suggestions)")
            } else {
                let shown = &options[..options.len().min(max)];
                writeln!(out, "{token}: {}", shown.join(", "))
            };
            written.map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}
