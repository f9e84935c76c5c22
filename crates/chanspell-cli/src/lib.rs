// chanspell-cli: shared utilities for the command-line tools.

use std::path::{Path, PathBuf};
use std::process;

use chanspell_channel::ChannelModel;
use chanspell_en::{CountingLanguageModel, SpellChecker};

/// Environment variable naming the channel model file.
pub const MODEL_ENV: &str = "CHANSPELL_MODEL";

/// Environment variable naming the language-model text file.
pub const LM_ENV: &str = "CHANSPELL_LM";

/// Initialize `env_logger` with a default filter of `warn`.
///
/// `RUST_LOG` overrides the default, e.g. `RUST_LOG=chanspell_channel=debug`.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Remove `--long VALUE`, `--long=VALUE` or `SHORT VALUE` from `args`.
///
/// Returns `(value, remaining_args)`. The last occurrence wins.
pub fn take_flag(
    args: &[String],
    long: &str,
    short: Option<&str>,
) -> Result<(Option<String>, Vec<String>), String> {
    let prefix = format!("{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || Some(arg.as_str()) == short {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// Split `args` at the first `--`. Everything after it is positional, even
/// when it starts with `-`.
pub fn split_at_separator(args: &[String]) -> (Vec<String>, Vec<String>) {
    match args.iter().position(|a| a == "--") {
        Some(i) => (args[..i].to_vec(), args[i + 1..].to_vec()),
        None => (args.to_vec(), Vec::new()),
    }
}

/// Remove a boolean switch from `args`. Returns whether it was present.
pub fn take_switch(args: &mut Vec<String>, long: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != long);
    args.len() != before
}

/// Parse a numeric flag value, naming the flag in the error.
pub fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value for {flag}: {value:?}"))
}

/// A path from the command line, falling back to an environment variable.
pub fn resolve_path(explicit: Option<&str>, env_var: &str) -> Option<PathBuf> {
    explicit
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(env_var).map(PathBuf::from))
}

/// Load a channel model, or start from the untrained table when no path
/// is configured.
pub fn load_model(path: Option<&Path>) -> Result<ChannelModel, String> {
    match path {
        Some(path) => ChannelModel::load(path)
            .map_err(|e| format!("failed to load model {}: {e}", path.display())),
        None => {
            log::warn!(
                "no channel model given (--model or {MODEL_ENV}); using the untrained table"
            );
            Ok(ChannelModel::new())
        }
    }
}

/// Load the language model text.
pub fn load_language_model(path: Option<&Path>) -> Result<CountingLanguageModel, String> {
    let path = path.ok_or_else(|| format!("no language model given (--lm or {LM_ENV})"))?;
    CountingLanguageModel::load(path)
        .map_err(|e| format!("failed to read language model {}: {e}", path.display()))
}

/// Build a checker from the configured model files.
pub fn load_checker(
    model: Option<&Path>,
    lm: Option<&Path>,
) -> Result<SpellChecker<CountingLanguageModel>, String> {
    let channel = load_model(model)?;
    let language_model = load_language_model(lm)?;
    Ok(SpellChecker::new(channel, language_model))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn take_flag_accepts_all_spellings() {
        let given = args(&["--model", "m.json", "x"]);
        let (v, rest) = take_flag(&given, "--model", Some("-m")).unwrap();
        assert_eq!(v.as_deref(), Some("m.json"));
        assert_eq!(rest, args(&["x"]));

        let (v, _) = take_flag(&args(&["--model=a.json"]), "--model", Some("-m")).unwrap();
        assert_eq!(v.as_deref(), Some("a.json"));

        let (v, _) = take_flag(&args(&["-m", "b.json"]), "--model", Some("-m")).unwrap();
        assert_eq!(v.as_deref(), Some("b.json"));
    }

    #[test]
    fn take_flag_without_value_is_an_error() {
        assert!(take_flag(&args(&["x", "--store"]), "--store", None).is_err());
    }

    #[test]
    fn take_flag_leaves_other_args() {
        let (v, rest) = take_flag(&args(&["a", "-n", "3"]), "--store", None).unwrap();
        assert!(v.is_none());
        assert_eq!(rest, args(&["a", "-n", "3"]));
    }

    #[test]
    fn take_switch_removes_every_occurrence() {
        let mut list = args(&["--autocorrect", "x", "--autocorrect"]);
        assert!(take_switch(&mut list, "--autocorrect"));
        assert_eq!(list, args(&["x"]));
        assert!(!take_switch(&mut list, "--autocorrect"));
    }

    #[test]
    fn separator_splits_off_positional_args() {
        let (options, rest) = split_at_separator(&args(&["-n", "2", "--", "-x", "--"]));
        assert_eq!(options, args(&["-n", "2"]));
        assert_eq!(rest, args(&["-x", "--"]));

        let (options, rest) = split_at_separator(&args(&["--autocorrect", "teh"]));
        assert_eq!(options, args(&["--autocorrect", "teh"]));
        assert!(rest.is_empty());
    }

    #[test]
    fn parse_number_names_the_flag() {
        assert_eq!(parse_number::<usize>("3", "-n"), Ok(3));
        let err = parse_number::<usize>("three", "-n").unwrap_err();
        assert!(err.contains("-n"));
    }

    #[test]
    fn explicit_path_wins_over_environment() {
        let path = resolve_path(Some("given.json"), "CHANSPELL_TEST_UNSET_VARIABLE");
        assert_eq!(path, Some(PathBuf::from("given.json")));
        assert_eq!(resolve_path(None, "CHANSPELL_TEST_UNSET_VARIABLE"), None);
    }

    #[test]
    fn missing_language_model_is_reported() {
        let err = load_language_model(None).err().unwrap();
        assert!(err.contains(LM_ENV));
    }
}
