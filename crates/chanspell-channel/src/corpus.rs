// Misspelling corpus: one `observed,intended` pair per line

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::ChannelError;

/// One training example: what was typed and what was meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misspelling {
    pub observed: String,
    pub intended: String,
}

impl Misspelling {
    pub fn new(observed: impl Into<String>, intended: impl Into<String>) -> Self {
        Self {
            observed: observed.into(),
            intended: intended.into(),
        }
    }
}

/// An ordered, immutable list of misspellings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pairs: Vec<Misspelling>,
}

impl Corpus {
    /// Parse corpus text.
    ///
    /// Each non-blank line must hold exactly one comma; both sides are
    /// trimmed. Blank lines are skipped. Any other line is an error
    /// carrying its 1-based line number.
    pub fn parse(text: &str) -> Result<Self, ChannelError> {
        let mut pairs = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if let Some(pair) = parse_line(index + 1, line)? {
                pairs.push(pair);
            }
        }
        Ok(Self { pairs })
    }

    /// Read and parse a corpus from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ChannelError> {
        let mut pairs = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            if let Some(pair) = parse_line(index + 1, &line?)? {
                pairs.push(pair);
            }
        }
        Ok(Self { pairs })
    }

    /// Read and parse a corpus file.
    pub fn load(path: &Path) -> Result<Self, ChannelError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn pairs(&self) -> &[Misspelling] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Parse one corpus line. Blank lines yield `None`.
///
/// `line_number` is only used in the error.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<Misspelling>, ChannelError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let mut parts = line.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(observed), Some(intended), None) => {
            Ok(Some(Misspelling::new(observed.trim(), intended.trim())))
        }
        _ => Err(ChannelError::MalformedCorpusLine {
            line: line_number,
            content: line.to_string(),
        }),
    }
}
