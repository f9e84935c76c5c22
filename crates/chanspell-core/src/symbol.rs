// Closed symbol alphabet for the channel model: a-z, UNKNOWN and BLANK.

use std::fmt;

/// Number of ordinary letters (`a`..=`z`).
pub const LETTER_COUNT: usize = 26;

/// Total number of symbols: 26 letters + UNKNOWN + BLANK.
pub const SYMBOL_COUNT: usize = LETTER_COUNT + 2;

/// The lowercase ASCII letters, in index order.
pub const LETTERS: [char; LETTER_COUNT] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Character used to print the BLANK side of an insertion or deletion.
pub const BLANK_CHAR: char = '%';

/// Textual name of the UNKNOWN symbol.
const UNKNOWN_NAME: &str = "unk";

/// Error returned when a symbol name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol name: {0:?}")]
pub struct SymbolNameError(pub String);

/// One symbol of the closed channel alphabet.
///
/// Every character maps to exactly one symbol: ASCII letters (after
/// lowercasing) map to themselves, everything else maps to `UNKNOWN`.
/// `BLANK` is never produced from a character; it stands for the empty
/// side of an insertion or deletion.
///
/// The dense `index()` in `0..SYMBOL_COUNT` lets probability tables be
/// plain fixed-size arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// Any character outside `a`..=`z`.
    pub const UNKNOWN: Symbol = Symbol(LETTER_COUNT as u8);
    /// The empty side of an insertion or deletion.
    pub const BLANK: Symbol = Symbol(LETTER_COUNT as u8 + 1);

    /// Map a character to its symbol, lowercasing first.
    #[inline]
    pub fn from_char(c: char) -> Symbol {
        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_lowercase() {
            Symbol(lower as u8 - b'a')
        } else {
            Symbol::UNKNOWN
        }
    }

    /// Map an optional character to a symbol, `None` meaning BLANK.
    #[inline]
    pub fn from_slot(c: Option<char>) -> Symbol {
        c.map_or(Symbol::BLANK, Symbol::from_char)
    }

    /// Dense table index of this symbol.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` for `a`..=`z`.
    pub fn is_letter(self) -> bool {
        (self.0 as usize) < LETTER_COUNT
    }

    /// The letter this symbol stands for, if any.
    pub fn letter(self) -> Option<char> {
        self.is_letter().then(|| LETTERS[self.0 as usize])
    }

    /// Stable textual name: the letter itself, `unk` or `%`.
    pub fn name(self) -> String {
        match self {
            Symbol::UNKNOWN => UNKNOWN_NAME.to_string(),
            Symbol::BLANK => BLANK_CHAR.to_string(),
            s => LETTERS[s.index()].to_string(),
        }
    }

    /// Parse a name produced by [`Symbol::name`].
    pub fn from_name(name: &str) -> Result<Symbol, SymbolNameError> {
        if name == UNKNOWN_NAME {
            return Ok(Symbol::UNKNOWN);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(BLANK_CHAR), None) => Ok(Symbol::BLANK),
            (Some(c), None) if c.is_ascii_lowercase() => Ok(Symbol::from_char(c)),
            _ => Err(SymbolNameError(name.to_string())),
        }
    }

    /// Iterate over every symbol in index order.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..SYMBOL_COUNT as u8).map(Symbol)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
