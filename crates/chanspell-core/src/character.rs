// Character classification and case utilities

// ---------------------------------------------------------------------------
// Punctuation literals
// ---------------------------------------------------------------------------

/// Tokens made of exactly one of these characters are passed through the
/// checker untouched.
pub const PUNCTUATION_LITERALS: &[char] = &[
    '.', '?', ':', ';', '"', '\'', '!', '\n', ',', '/', '\\',
];

/// Returns `true` if the token is a single punctuation literal.
pub fn is_punctuation_literal(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PUNCTUATION_LITERALS.contains(&c),
        _ => false,
    }
}

/// Characters that terminate a sentence in running text.
pub fn is_sentence_terminator(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

// ---------------------------------------------------------------------------
// Character type classification
// ---------------------------------------------------------------------------

/// Character type classification used by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharType {
    Unknown,
    Letter,
    Digit,
    Whitespace,
    Punctuation,
}

/// Returns the character type for a given character.
///
/// Apostrophes inside words are handled by the tokenizer, not here: `'` is
/// always classified as punctuation.
pub fn get_char_type(c: char) -> CharType {
    if c.is_alphabetic() {
        return CharType::Letter;
    }
    if c.is_whitespace() {
        return CharType::Whitespace;
    }
    if c.is_ascii_digit() {
        return CharType::Digit;
    }
    if PUNCTUATION_LITERALS.contains(&c) || matches!(c, '-' | '(' | ')' | '[' | ']' | '&') {
        return CharType::Punctuation;
    }
    CharType::Unknown
}

// ---------------------------------------------------------------------------
// Case conversion
// ---------------------------------------------------------------------------

/// Lowercase a word the way every model lookup expects it.
pub fn lowercase_word(word: &str) -> String {
    word.to_lowercase()
}

/// Lowercase a word into a char vector (random access for DP and edits).
pub fn lowercase_chars(word: &str) -> Vec<char> {
    word.chars().flat_map(char::to_lowercase).collect()
}
