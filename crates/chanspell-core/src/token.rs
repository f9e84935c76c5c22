// Token and sentence types shared by the tokenizer and the checker

/// Marker used as the left neighbor of the first token in a sentence.
pub const SENTENCE_START: &str = "<s>";

/// Marker used as the right neighbor of the last token in a sentence.
pub const SENTENCE_END: &str = "</s>";

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Word token (letters, digits and inner apostrophes).
    Word,
    /// Punctuation token (one character).
    Punctuation,
    /// Anything else that is not whitespace.
    Unknown,
}

/// A text token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The type of this token.
    pub token_type: TokenType,
    /// The text content of this token.
    pub text: String,
    /// Character offset of this token within the input line.
    pub pos: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(token_type: TokenType, text: impl Into<String>, pos: usize) -> Self {
        Self {
            token_type,
            text: text.into(),
            pos,
        }
    }
}

/// Left and right neighbors of `tokens[index]`, with sentence markers
/// substituted at the edges.
pub fn neighbors<S: AsRef<str>>(tokens: &[S], index: usize) -> (&str, &str) {
    let prev = if index > 0 {
        tokens[index - 1].as_ref()
    } else {
        SENTENCE_START
    };
    let next = tokens
        .get(index + 1)
        .map_or(SENTENCE_END, |t| t.as_ref());
    (prev, next)
}
