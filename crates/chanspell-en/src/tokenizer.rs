// Word and sentence segmentation for raw text lines
//
// Deliberately small: words are runs of letters and digits (with inner
// apostrophes), every punctuation character is its own token, and a
// sentence ends after `.`, `?` or `!`.

use chanspell_core::character::{CharType, get_char_type, is_sentence_terminator};
use chanspell_core::token::{Token, TokenType};

/// Splits text into sentences of word tokens.
pub trait Tokenizer {
    /// Segment `text` into sentences, each an ordered list of tokens.
    fn sentences(&self, text: &str) -> Vec<Vec<String>>;
}

/// Whitespace/punctuation tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    /// Split `text` into typed tokens. Whitespace is dropped.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match get_char_type(c) {
                CharType::Whitespace => i += 1,
                CharType::Letter | CharType::Digit => {
                    let start = i;
                    i += 1;
                    while i < chars.len() {
                        match get_char_type(chars[i]) {
                            CharType::Letter | CharType::Digit => i += 1,
                            // "don't": an apostrophe between two word characters
                            CharType::Punctuation
                                if chars[i] == '\''
                                    && chars.get(i + 1).is_some_and(|&n| is_word_char(n)) =>
                            {
                                i += 1
                            }
                            _ => break,
                        }
                    }
                    let word: String = chars[start..i].iter().collect();
                    tokens.push(Token::new(TokenType::Word, word, start));
                }
                CharType::Punctuation => {
                    tokens.push(Token::new(TokenType::Punctuation, c.to_string(), i));
                    i += 1;
                }
                CharType::Unknown => {
                    tokens.push(Token::new(TokenType::Unknown, c.to_string(), i));
                    i += 1;
                }
            }
        }
        tokens
    }
}

fn is_word_char(c: char) -> bool {
    matches!(get_char_type(c), CharType::Letter | CharType::Digit)
}

impl Tokenizer for SimpleTokenizer {
    fn sentences(&self, text: &str) -> Vec<Vec<String>> {
        let mut sentences = Vec::new();
        let mut current = Vec::new();
        for token in self.tokenize(text) {
            let ends_sentence = token.token_type == TokenType::Punctuation
                && token.text.chars().all(is_sentence_terminator);
            current.push(token.text);
            if ends_sentence {
                sentences.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            sentences.push(current);
        }
        sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn splits_words_and_punctuation() {
        let tokens = SimpleTokenizer.tokenize("Hello, wrld!");
        assert_eq!(texts(&tokens), vec!["Hello", ",", "wrld", "!"]);
        assert_eq!(tokens[0].token_type, TokenType::Word);
        assert_eq!(tokens[1].token_type, TokenType::Punctuation);
        assert_eq!(tokens[2].pos, 7);
    }

    #[test]
    fn keeps_inner_apostrophes() {
        let tokens = SimpleTokenizer.tokenize("don't 'quote'");
        assert_eq!(texts(&tokens), vec!["don't", "'", "quote", "'"]);
    }

    #[test]
    fn unknown_characters_are_single_tokens() {
        let tokens = SimpleTokenizer.tokenize("a#b");
        assert_eq!(texts(&tokens), vec!["a", "#", "b"]);
        assert_eq!(tokens[1].token_type, TokenType::Unknown);
    }

    #[test]
    fn sentences_end_at_terminators() {
        let sentences = SimpleTokenizer.sentences("I saw it. Did you? yes");
        assert_eq!(
            sentences,
            vec![
                vec!["I", "saw", "it", "."],
                vec!["Did", "you", "?"],
                vec!["yes"],
            ]
        );
    }

    #[test]
    fn empty_text_has_no_sentences() {
        assert!(SimpleTokenizer.sentences("   ").is_empty());
    }
}
