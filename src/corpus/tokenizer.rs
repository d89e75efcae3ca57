// SPDX-License-Identifier: MIT OR Apache-2.0

//! Regex word tokenizer shared by corpus building and query tokenization

use once_cell::sync::Lazy;
use regex::Regex;

/// Words with internal apostrophes or hyphens, or a single punctuation mark.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:['’\-]\w+)*|[^\w\s]").expect("token regex is valid")
});

/// One token of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub text: &'a str,
    /// Whether the token is followed by whitespace in the source text
    pub has_space: bool,
}

/// Split text into tokens, remembering the spacing after each one.
pub fn tokenize(text: &str) -> Vec<RawToken<'_>> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| RawToken {
            text: m.as_str(),
            has_space: text[m.end()..]
                .chars()
                .next()
                .is_some_and(char::is_whitespace),
        })
        .collect()
}

/// Token strings only, for query parsing.
pub fn tokenize_words(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        let words = tokenize_words("The cat, it's well-fed.");
        assert_eq!(words, vec!["The", "cat", ",", "it's", "well-fed", "."]);
    }

    #[test]
    fn records_trailing_whitespace() {
        let tokens = tokenize("Hello, world");
        assert_eq!(tokens.len(), 3);
        assert!(!tokens[0].has_space);
        assert!(tokens[1].has_space);
        assert!(!tokens[2].has_space);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("   \n\t").is_empty());
    }
}
