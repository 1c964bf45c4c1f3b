//! Stop filter implementation.
//!
//! Removes common words (stop words) that carry no signal for intent
//! classification. Short patterns are left untouched: when a sentence has
//! four tokens or fewer, every word is likely to matter ("see you", "tell me
//! a joke"), so the filter only kicks in above that threshold.
//!
//! # Examples
//!
//! ```
//! use lorikeet::analysis::token_filter::Filter;
//! use lorikeet::analysis::token_filter::stop::StopFilter;
//! use lorikeet::analysis::token::Token;
//!
//! let filter = StopFilter::new(); // Uses default English stop words
//! let tokens = vec![
//!     Token::new("what", 0),
//!     Token::new("is", 1),
//!     Token::new("the", 2),
//!     Token::new("capital", 3),
//!     Token::new("of", 4),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! // "is", "the" and "of" are removed as stop words
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "what");
//! assert_eq!(result[1].text, "capital");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Sentences with at most this many tokens bypass stop-word removal.
pub const MIN_TOKENS_FOR_STOP_WORDS: usize = 4;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from the token stream.
///
/// The stream is passed through unchanged when it holds
/// [`MIN_TOKENS_FOR_STOP_WORDS`] tokens or fewer.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default English stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorikeet::analysis::token_filter::stop::StopFilter;
    ///
    /// let filter = StopFilter::new();
    /// assert!(filter.is_stop_word("the"));
    /// assert!(!filter.is_stop_word("hello"));
    /// ```
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorikeet::analysis::token_filter::stop::StopFilter;
    ///
    /// let filter = StopFilter::from_words(vec!["foo", "bar", "baz"]);
    /// assert_eq!(filter.len(), 3);
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let tokens: Vec<Token> = tokens.collect();

        // Every word counts in a short pattern.
        if tokens.len() <= MIN_TOKENS_FOR_STOP_WORDS {
            return Ok(Box::new(tokens.into_iter()));
        }

        let filtered: Vec<Token> = tokens
            .into_iter()
            .filter(|token| !self.is_stop_word(&token.text))
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn tokens_from(words: &[&str]) -> TokenStream {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        Box::new(tokens.into_iter())
    }

    #[test]
    fn test_stop_filter_removes_words() {
        let filter = StopFilter::from_words(vec!["the", "and", "or"]);
        let stream = tokens_from(&["hello", "the", "world", "and", "test"]);

        let result: Vec<Token> = filter.filter(stream).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "test");
    }

    #[test]
    fn test_short_sentences_bypass_filtering() {
        let filter = StopFilter::from_words(vec!["see", "you"]);
        let stream = tokens_from(&["see", "you"]);

        let result: Vec<Token> = filter.filter(stream).unwrap().collect();

        // Two tokens is below the threshold, so nothing is removed.
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_threshold_boundary() {
        let filter = StopFilter::from_words(vec!["a"]);

        let result: Vec<Token> = filter
            .filter(tokens_from(&["a", "b", "c", "d"]))
            .unwrap()
            .collect();
        assert_eq!(result.len(), 4);

        let result: Vec<Token> = filter
            .filter(tokens_from(&["a", "b", "c", "d", "e"]))
            .unwrap()
            .collect();
        assert_eq!(result.len(), 4);
        assert_eq!(result[0].text, "b");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::new().name(), "stop");
    }
}
