//! Sentences and documents.
//!
//! A [`Sentence`] is one pattern plus its locale; a [`Document`] pairs a
//! sentence with the intent tag it trains toward. Normalization mutates the
//! sentence in place; everything downstream reads it through the analysis
//! pipeline.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// Sentence-final punctuation directly after a letter, e.g. "bye!" or
/// "bye !".
static TRAILING_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z] ?[.?!¿¡]").expect("valid punctuation pattern"));

static PUNCTUATION_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.?!]").expect("valid punctuation pattern"));

/// One pattern sentence in a given locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Locale tag the sentence is written in.
    pub locale: String,

    /// The sentence text.
    pub content: String,
}

impl Sentence {
    /// Create a new sentence.
    pub fn new<L: Into<String>, C: Into<String>>(locale: L, content: C) -> Self {
        Sentence {
            locale: locale.into(),
            content: content.into(),
        }
    }

    /// Normalize the sentence in place: strip sentence-final punctuation
    /// after letters, break hyphenated words apart and trim surrounding
    /// whitespace.
    pub fn arrange(&mut self) {
        let content = TRAILING_PUNCTUATION
            .replace_all(&self.content, |captures: &regex::Captures| {
                PUNCTUATION_MARKS.replace_all(&captures[0], "").into_owned()
            })
            .into_owned();

        self.content = content.replace('-', " ").trim().to_string();
    }

    /// Stem the sentence through the given analyzer.
    pub fn stems(&self, analyzer: &dyn Analyzer) -> Result<Vec<String>> {
        analyzer.stems(&self.content)
    }

    /// Encode the sentence as a bag-of-words vector over a vocabulary.
    ///
    /// The result has exactly `vocabulary.len()` entries: 1.0 where the
    /// vocabulary stem occurs in the sentence, 0.0 otherwise.
    pub fn words_bag(&self, vocabulary: &[String], analyzer: &dyn Analyzer) -> Result<Vec<f64>> {
        let stems = self.stems(analyzer)?;

        Ok(vocabulary
            .iter()
            .map(|word| if stems.iter().any(|s| s == word) { 1.0 } else { 0.0 })
            .collect())
    }
}

/// One (intent, pattern) pair; immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The normalized pattern sentence.
    pub sentence: Sentence,

    /// The intent tag the sentence belongs to.
    pub tag: String,
}

impl Document {
    /// Create a new document.
    pub fn new<S: Into<String>>(sentence: Sentence, tag: S) -> Self {
        Document {
            sentence,
            tag: tag.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::locale_analyzer;

    fn arranged(content: &str) -> String {
        let mut sentence = Sentence::new("en", content);
        sentence.arrange();
        sentence.content
    }

    #[test]
    fn test_arrange_strips_final_punctuation() {
        assert_eq!(arranged("Hello!"), "Hello");
        assert_eq!(arranged("What's up?"), "What's up");
        assert_eq!(arranged("Tell me a joke."), "Tell me a joke");
    }

    #[test]
    fn test_arrange_breaks_hyphens_and_trims() {
        assert_eq!(arranged("  well-known  "), "well known");
    }

    #[test]
    fn test_arrange_keeps_inner_text() {
        // Digits before punctuation are not letter-adjacent, so "3.5" stays.
        assert_eq!(arranged("rate it 3.5"), "rate it 3.5");
    }

    #[test]
    fn test_words_bag_is_binary_and_sized() {
        let analyzer = locale_analyzer("en", None);
        let sentence = Sentence::new("en", "hi there");
        let vocabulary = vec![
            "bye".to_string(),
            "hi".to_string(),
            "there".to_string(),
        ];

        let bag = sentence.words_bag(&vocabulary, &analyzer).unwrap();
        assert_eq!(bag, vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_document_holds_tag() {
        let document = Document::new(Sentence::new("en", "hello"), "greeting");
        assert_eq!(document.tag, "greeting");
        assert_eq!(document.sentence.content, "hello");
    }
}
