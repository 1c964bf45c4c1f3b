//! Analyzer trait and the pipeline analyzer.
//!
//! An analyzer owns the full path from raw text to finished tokens. The
//! [`PipelineAnalyzer`] combines a tokenizer with an ordered filter chain;
//! [`locale_analyzer`] assembles the chain used for intent patterns:
//! whitespace tokenization, lowercasing, threshold-gated stop-word removal
//! and Snowball stemming.
//!
//! # Examples
//!
//! ```
//! use lorikeet::analysis::analyzer::{Analyzer, locale_analyzer};
//!
//! let analyzer = locale_analyzer("en", None);
//! let stems = analyzer.stems("Greetings friend").unwrap();
//! assert_eq!(stems, vec!["greet", "friend"]);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Requires `Send + Sync` so an analyzer can be shared across threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the given text and collect the token texts.
    fn stems(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        // Apply filters in sequence
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Build the pattern-analysis pipeline for a locale.
///
/// When `stop_words` is `None`, the bundled default list for the locale is
/// used. Sentences of four tokens or fewer skip stop-word removal entirely;
/// locales without stemming support analyze to an empty stream.
pub fn locale_analyzer(tag: &str, stop_words: Option<HashSet<String>>) -> PipelineAnalyzer {
    let stop_filter = match stop_words {
        Some(words) => StopFilter::with_stop_words(words),
        None => StopFilter::default(),
    };

    PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
        .add_filter(Arc::new(LowercaseFilter::new()))
        .add_filter(Arc::new(stop_filter))
        .add_filter(Arc::new(StemFilter::for_locale(tag)))
        .with_name(format!("locale_{tag}"))
}
