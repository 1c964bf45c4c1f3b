//! Text analysis pipeline for intent patterns.
//!
//! Raw pattern text flows through a tokenizer and a chain of token filters
//! before it reaches the vocabulary and bag-of-words stages:
//!
//! ```text
//! Raw Text → Tokenizer → Lowercase → Stop Words → Stemming → Stems
//! ```
//!
//! The pipeline for a locale is assembled by
//! [`analyzer::locale_analyzer`], which wires the whitespace tokenizer to
//! the lowercase, stop-word and stemming filters configured for that
//! locale.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer, locale_analyzer};
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;
