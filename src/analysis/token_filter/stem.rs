//! Stemming token filter backed by Snowball stemmers.
//!
//! Stemming collapses inflected forms onto a shared root so that "greet",
//! "greets" and "greeting" land on the same vocabulary entry. The algorithm
//! is selected by locale tag; a locale without a Snowball algorithm degrades
//! to an empty stem list for the sentence (logged, not surfaced).

use rust_stemmers::Algorithm;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{LorikeetError, Result};

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// A [`Stemmer`] backed by the Snowball algorithm for a locale.
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
    locale: &'static str,
}

impl SnowballStemmer {
    /// Create a Snowball stemmer for the given locale tag.
    ///
    /// Fails with a stemming error when no Snowball algorithm exists for the
    /// locale.
    pub fn for_locale(tag: &str) -> Result<Self> {
        let (algorithm, locale) = match tag {
            "en" => (Algorithm::English, "en"),
            _ => {
                return Err(LorikeetError::stemming(format!(
                    "no stemming algorithm for locale '{tag}'"
                )));
            }
        };

        Ok(SnowballStemmer {
            inner: rust_stemmers::Stemmer::create(algorithm),
            locale,
        })
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }

    fn name(&self) -> &'static str {
        self.locale
    }
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("locale", &self.locale)
            .finish()
    }
}

/// Filter that applies stemming to tokens.
///
/// When the filter was built for a locale without stemming support, it
/// swallows the whole stream and emits nothing, matching the degraded
/// behavior of the original pipeline.
pub struct StemFilter {
    stemmer: Option<Box<dyn Stemmer>>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("available", &self.stemmer.is_some())
            .finish()
    }
}

impl StemFilter {
    /// Create a stem filter for a locale tag.
    ///
    /// An unsupported locale is logged once here and the resulting filter
    /// produces empty streams.
    pub fn for_locale(tag: &str) -> Self {
        let stemmer = match SnowballStemmer::for_locale(tag) {
            Ok(stemmer) => Some(Box::new(stemmer) as Box<dyn Stemmer>),
            Err(e) => {
                log::warn!("stemming disabled: {e}");
                None
            }
        };
        StemFilter { stemmer }
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Box<dyn Stemmer>) -> Self {
        StemFilter {
            stemmer: Some(stemmer),
        }
    }

    /// Whether a stemming algorithm is available.
    pub fn is_available(&self) -> bool {
        self.stemmer.is_some()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let Some(stemmer) = &self.stemmer else {
            return Ok(Box::new(std::iter::empty::<Token>()));
        };

        let filtered: Vec<Token> = tokens
            .map(|token| {
                let stemmed = stemmer.stem(&token.text);
                token.with_text(stemmed)
            })
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
