//! Training corpus assembly.
//!
//! A [`CorpusContext`] gathers everything one training run needs as plain
//! owned data: the dataset intents for a locale, the registered module
//! intents, and the stop-word list. It is created by the caller, handed to
//! the [`builder::CorpusBuilder`], and dropped when the run finishes; there
//! is no ambient registry.

pub mod builder;
pub mod dataset;
pub mod intent;
pub mod sentence;

use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::modules::{self, Module};

pub use builder::{Corpus, CorpusBuilder};
pub use intent::Intent;
pub use sentence::{Document, Sentence};

/// Everything a single training run reads: dataset intents, registered
/// module intents and the stop-word list for one locale.
#[derive(Clone, Debug)]
pub struct CorpusContext {
    locale: String,
    intents: Vec<Intent>,
    modules: Vec<Module>,
    stop_words: Option<HashSet<String>>,
}

impl CorpusContext {
    /// Create an empty context for a locale.
    pub fn new<S: Into<String>>(locale: S) -> Self {
        CorpusContext {
            locale: locale.into(),
            intents: Vec::new(),
            modules: Vec::new(),
            stop_words: None,
        }
    }

    /// Load a context from a data directory laid out as
    /// `<root>/locales/<locale>/{intents.json,stopwords.txt}`, with the
    /// built-in modules registered for the locale.
    pub fn from_data_dir(root: &Path, locale: &str) -> Result<Self> {
        let intents = dataset::load_intents(root, locale)?;
        let stop_words = dataset::load_stop_words(root, locale)?;

        Ok(CorpusContext::new(locale)
            .with_intents(intents)
            .with_modules(modules::builtin_modules(locale))
            .with_stop_words(stop_words))
    }

    /// Add dataset intents.
    pub fn with_intents(mut self, intents: Vec<Intent>) -> Self {
        self.intents.extend(intents);
        self
    }

    /// Register module intents.
    pub fn with_modules(mut self, modules: Vec<Module>) -> Self {
        self.modules.extend(modules);
        self
    }

    /// Supply an explicit stop-word list (the bundled default is used
    /// otherwise).
    pub fn with_stop_words(mut self, stop_words: HashSet<String>) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// The locale this context was built for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The stop-word list, if one was supplied.
    pub fn stop_words(&self) -> Option<&HashSet<String>> {
        self.stop_words.as_ref()
    }

    /// Dataset intents followed by module intents, in registration order.
    ///
    /// Plain concatenation; no precedence rule beyond the ordering.
    pub fn merged_intents(&self) -> Vec<Intent> {
        let mut merged = self.intents.clone();
        merged.extend(self.modules.iter().map(Module::to_intent));
        merged
    }
}
