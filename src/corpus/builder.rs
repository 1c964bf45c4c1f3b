//! Corpus builder: documents, vocabulary, classes and training matrices.
//!
//! The builder walks the merged intent list once, normalizing every pattern
//! into a [`Document`], collecting the vocabulary of stems and the set of
//! class tags, then encodes the documents as a bag-of-words input matrix and
//! a one-hot output matrix.

use std::collections::BTreeSet;

use crate::analysis::analyzer::{PipelineAnalyzer, locale_analyzer};
use crate::corpus::CorpusContext;
use crate::corpus::sentence::{Document, Sentence};
use crate::error::{LorikeetError, Result};
use crate::matrix::Matrix;

/// The organized corpus for one training run.
#[derive(Clone, Debug)]
pub struct Corpus {
    /// Lexicographically sorted, deduplicated stems of all patterns.
    pub vocabulary: Vec<String>,

    /// Lexicographically sorted, deduplicated intent tags.
    pub classes: Vec<String>,

    /// One document per (intent, pattern) pair, in intent order.
    pub documents: Vec<Document>,
}

/// Builds the training corpus for one context.
pub struct CorpusBuilder<'a> {
    context: &'a CorpusContext,
    analyzer: PipelineAnalyzer,
}

impl<'a> CorpusBuilder<'a> {
    /// Create a builder for a corpus context.
    pub fn new(context: &'a CorpusContext) -> Self {
        let analyzer = locale_analyzer(context.locale(), context.stop_words().cloned());
        CorpusBuilder { context, analyzer }
    }

    /// The analyzer this builder vectorizes with.
    pub fn analyzer(&self) -> &PipelineAnalyzer {
        &self.analyzer
    }

    /// Assemble documents, vocabulary and classes from the merged intents.
    pub fn organize(&self) -> Result<Corpus> {
        let mut vocabulary = BTreeSet::new();
        let mut classes = BTreeSet::new();
        let mut documents = Vec::new();

        for intent in self.context.merged_intents() {
            for pattern in &intent.patterns {
                let mut sentence = Sentence::new(self.context.locale(), pattern.clone());
                sentence.arrange();

                for stem in sentence.stems(&self.analyzer)? {
                    vocabulary.insert(stem);
                }

                documents.push(Document::new(sentence, intent.tag.clone()));
            }

            classes.insert(intent.tag.clone());
        }

        Ok(Corpus {
            vocabulary: vocabulary.into_iter().collect(),
            classes: classes.into_iter().collect(),
            documents,
        })
    }

    /// Encode an organized corpus as training matrices.
    ///
    /// The input matrix holds one bag-of-words row per document
    /// (`documents × vocabulary`); the output matrix holds the matching
    /// one-hot class rows (`documents × classes`).
    pub fn matrices(&self, corpus: &Corpus) -> Result<(Matrix, Matrix)> {
        if corpus.documents.is_empty() {
            return Err(LorikeetError::corpus(
                "corpus produced no documents; nothing to train on",
            ));
        }

        let mut inputs = Vec::with_capacity(corpus.documents.len());
        let mut outputs = Vec::with_capacity(corpus.documents.len());

        for document in &corpus.documents {
            inputs.push(document.sentence.words_bag(&corpus.vocabulary, &self.analyzer)?);

            let mut output_row = vec![0.0; corpus.classes.len()];
            let class = corpus
                .classes
                .iter()
                .position(|tag| tag == &document.tag)
                .unwrap_or(0);
            output_row[class] = 1.0;
            outputs.push(output_row);
        }

        Ok((Matrix::from_rows(inputs)?, Matrix::from_rows(outputs)?))
    }

    /// Organize and encode in one step.
    pub fn build(&self) -> Result<(Corpus, Matrix, Matrix)> {
        let corpus = self.organize()?;
        let (inputs, outputs) = self.matrices(&corpus)?;
        Ok((corpus, inputs, outputs))
    }
}
