//! One-shot training pipeline.
//!
//! Wires the corpus builder, network construction, trainer and snapshot
//! persistence into a single atomic job: if any stage fails, nothing is
//! persisted.

use std::path::Path;

use crate::corpus::{CorpusBuilder, CorpusContext};
use crate::error::Result;
use crate::network::Network;
use crate::network::trainer::Trainer;

/// Parameters for one training run.
#[derive(Clone, Debug)]
pub struct TrainingConfig {
    /// Locale to train for.
    pub locale: String,
    /// Learning rate.
    pub rate: f64,
    /// Width of the single hidden layer.
    pub hidden_width: usize,
    /// Iteration budget.
    pub iterations: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            locale: "en".to_string(),
            rate: 0.1,
            hidden_width: 50,
            iterations: Trainer::DEFAULT_ITERATIONS,
        }
    }
}

/// Build the corpus, create the network and train it.
pub fn train_network(context: &CorpusContext, config: &TrainingConfig) -> Result<Network> {
    let builder = CorpusBuilder::new(context);
    let (corpus, inputs, outputs) = builder.build()?;

    log::info!(
        "organized {} documents, {} vocabulary stems, {} classes",
        corpus.documents.len(),
        corpus.vocabulary.len(),
        corpus.classes.len()
    );

    let mut network = Network::new(
        &config.locale,
        config.rate,
        inputs,
        outputs,
        &[config.hidden_width],
    );

    Trainer::new(config.iterations).train(&mut network)?;

    Ok(network)
}

/// Train and persist the snapshot to `path`.
///
/// The snapshot is only written once training has fully succeeded, so a
/// failed run never leaves a partially-trained model behind.
pub fn train_and_save(
    context: &CorpusContext,
    config: &TrainingConfig,
    path: &Path,
) -> Result<Network> {
    let network = train_network(context, config)?;
    network.save_to_path(path)?;

    log::info!("saved trained network to {}", path.display());

    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::intent::Intent;

    fn toy_context() -> CorpusContext {
        CorpusContext::new("en").with_intents(vec![
            Intent::new("greeting", vec!["hello", "hi there"], vec!["Hello!"]),
            Intent::new("farewell", vec!["bye", "see you"], vec!["Bye!"]),
        ])
    }

    fn toy_config() -> TrainingConfig {
        TrainingConfig {
            hidden_width: 8,
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_train_network_end_to_end() {
        let network = train_network(&toy_context(), &toy_config()).unwrap();

        assert_eq!(network.locale(), "en");
        assert_eq!(network.errors().len(), 20);
        // 4 documents plus the synthetic bias row.
        assert_eq!(network.predicted().rows(), 5);
        assert_eq!(network.predicted().columns(), 2);
    }

    #[test]
    fn test_train_and_save_writes_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("training.json");

        train_and_save(&toy_context(), &toy_config(), &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["locale"], "en");
    }

    #[test]
    fn test_empty_context_fails_before_training() {
        let context = CorpusContext::new("en");
        let result = train_network(&context, &toy_config());
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_run_persists_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("training.json");

        let context = CorpusContext::new("en");
        assert!(train_and_save(&context, &toy_config(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.locale, "en");
        assert_eq!(config.rate, 0.1);
        assert_eq!(config.hidden_width, 50);
        assert_eq!(config.iterations, 200);
    }
}
