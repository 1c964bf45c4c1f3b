//! Integration tests for the full corpus-to-snapshot training pipeline.

use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;

use lorikeet::corpus::intent::Intent;
use lorikeet::corpus::{CorpusBuilder, CorpusContext};
use lorikeet::network::Network;
use lorikeet::network::trainer::Trainer;
use lorikeet::training::{self, TrainingConfig};

fn toy_context() -> CorpusContext {
    CorpusContext::new("en").with_intents(vec![
        Intent::new("greeting", vec!["hello", "hi there"], vec!["Hello!"]),
        Intent::new("farewell", vec!["bye", "see you"], vec!["Bye!"]),
    ])
}

#[test]
fn test_corpus_scenario_two_intents_four_patterns() {
    let context = toy_context();
    let builder = CorpusBuilder::new(&context);
    let (corpus, inputs, outputs) = builder.build().unwrap();

    assert_eq!(corpus.documents.len(), 4);
    assert_eq!(corpus.classes, vec!["farewell", "greeting"]);
    assert_eq!(
        corpus.vocabulary,
        vec!["bye", "hello", "hi", "see", "there", "you"]
    );

    assert_eq!(inputs.rows(), 4);
    assert_eq!(inputs.columns(), corpus.vocabulary.len());
    assert_eq!(outputs.rows(), 4);
    assert_eq!(outputs.columns(), 2);

    // Every output row is one-hot for its intent.
    for i in 0..outputs.rows() {
        let row = outputs.row(i);
        assert_eq!(row.iter().sum::<f64>(), 1.0);
        assert!(row.iter().all(|&x| x == 0.0 || x == 1.0));
    }

    // Documents keep intent order: two greetings, then two farewells.
    assert_eq!(corpus.documents[0].tag, "greeting");
    assert_eq!(corpus.documents[3].tag, "farewell");
    assert_eq!(outputs.get(0, 1), 1.0);
    assert_eq!(outputs.get(3, 0), 1.0);
}

#[test]
fn test_fixed_seed_training_converges() {
    let context = toy_context();
    let builder = CorpusBuilder::new(&context);
    let (_, inputs, outputs) = builder.build().unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let mut network = Network::with_rng("en", 0.1, inputs, outputs, &[8], &mut rng);

    let absolute_error = |network: &mut Network| {
        network.feed_forward().unwrap();
        let diff = network.output().sub(network.predicted()).unwrap();
        diff.map(f64::abs).mean()
    };

    let before = absolute_error(&mut network);
    Trainer::new(200).train(&mut network).unwrap();
    let after = absolute_error(&mut network);

    assert!(
        after < before,
        "expected training to reduce error: before={before}, after={after}"
    );
    assert_eq!(network.errors().len(), 20);
}

#[test]
fn test_short_iteration_budget_still_samples_errors() {
    let context = toy_context();
    let builder = CorpusBuilder::new(&context);
    let (_, inputs, outputs) = builder.build().unwrap();

    let mut network = Network::new("en", 0.1, inputs, outputs, &[8]);
    Trainer::new(10).train(&mut network).unwrap();

    assert!(!network.errors().is_empty());
}

#[test]
fn test_pipeline_from_data_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("locales").join("en");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("intents.json"),
        r#"[
            {"tag": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hello!"], "context": ""},
            {"tag": "farewell", "patterns": ["bye", "see you"], "responses": ["Bye!"], "context": ""}
        ]"#,
    )
    .unwrap();
    fs::write(dir.join("stopwords.txt"), "the\nand\nof\n").unwrap();

    let context = CorpusContext::from_data_dir(tmp.path(), "en").unwrap();
    let config = TrainingConfig {
        hidden_width: 8,
        ..TrainingConfig::default()
    };
    let snapshot = dir.join("training.json");

    let network = training::train_and_save(&context, &config, &snapshot).unwrap();

    assert_eq!(network.locale(), "en");
    assert!(snapshot.exists());

    // The snapshot is a structural dump of the whole network record.
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&snapshot).unwrap()).unwrap();
    for field in ["layers", "weights", "biases", "output", "errors"] {
        assert!(value[field].is_array(), "missing snapshot field {field}");
    }
    assert_eq!(value["rate"], 0.1);
    assert_eq!(value["locale"], "en");
}

#[test]
fn test_module_patterns_extend_corpus() {
    let context = toy_context().with_modules(lorikeet::modules::builtin_modules("en"));
    let builder = CorpusBuilder::new(&context);
    let (corpus, inputs, outputs) = builder.build().unwrap();

    // 4 toy documents plus one per registered module pattern.
    assert!(corpus.documents.len() > 4);
    assert_eq!(inputs.rows(), corpus.documents.len());
    assert_eq!(outputs.columns(), corpus.classes.len());
    assert!(corpus.classes.iter().any(|tag| tag == "jokes"));
}
