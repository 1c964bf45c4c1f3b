//! On-disk corpus resources.
//!
//! A data directory holds one subdirectory per locale:
//!
//! ```text
//! <root>/locales/<locale>/intents.json    dataset intents
//! <root>/locales/<locale>/stopwords.txt   newline-delimited stop words
//! ```
//!
//! A missing or malformed resource fails the training run before any matrix
//! work begins.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::intent::Intent;
use crate::error::{LorikeetError, Result};

/// Path to a locale's intents file.
pub fn intents_path(root: &Path, locale: &str) -> PathBuf {
    root.join("locales").join(locale).join("intents.json")
}

/// Path to a locale's stop-word list.
pub fn stop_words_path(root: &Path, locale: &str) -> PathBuf {
    root.join("locales").join(locale).join("stopwords.txt")
}

/// Default location of a locale's trained model snapshot.
pub fn snapshot_path(root: &Path, locale: &str) -> PathBuf {
    root.join("locales").join(locale).join("training.json")
}

/// Load the dataset intents for a locale.
pub fn load_intents(root: &Path, locale: &str) -> Result<Vec<Intent>> {
    let path = intents_path(root, locale);
    let raw = fs::read_to_string(&path).map_err(|e| {
        LorikeetError::corpus(format!("cannot read intents from {}: {e}", path.display()))
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        LorikeetError::corpus(format!("malformed intents in {}: {e}", path.display()))
    })
}

/// Load the newline-delimited stop-word list for a locale.
pub fn load_stop_words(root: &Path, locale: &str) -> Result<HashSet<String>> {
    let path = stop_words_path(root, locale);
    let raw = fs::read_to_string(&path).map_err(|e| {
        LorikeetError::corpus(format!(
            "cannot read stop words from {}: {e}",
            path.display()
        ))
    })?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
