//! Shared utilities.

pub mod levenshtein;

pub use levenshtein::{fuzzy_contains, levenshtein_distance};
