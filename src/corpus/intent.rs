//! Intent records.

use serde::{Deserialize, Serialize};

/// A labeled category of user request, defined by example patterns and
/// candidate responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// The label this intent trains toward.
    pub tag: String,

    /// Example sentences belonging to this intent.
    pub patterns: Vec<String>,

    /// Candidate responses for this intent.
    pub responses: Vec<String>,

    /// Optional conversational context gate.
    #[serde(default)]
    pub context: String,
}

impl Intent {
    /// Create a new intent from a tag, patterns and responses.
    pub fn new<S, P, R>(tag: S, patterns: Vec<P>, responses: Vec<R>) -> Self
    where
        S: Into<String>,
        P: Into<String>,
        R: Into<String>,
    {
        Intent {
            tag: tag.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            responses: responses.into_iter().map(Into::into).collect(),
            context: String::new(),
        }
    }
}
