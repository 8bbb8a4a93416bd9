use std::fmt;

use crate::models::SignedFormula;

/// A programmer-visible fault: the prover reached a state the data model
/// says cannot occur (an unclassifiable formula, a rule dispatched against
/// the wrong formula kind, a delta-rule unable to mint a fresh constant).
/// This is fatal — it aborts the whole search rather than the current
/// branch, since a branch being open or closed is a normal result and not
/// an error at all.
#[derive(Debug, Clone)]
pub struct MalformedInput {
    pub message: String,
    pub offending: Option<SignedFormula>,
}

impl MalformedInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), offending: None }
    }

    pub fn at(message: impl Into<String>, offending: SignedFormula) -> Self {
        Self { message: message.into(), offending: Some(offending) }
    }
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.offending {
            Some(sf) => write!(f, "malformed input: {} (at {})", self.message, sf.display_string()),
            None => write!(f, "malformed input: {}", self.message),
        }
    }
}

impl std::error::Error for MalformedInput {}
