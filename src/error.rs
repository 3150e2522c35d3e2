//! Error types for language refinement.
//!
//! Everything that can fail at startup (configuration, dictionaries) or while
//! classifying a sentence is represented by [`FastSpellError`].

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for fastspell operations.
#[derive(Error, Debug)]
pub enum FastSpellError {
    /// Invalid mode, malformed config file or mapping table.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The `.dic`/`.aff` pair for a language does not exist.
    #[error("No dictionary for '{code}' (expected {stem}.dic and {stem}.aff in {})", .dir.display())]
    MissingDictionary {
        code: String,
        stem: String,
        dir: PathBuf,
    },

    /// The dictionary files exist but could not be turned into a checker.
    #[error("Failed building dictionary for '{code}': {reason}")]
    DictionaryLoad { code: String, reason: String },

    /// A single spellcheck call failed. Recovered during scoring.
    #[error("Spellcheck fault: {0}")]
    SpellcheckFault(String),

    /// The language classifier could not produce a label.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// The dictionary registry and similarity index disagree.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type alias for operations that may fail with FastSpellError.
pub type Result<T> = std::result::Result<T, FastSpellError>;

impl FastSpellError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        FastSpellError::Configuration(msg.into())
    }

    /// Create a new classifier error.
    pub fn classifier<S: Into<String>>(msg: S) -> Self {
        FastSpellError::Classifier(msg.into())
    }

    /// Create a new spellcheck fault.
    pub fn spellcheck_fault<S: Into<String>>(msg: S) -> Self {
        FastSpellError::SpellcheckFault(msg.into())
    }
}
