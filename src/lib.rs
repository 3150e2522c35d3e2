//! Language identification for closely related languages.
//!
//! A statistical classifier often confuses near-identical languages such as
//! Bokmål and Nynorsk, or Croatian and Serbian. [`FastSpell`] re-ranks those
//! predictions by spellchecking the sentence with each confusable language's
//! Hunspell dictionary.
//!
//! ```no_run
//! use std::path::Path;
//! use fastspell::{Config, FastSpell};
//!
//! let config = Config::load(Path::new("resources/config.json"))?;
//! let fastspell = FastSpell::from_config(&config)?;
//! println!("{}", fastspell.classify("Eg er ikkje heime i dag.")?);
//! # Ok::<(), fastspell::FastSpellError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod similar;
pub mod tokenize;

#[cfg(feature = "python")]
mod python;

pub use classifier::{LanguageClassifier, WhatlangClassifier};
pub use config::{Config, Mode, SimilarTable};
pub use dictionary::{
    DictionaryLoader, DictionaryRegistry, HunspellChecker, SpellChecker, guarded_check,
};
pub use engine::{FastSpell, Refinement, THRESHOLD, UNKNOWN};
pub use error::{FastSpellError, Result};
pub use similar::{SimilarityGroup, SimilarityIndex, VariantKey};
pub use tokenize::filter_tokens;
