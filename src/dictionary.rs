//! Hunspell dictionaries, one per language code.
//!
//! A [`DictionaryLoader`] resolves language codes to dictionary file stems via
//! the hunspell-codes table, builds each checker at most once, and freezes the
//! result into a read-only [`DictionaryRegistry`] for the classification path.

use std::collections::HashMap;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rayon::prelude::*;
use zspell::Dictionary;

use crate::error::{FastSpellError, Result};

/// Anything that can judge whether a word is spelled correctly.
pub trait SpellChecker: Send + Sync {
    /// `Err` means the checker itself failed on this word.
    fn check(&self, word: &str) -> Result<bool>;
}

/// A Hunspell dictionary backed by `zspell`.
pub struct HunspellChecker {
    dict: Dictionary,
}

impl HunspellChecker {
    /// Build from the contents of an `.aff` and a `.dic` file.
    pub fn from_strs(aff: &str, dic: &str) -> std::result::Result<Self, String> {
        zspell::builder()
            .config_str(aff)
            .dict_str(dic)
            .build()
            .map(|dict| HunspellChecker { dict })
            .map_err(|e| e.to_string())
    }
}

impl SpellChecker for HunspellChecker {
    fn check(&self, word: &str) -> Result<bool> {
        guarded_check(word, || self.dict.check_word(word))
    }
}

/// Run one lookup, turning a panic inside it into a spellcheck fault.
pub fn guarded_check<F: FnOnce() -> bool>(word: &str, lookup: F) -> Result<bool> {
    panic::catch_unwind(AssertUnwindSafe(lookup))
        .map_err(|_| FastSpellError::spellcheck_fault(format!("checker panicked on '{word}'")))
}

type Slot = Arc<Mutex<Option<Arc<dyn SpellChecker>>>>;

/// Builds checkers on demand and memoizes them per language code.
pub struct DictionaryLoader {
    dict_dir: PathBuf,
    hunspell_codes: HashMap<String, String>,
    // One slot per code; a slot's lock is held while that code is built, so
    // distinct codes build in parallel and each code is built at most once.
    slots: Mutex<HashMap<String, Slot>>,
}

impl DictionaryLoader {
    pub fn new<P: Into<PathBuf>>(dict_dir: P, hunspell_codes: HashMap<String, String>) -> Self {
        DictionaryLoader {
            dict_dir: dict_dir.into(),
            hunspell_codes,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Cached checker for `code`, building it on first use.
    pub fn resolve(&self, code: &str) -> Result<Arc<dyn SpellChecker>> {
        let slot = self.slot(code);
        let mut cached = slot.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(checker) = cached.as_ref() {
            return Ok(Arc::clone(checker));
        }

        let checker = self.build(code)?;
        *cached = Some(Arc::clone(&checker));
        Ok(checker)
    }

    /// Resolve every code in parallel and freeze the result.
    ///
    /// The first failure aborts loading: a registry is never handed out with
    /// some of its dictionaries missing.
    pub fn load_all(&self, codes: &[String]) -> Result<DictionaryRegistry> {
        let checkers = codes
            .par_iter()
            .map(|code| self.resolve(code).map(|checker| (code.clone(), checker)))
            .collect::<Result<HashMap<_, _>>>()?;

        tracing::info!(
            "Dictionary initialization complete: {} language(s) from {}",
            checkers.len(),
            self.dict_dir.display()
        );
        Ok(DictionaryRegistry { checkers })
    }

    fn slot(&self, code: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(|p| p.into_inner());
        Arc::clone(slots.entry(code.to_string()).or_default())
    }

    fn build(&self, code: &str) -> Result<Arc<dyn SpellChecker>> {
        // An unmapped code has no dictionary pair to find.
        let stem = self.hunspell_codes.get(code).ok_or_else(|| {
            tracing::error!("No hunspell code mapped for language '{}'", code);
            FastSpellError::MissingDictionary {
                code: code.to_string(),
                stem: code.to_string(),
                dir: self.dict_dir.clone(),
            }
        })?;

        let aff_path = self.dict_dir.join(format!("{stem}.aff"));
        let dic_path = self.dict_dir.join(format!("{stem}.dic"));
        if !aff_path.exists() || !dic_path.exists() {
            return Err(FastSpellError::MissingDictionary {
                code: code.to_string(),
                stem: stem.clone(),
                dir: self.dict_dir.clone(),
            });
        }

        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|e| FastSpellError::DictionaryLoad {
                code: code.to_string(),
                reason: format!("failed to read {}: {}", path.display(), e),
            })
        };
        let aff_content = read(&aff_path)?;
        let dic_content = read(&dic_path)?;

        let checker = HunspellChecker::from_strs(&aff_content, &dic_content).map_err(|reason| {
            FastSpellError::DictionaryLoad {
                code: code.to_string(),
                reason,
            }
        })?;
        tracing::info!("Loaded dictionary: {} ({})", code, stem);
        Ok(Arc::new(checker))
    }
}

/// Read-only map from language code to its spellchecker.
#[derive(Clone, Default)]
pub struct DictionaryRegistry {
    checkers: HashMap<String, Arc<dyn SpellChecker>>,
}

impl DictionaryRegistry {
    /// Registry over caller-supplied checkers.
    pub fn from_checkers<I>(checkers: I) -> Self
    where
        I: IntoIterator<Item = (String, Arc<dyn SpellChecker>)>,
    {
        DictionaryRegistry {
            checkers: checkers.into_iter().collect(),
        }
    }

    pub fn get(&self, code: &str) -> Option<&Arc<dyn SpellChecker>> {
        self.checkers.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.checkers.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

impl std::fmt::Debug for DictionaryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut codes: Vec<&String> = self.checkers.keys().collect();
        codes.sort();
        f.debug_struct("DictionaryRegistry").field("codes", &codes).finish()
    }
}
