//! Spellcheck-based refinement of classifier predictions.
//!
//! [`FastSpell::classify`] asks the classifier for a label, and when that label
//! belongs to a similarity group of the target language, scores every group
//! member by the share of sentence tokens its dictionary rejects. The mode then
//! decides between the best-scoring candidates.

use std::sync::Arc;

use rayon::prelude::*;

use crate::classifier::{LanguageClassifier, WhatlangClassifier, strip_label};
use crate::config::{Config, Mode};
use crate::dictionary::{DictionaryLoader, DictionaryRegistry, SpellChecker};
use crate::error::{FastSpellError, Result};
use crate::similar::SimilarityIndex;
use crate::tokenize::filter_tokens;

/// Candidates with a higher error rate are never chosen.
pub const THRESHOLD: f64 = 0.5;

/// Verdict for sentences that cannot be attributed.
pub const UNKNOWN: &str = "unk";

/// Rewrite classifier labels that name a macro-language or a deprecated code.
pub fn normalize_prediction(prediction: &str, target: &str) -> String {
    let mut prediction = prediction.to_string();
    if prediction == "no" && target != "no" {
        prediction = "nb".to_string();
    }
    if prediction == "sh" {
        prediction = "sr".to_string();
    }
    if prediction == "he" && target == "iw" {
        prediction = "iw".to_string();
    }
    prediction
}

/// Error rate of `tokens` under one dictionary.
///
/// A token whose check fails counts as misspelled. With no correct token at
/// all (including no tokens) the rate is 1.0.
pub fn error_rate(checker: &dyn SpellChecker, tokens: &[String]) -> f64 {
    let correct = tokens
        .iter()
        .filter(|token| match checker.check(token) {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!("Counting '{}' as incorrect: {}", token, e);
                false
            }
        })
        .count();

    if correct == 0 {
        1.0
    } else {
        1.0 - correct as f64 / tokens.len() as f64
    }
}

/// Admitted candidates and their error rates, in group order.
pub type ScoreMap = Vec<(String, f64)>;

/// Pick the final label from the admitted scores.
pub fn verdict(scores: &[(String, f64)], prediction: &str, target: &str, mode: Mode) -> String {
    let Some(best) = scores.iter().map(|(_, rate)| *rate).reduce(f64::min) else {
        return match mode {
            Mode::Aggressive => prediction.to_string(),
            Mode::Conservative => UNKNOWN.to_string(),
        };
    };

    let best_keys: Vec<&str> = scores
        .iter()
        .filter(|(_, rate)| *rate == best)
        .map(|(code, _)| code.as_str())
        .collect();

    if let [only] = best_keys.as_slice() {
        return only.to_string();
    }

    match mode {
        Mode::Aggressive => {
            if best_keys.contains(&target) {
                target.to_string()
            } else if best_keys.contains(&prediction) {
                prediction.to_string()
            } else {
                best_keys[0].to_string()
            }
        }
        Mode::Conservative => {
            if best_keys.contains(&target) && best == 0.0 {
                target.to_string()
            } else {
                UNKNOWN.to_string()
            }
        }
    }
}

/// Everything [`FastSpell::explain`] learned about one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    /// Classifier label with its prefix removed.
    pub raw_prediction: String,
    /// Label after quirk normalization.
    pub prediction: String,
    /// Tokens that were spellchecked; empty when refinement did not apply.
    pub tokens: Vec<String>,
    pub scores: ScoreMap,
    /// Whether spellcheck refinement ran.
    pub refined: bool,
    pub language: String,
}

/// Language identification refined by spellcheck.
pub struct FastSpell {
    lang: String,
    mode: Mode,
    groups: SimilarityIndex,
    registry: Arc<DictionaryRegistry>,
    classifier: Box<dyn LanguageClassifier>,
}

impl FastSpell {
    pub fn new(
        lang: impl Into<String>,
        mode: Mode,
        groups: SimilarityIndex,
        registry: Arc<DictionaryRegistry>,
        classifier: Box<dyn LanguageClassifier>,
    ) -> Result<Self> {
        let lang = lang.into();
        if groups.target() != lang {
            return Err(FastSpellError::configuration(format!(
                "similarity groups were built for '{}', not '{}'",
                groups.target(),
                lang
            )));
        }
        if let Some(missing) = groups.codes().into_iter().find(|c| !registry.contains(c)) {
            return Err(FastSpellError::InvariantViolation(format!(
                "no spellchecker registered for '{missing}'"
            )));
        }
        Ok(FastSpell {
            lang,
            mode,
            groups,
            registry,
            classifier,
        })
    }

    /// Build everything from a config: tables, dictionaries and classifier.
    pub fn from_config(config: &Config) -> Result<Self> {
        let similar = config.load_similar_langs()?;
        let groups = SimilarityIndex::build(similar.iter(), &config.lang);
        if groups.is_empty() {
            tracing::warn!(
                "No similar languages configured for '{}'; predictions pass through unchanged",
                config.lang
            );
        }

        let loader = DictionaryLoader::new(&config.dict_path, config.load_hunspell_codes()?);
        let registry = loader.load_all(&groups.codes())?;

        let classifier = match &config.classifier_languages_path {
            Some(path) => WhatlangClassifier::from_language_file(path)?,
            None => WhatlangClassifier::new(),
        };

        tracing::info!("FastSpell ready: lang={} mode={}", config.lang, config.mode);
        Self::new(
            config.lang.clone(),
            config.mode,
            groups,
            Arc::new(registry),
            Box::new(classifier),
        )
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn groups(&self) -> &SimilarityIndex {
        &self.groups
    }

    /// Language of `sentence`, or `"unk"`.
    pub fn classify(&self, sentence: &str) -> Result<String> {
        self.explain(sentence).map(|r| r.language)
    }

    /// Classify independent sentences in parallel, keeping input order.
    pub fn classify_batch<S: AsRef<str> + Sync>(&self, sentences: &[S]) -> Vec<Result<String>> {
        sentences
            .par_iter()
            .map(|s| self.classify(s.as_ref()))
            .collect()
    }

    /// Classify `sentence` and report the intermediate results.
    pub fn explain(&self, sentence: &str) -> Result<Refinement> {
        let sentence = sentence.replace('\n', " ");
        let sentence = sentence.trim();

        let label = self.classifier.predict(&sentence.to_lowercase())?;
        let raw_prediction = strip_label(&label).to_string();
        let prediction = normalize_prediction(&raw_prediction, &self.lang);

        if self.groups.is_empty() || !self.registry.contains(&prediction) {
            return Ok(Refinement {
                raw_prediction,
                language: prediction.clone(),
                prediction,
                tokens: Vec::new(),
                scores: Vec::new(),
                refined: false,
            });
        }

        let group = self.groups.group_of(&prediction).ok_or_else(|| {
            FastSpellError::InvariantViolation(format!(
                "'{prediction}' has a spellchecker but belongs to no similarity group"
            ))
        })?;

        let tokens = filter_tokens(sentence, &self.lang);
        let mut scores: ScoreMap = Vec::with_capacity(group.members().len());
        for code in group.members() {
            let checker = self.registry.get(code).ok_or_else(|| {
                FastSpellError::InvariantViolation(format!("no spellchecker registered for '{code}'"))
            })?;
            let rate = error_rate(checker.as_ref(), &tokens);
            tracing::debug!("{}: error rate {:.3} over {} token(s)", code, rate, tokens.len());
            if rate <= THRESHOLD {
                scores.push((code.clone(), rate));
            }
        }

        let language = verdict(&scores, &prediction, &self.lang, self.mode);
        tracing::debug!(
            "'{}' -> {} (classifier said {}, scores {:?})",
            sentence,
            language,
            raw_prediction,
            scores
        );

        Ok(Refinement {
            raw_prediction,
            prediction,
            tokens,
            scores,
            refined: true,
            language,
        })
    }
}
