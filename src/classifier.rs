//! The statistical language classifier consulted before spellchecking.
//!
//! Classifiers return fastText-style labels (`__label__nb`); the prefix is
//! stripped by [`strip_label`]. The bundled backend wraps `whatlang`.

use std::fs;
use std::path::Path;

use whatlang::{Detector, Lang};

use crate::error::{FastSpellError, Result};

/// Prefix carried by every classifier label.
pub const LABEL_PREFIX: &str = "__label__";

/// Top-1 language prediction for a normalized sentence.
pub trait LanguageClassifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<String>;
}

impl<F> LanguageClassifier for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn predict(&self, text: &str) -> Result<String> {
        self(text)
    }
}

/// Drop the label prefix if present.
pub fn strip_label(label: &str) -> &str {
    label.strip_prefix(LABEL_PREFIX).unwrap_or(label)
}

// whatlang speaks ISO 639-3; the similarity and hunspell tables use the
// two-letter codes fastText emits.
const ISO_639_3_TO_1: &[(&str, &str)] = &[
    ("afr", "af"),
    ("aka", "ak"),
    ("amh", "am"),
    ("ara", "ar"),
    ("aze", "az"),
    ("bel", "be"),
    ("ben", "bn"),
    ("bul", "bg"),
    ("cat", "ca"),
    ("ces", "cs"),
    ("cmn", "zh"),
    ("dan", "da"),
    ("deu", "de"),
    ("ell", "el"),
    ("eng", "en"),
    ("epo", "eo"),
    ("est", "et"),
    ("fin", "fi"),
    ("fra", "fr"),
    ("guj", "gu"),
    ("heb", "he"),
    ("hin", "hi"),
    ("hrv", "hr"),
    ("hun", "hu"),
    ("hye", "hy"),
    ("ind", "id"),
    ("ita", "it"),
    ("jav", "jv"),
    ("jpn", "ja"),
    ("kan", "kn"),
    ("kat", "ka"),
    ("khm", "km"),
    ("kor", "ko"),
    ("lat", "la"),
    ("lav", "lv"),
    ("lit", "lt"),
    ("mal", "ml"),
    ("mar", "mr"),
    ("mkd", "mk"),
    ("mya", "my"),
    ("nep", "ne"),
    ("nld", "nl"),
    ("nob", "nb"),
    ("ori", "or"),
    ("pan", "pa"),
    ("pes", "fa"),
    ("pol", "pl"),
    ("por", "pt"),
    ("ron", "ro"),
    ("rus", "ru"),
    ("sin", "si"),
    ("slk", "sk"),
    ("slv", "sl"),
    ("sna", "sn"),
    ("spa", "es"),
    ("srp", "sr"),
    ("swe", "sv"),
    ("tam", "ta"),
    ("tel", "te"),
    ("tgl", "tl"),
    ("tha", "th"),
    ("tuk", "tk"),
    ("tur", "tr"),
    ("ukr", "uk"),
    ("urd", "ur"),
    ("uzb", "uz"),
    ("vie", "vi"),
    ("yid", "yi"),
    ("zul", "zu"),
];

/// Two-letter code for a whatlang language, or its ISO 639-3 code.
pub fn lang_code(lang: Lang) -> &'static str {
    let code = lang.code();
    ISO_639_3_TO_1
        .iter()
        .find(|(three, _)| *three == code)
        .map(|(_, two)| *two)
        .unwrap_or(code)
}

/// Trigram classifier backed by `whatlang`.
pub struct WhatlangClassifier {
    detector: Detector,
}

impl WhatlangClassifier {
    pub fn new() -> Self {
        WhatlangClassifier {
            detector: Detector::new(),
        }
    }

    /// Restrict detection to the given languages.
    pub fn with_languages(langs: Vec<Lang>) -> Self {
        WhatlangClassifier {
            detector: Detector::with_allowlist(langs),
        }
    }

    /// Load an allowlist file: one ISO 639-3 code per line, `#` comments.
    pub fn from_language_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FastSpellError::configuration(format!(
                "failed to read classifierLanguagesPath {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut langs = Vec::new();
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let lang = Lang::from_code(line).ok_or_else(|| {
                FastSpellError::configuration(format!(
                    "unknown classifier language '{}' in {}",
                    line,
                    path.display()
                ))
            })?;
            langs.push(lang);
        }
        if langs.is_empty() {
            return Err(FastSpellError::configuration(format!(
                "no classifier languages listed in {}",
                path.display()
            )));
        }
        tracing::info!("Classifier restricted to {} language(s)", langs.len());
        Ok(Self::with_languages(langs))
    }
}

impl Default for WhatlangClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageClassifier for WhatlangClassifier {
    fn predict(&self, text: &str) -> Result<String> {
        let lang = self
            .detector
            .detect_lang(text)
            .ok_or_else(|| FastSpellError::classifier(format!("no language detected for '{text}'")))?;
        Ok(format!("{}{}", LABEL_PREFIX, lang_code(lang)))
    }
}
