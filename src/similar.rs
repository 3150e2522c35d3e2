//! Groups of languages a classifier tends to confuse with the target language.
//!
//! The similarity table maps composite keys such as `pt_BR` or `nb` to the
//! codes that get mistaken for them. Keys are parsed once into [`VariantKey`]s
//! and grouped by macro-language.

use std::fmt;

/// A parsed similarity-table key: `<macro_lang>[_<variant>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantKey {
    pub macro_lang: String,
    pub variant: Option<String>,
}

impl VariantKey {
    /// Split a key on its first `_`.
    pub fn parse(key: &str) -> Self {
        match key.split_once('_') {
            Some((macro_lang, variant)) => VariantKey {
                macro_lang: macro_lang.to_string(),
                variant: Some(variant.to_string()),
            },
            None => VariantKey {
                macro_lang: key.to_string(),
                variant: None,
            },
        }
    }

    /// The key as a language code, underscore preserved.
    pub fn code(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{}_{}", self.macro_lang, variant),
            None => self.macro_lang.clone(),
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// An ordered, duplicate-free set of mutually confusable language codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityGroup {
    key: VariantKey,
    members: Vec<String>,
}

impl SimilarityGroup {
    fn new(key: VariantKey, listed: &[String]) -> Self {
        let mut members: Vec<String> = Vec::with_capacity(listed.len() + 1);
        for code in listed.iter().cloned().chain(std::iter::once(key.code())) {
            if !members.contains(&code) {
                members.push(code);
            }
        }
        SimilarityGroup { key, members }
    }

    pub fn key(&self) -> &VariantKey {
        &self.key
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, code: &str) -> bool {
        self.members.iter().any(|m| m == code)
    }
}

/// All similarity groups built for one target language.
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    target: String,
    groups: Vec<SimilarityGroup>,
}

impl SimilarityIndex {
    /// Build the groups for `target` from a similarity table in file order.
    ///
    /// Every key whose macro-language equals `target` yields one group made of
    /// the listed codes followed by the key itself. A target with no matching
    /// key gets an empty index, which turns refinement off.
    pub fn build<'a, I>(table: I, target: &str) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let groups = table
            .into_iter()
            .map(|(key, listed)| (VariantKey::parse(key), listed))
            .filter(|(key, _)| key.macro_lang == target)
            .map(|(key, listed)| SimilarityGroup::new(key, listed))
            .collect::<Vec<_>>();

        tracing::debug!(
            "Built {} similarity group(s) for '{}': {:?}",
            groups.len(),
            target,
            groups.iter().map(|g| g.members()).collect::<Vec<_>>()
        );

        SimilarityIndex {
            target: target.to_string(),
            groups,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn groups(&self) -> &[SimilarityGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// First group, in build order, containing `code`.
    pub fn group_of(&self, code: &str) -> Option<&SimilarityGroup> {
        self.groups.iter().find(|g| g.contains(code))
    }

    /// Every code referenced by any group, first-seen order.
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for member in self.groups.iter().flat_map(|g| g.members()) {
            if !codes.contains(member) {
                codes.push(member.clone());
            }
        }
        codes
    }
}
