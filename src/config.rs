//! Startup configuration: `config.json` plus the tables it points to.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{FastSpellError, Result};

/// Tie-break and acceptance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Prefer a definite label even when ambiguous.
    Aggressive,
    /// Prefer `unk` unless the target is unambiguously confirmed.
    Conservative,
}

impl FromStr for Mode {
    type Err = FastSpellError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aggr" => Ok(Mode::Aggressive),
            "cons" => Ok(Mode::Conservative),
            other => Err(FastSpellError::configuration(format!(
                "unknown mode '{other}', use 'aggr' for aggressive or 'cons' for conservative"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Aggressive => "aggr",
            Mode::Conservative => "cons",
        })
    }
}

fn default_dict_path() -> PathBuf {
    PathBuf::from("fastspell_dictionaries")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    lang: String,
    mode: String,
    similar_langs_path: PathBuf,
    hunspell_codes_path: PathBuf,
    #[serde(default = "default_dict_path")]
    dict_path: PathBuf,
    #[serde(default)]
    classifier_languages_path: Option<PathBuf>,
}

/// Validated configuration with paths resolved against the config file.
#[derive(Debug, Clone)]
pub struct Config {
    pub lang: String,
    pub mode: Mode,
    pub similar_langs_path: PathBuf,
    pub hunspell_codes_path: PathBuf,
    pub dict_path: PathBuf,
    pub classifier_languages_path: Option<PathBuf>,
}

impl Config {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FastSpellError::configuration(format!("failed to read {}: {}", path.display(), e))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json(&content, base)
    }

    /// Parse config JSON; relative paths are joined onto `base`.
    pub fn from_json(content: &str, base: &Path) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(content)
            .map_err(|e| FastSpellError::configuration(format!("malformed config: {e}")))?;

        if raw.lang.trim().is_empty() {
            return Err(FastSpellError::configuration("'lang' must not be empty"));
        }
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };

        Ok(Config {
            lang: raw.lang,
            mode: raw.mode.parse()?,
            similar_langs_path: resolve(raw.similar_langs_path),
            hunspell_codes_path: resolve(raw.hunspell_codes_path),
            dict_path: resolve(raw.dict_path),
            classifier_languages_path: raw.classifier_languages_path.map(resolve),
        })
    }

    pub fn load_similar_langs(&self) -> Result<SimilarTable> {
        SimilarTable::load(&self.similar_langs_path)
    }

    pub fn load_hunspell_codes(&self) -> Result<HashMap<String, String>> {
        load_hunspell_codes(&self.hunspell_codes_path)
    }
}

/// Similarity table entries in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimilarTable {
    entries: Vec<(String, Vec<String>)>,
}

impl SimilarTable {
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_table(path)?;
        Self::parse(&content).map_err(|e| {
            FastSpellError::configuration(format!("{} in {}", e, path.display()))
        })
    }

    /// Parse `{"<key>": ["<code>", ...], ...}` keeping key order.
    pub fn from_json(content: &str) -> Result<Self> {
        Self::parse(content).map_err(FastSpellError::configuration)
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)
            .map_err(|e| format!("malformed similarity table: {e}"))?;

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let codes: Vec<String> = serde_json::from_value(value)
                .map_err(|e| format!("entry '{key}' is not a list of codes: {e}"))?;
            entries.push((key, codes));
        }
        Ok(SimilarTable { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Language code to dictionary file stem, e.g. `"nb" -> "nb_NO"`.
pub fn load_hunspell_codes(path: &Path) -> Result<HashMap<String, String>> {
    let content = read_table(path)?;
    serde_json::from_str(&content).map_err(|e| {
        FastSpellError::configuration(format!("malformed hunspell codes in {}: {}", path.display(), e))
    })
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        FastSpellError::configuration(format!("failed to read {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("aggr".parse::<Mode>().unwrap(), Mode::Aggressive);
        assert_eq!("cons".parse::<Mode>().unwrap(), Mode::Conservative);
        assert!(matches!(
            "strict".parse::<Mode>(),
            Err(FastSpellError::Configuration(_))
        ));
        assert_eq!(Mode::Conservative.to_string(), "cons");
    }

    #[test]
    fn test_config_paths_resolved() {
        let json = r#"{
            "lang": "nb",
            "mode": "aggr",
            "similarLangsPath": "similar.json",
            "hunspellCodesPath": "/etc/fastspell/codes.json"
        }"#;
        let config = Config::from_json(json, Path::new("/opt/fs")).unwrap();
        assert_eq!(config.lang, "nb");
        assert_eq!(config.mode, Mode::Aggressive);
        assert_eq!(config.similar_langs_path, PathBuf::from("/opt/fs/similar.json"));
        assert_eq!(
            config.hunspell_codes_path,
            PathBuf::from("/etc/fastspell/codes.json")
        );
        assert_eq!(
            config.dict_path,
            PathBuf::from("/opt/fs/fastspell_dictionaries")
        );
        assert!(config.classifier_languages_path.is_none());
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let json = r#"{"lang": "nb", "mode": "lazy",
            "similarLangsPath": "s.json", "hunspellCodesPath": "h.json"}"#;
        let err = Config::from_json(json, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("lazy"));
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{"lang": "nb", "mode": "cons"}"#;
        assert!(matches!(
            Config::from_json(json, Path::new(".")),
            Err(FastSpellError::Configuration(_))
        ));
    }

    #[test]
    fn test_similar_table_keeps_order() {
        let table = SimilarTable::from_json(
            r#"{"pt_PT": ["pt_BR"], "es": ["gl"], "pt_BR": ["pt_PT", "gl"]}"#,
        )
        .unwrap();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["pt_PT", "es", "pt_BR"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_similar_table_rejects_non_list() {
        assert!(SimilarTable::from_json(r#"{"nb": "nn"}"#).is_err());
        assert!(SimilarTable::from_json(r#"["nb"]"#).is_err());
    }
}
