//! End-to-end refinement over on-disk configs and Hunspell dictionaries.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fastspell::{
    Config, DictionaryLoader, FastSpell, FastSpellError, Mode, Result, SimilarityIndex, UNKNOWN,
};
use tempfile::TempDir;

fn write_dict(dir: &Path, stem: &str, words: &[&str]) {
    fs::write(dir.join(format!("{stem}.aff")), "SET UTF-8\n").unwrap();
    let mut dic = format!("{}\n", words.len());
    for word in words {
        dic.push_str(word);
        dic.push('\n');
    }
    fs::write(dir.join(format!("{stem}.dic")), dic).unwrap();
}

/// Lays out config.json, both tables and a dictionary directory.
fn setup(lang: &str, mode: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::write(
        root.join("config.json"),
        format!(
            r#"{{"lang": "{lang}", "mode": "{mode}",
                "similarLangsPath": "similar.json",
                "hunspellCodesPath": "codes.json",
                "dictPath": "dicts"}}"#
        ),
    )
    .unwrap();
    fs::write(
        root.join("similar.json"),
        r#"{"nb": ["nn", "da"], "hr": ["sr", "bs"]}"#,
    )
    .unwrap();
    fs::write(
        root.join("codes.json"),
        r#"{"nb": "nb_NO", "nn": "nn_NO", "da": "da_DK", "hr": "hr_HR", "sr": "sr_Latn", "bs": "bs_BA"}"#,
    )
    .unwrap();

    let dicts = root.join("dicts");
    fs::create_dir(&dicts).unwrap();
    write_dict(&dicts, "nb_NO", &["jeg", "er", "ikke", "hjemme", "i", "dag"]);
    write_dict(&dicts, "nn_NO", &["eg", "er", "ikkje", "heime", "i", "dag"]);
    write_dict(&dicts, "da_DK", &["jeg", "er", "ikke", "hjemme", "i", "dag"]);

    let config = root.join("config.json");
    (dir, config)
}

fn engine_with_label(config_path: &Path, label: &'static str) -> Result<FastSpell> {
    let config = Config::load(config_path)?;
    let similar = config.load_similar_langs()?;
    let groups = SimilarityIndex::build(similar.iter(), &config.lang);
    let loader = DictionaryLoader::new(&config.dict_path, config.load_hunspell_codes()?);
    let registry = loader.load_all(&groups.codes())?;
    let classifier = move |_: &str| -> Result<String> { Ok(format!("__label__{label}")) };
    FastSpell::new(
        config.lang.clone(),
        config.mode,
        groups,
        Arc::new(registry),
        Box::new(classifier),
    )
}

#[test]
fn test_nynorsk_detected_from_bokmal_prediction() -> Result<()> {
    let (_dir, config) = setup("nb", "aggr");
    let fs = engine_with_label(&config, "no")?;

    let r = fs.explain("Eg er ikkje heime i dag.")?;
    assert_eq!(r.prediction, "nb");
    assert_eq!(r.tokens, vec!["eg", "er", "ikkje", "heime", "i", "dag"]);
    assert_eq!(r.language, "nn");
    Ok(())
}

#[test]
fn test_aggressive_prefers_target_on_tie() -> Result<()> {
    let (_dir, config) = setup("nb", "aggr");
    let fs = engine_with_label(&config, "da")?;
    // nb and da dictionaries are identical here.
    assert_eq!(fs.classify("Jeg er ikke hjemme i dag")?, "nb");
    Ok(())
}

#[test]
fn test_conservative_unknown_without_perfect_target() -> Result<()> {
    let (_dir, config) = setup("nb", "cons");
    let fs = engine_with_label(&config, "da")?;
    // "fjorden" is unknown everywhere, so nb and da tie above zero.
    assert_eq!(fs.classify("Jeg er ikke hjemme fjorden")?, UNKNOWN);
    assert_eq!(fs.classify("Jeg er ikke hjemme")?, "nb");
    Ok(())
}

#[test]
fn test_group_dictionary_missing_is_fatal() {
    let (dir, config) = setup("hr", "aggr");
    // Only Norwegian and Danish dictionaries exist.
    let err = engine_with_label(&config, "hr").err().unwrap();
    assert!(matches!(err, FastSpellError::MissingDictionary { .. }));
    assert!(err.to_string().contains(&dir.path().join("dicts").display().to_string()));

    let config = Config::load(&config).unwrap();
    assert!(matches!(
        FastSpell::from_config(&config),
        Err(FastSpellError::MissingDictionary { .. })
    ));
}

#[test]
fn test_invalid_mode_is_fatal() {
    let (_dir, config) = setup("nb", "sometimes");
    assert!(matches!(
        Config::load(&config),
        Err(FastSpellError::Configuration(_))
    ));
}

#[test]
fn test_target_without_groups_trusts_classifier() -> Result<()> {
    let (_dir, config) = setup("en", "cons");
    let config = Config::load(&config)?;
    let fs = FastSpell::from_config(&config)?;
    assert!(fs.groups().is_empty());
    assert_eq!(fs.mode(), Mode::Conservative);

    let label = fs.classify("This is a longer English sentence to ensure correct detection.")?;
    assert_eq!(label, "en");
    Ok(())
}

#[test]
fn test_from_config_loads_group_dictionaries() -> Result<()> {
    let (_dir, config) = setup("nb", "aggr");
    let config = Config::load(&config)?;
    let fs = FastSpell::from_config(&config)?;
    assert_eq!(fs.lang(), "nb");
    assert_eq!(fs.groups().codes(), vec!["nn", "da", "nb"]);
    Ok(())
}
