//! Turns a sentence into the words worth spellchecking.
//!
//! Punctuation is stripped from token edges and tokens without letters are
//! dropped. Outside German, capitalized tokens past the first are treated as
//! proper nouns and discarded, since dictionaries flag names far too often.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // ASCII punctuation anchored at either end of a token.
    static ref EDGE_PUNCT: Regex = Regex::new(r"^[[:punct:]]+|[[:punct:]]+$").unwrap();
}

/// Macro-language whose nouns are always capitalized.
const KEEP_CASE_LANG: &str = "de";

/// Strip leading and trailing punctuation, keeping interior punctuation.
pub fn strip_edge_punct(token: &str) -> String {
    EDGE_PUNCT.replace_all(token.trim(), "").trim().to_string()
}

fn has_alphabetic(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
}

fn starts_lowercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_lowercase)
}

/// Filter `sentence` into spellcheck tokens using `target_lang`'s policy.
pub fn filter_tokens(sentence: &str, target_lang: &str) -> Vec<String> {
    let sentence: String = sentence.trim().nfc().collect();
    let keep_case = target_lang == KEEP_CASE_LANG;

    sentence
        .split(' ')
        .enumerate()
        .filter_map(|(position, raw)| {
            let token = strip_edge_punct(raw);
            if !has_alphabetic(&token) {
                return None;
            }
            if keep_case {
                Some(token)
            } else if position == 0 || starts_lowercase(&token) {
                Some(token.to_lowercase())
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_edge_punct() {
        assert_eq!(strip_edge_punct("\"hello,"), "hello");
        assert_eq!(strip_edge_punct("...end!?"), "end");
        assert_eq!(strip_edge_punct("don't"), "don't");
        assert_eq!(strip_edge_punct("e-mail."), "e-mail");
        assert_eq!(strip_edge_punct("!!!"), "");
    }

    #[test]
    fn test_proper_nouns_dropped() {
        let toks = filter_tokens("Jeg bor i Oslo og liker Bergen.", "nb");
        assert_eq!(toks, vec!["jeg", "bor", "i", "og", "liker"]);
    }

    #[test]
    fn test_first_token_kept_and_lowercased() {
        let toks = filter_tokens("Dette er fint", "nb");
        assert_eq!(toks, vec!["dette", "er", "fint"]);
    }

    #[test]
    fn test_first_position_counts_even_when_dropped() {
        // The leading "123" occupies position 0, so "Hallo" is not first.
        let toks = filter_tokens("123 Hallo verden", "nb");
        assert_eq!(toks, vec!["verden"]);
    }

    #[test]
    fn test_german_keeps_case() {
        let toks = filter_tokens("Der Hund läuft nach Berlin.", "de");
        assert_eq!(toks, vec!["Der", "Hund", "läuft", "nach", "Berlin"]);
    }

    #[test]
    fn test_consecutive_spaces_produce_no_tokens() {
        let toks = filter_tokens("ja  nei", "nn");
        assert_eq!(toks, vec!["ja", "nei"]);
    }

    #[test]
    fn test_no_alphabetic_tokens() {
        assert!(filter_tokens("123 456 !!! --", "nb").is_empty());
        assert!(filter_tokens("", "nb").is_empty());
    }

    #[test]
    fn test_decomposed_input_is_composed() {
        let decomposed = "ka\u{0308}se";
        let toks = filter_tokens(decomposed, "sv");
        assert_eq!(toks, vec!["käse"]);
    }

    #[test]
    fn test_interior_punctuation_preserved() {
        let toks = filter_tokens("dobro jutro, kako si-ti?", "hr");
        assert_eq!(toks, vec!["dobro", "jutro", "kako", "si-ti"]);
    }
}
