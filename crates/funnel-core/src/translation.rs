//! Translation lookups with fallback to the source key.

use anyhow::{Context, Result};
use std::collections::HashMap;

pub trait Translator {
    /// Translation for `key` in `language`, if one exists and is non-empty.
    fn lookup(&self, language: &str, key: &str) -> Option<String>;

    /// Never fails: missing entries resolve to the key itself.
    fn translate(&self, language: &str, key: &str) -> String {
        self.lookup(language, key)
            .unwrap_or_else(|| key.to_string())
    }
}

/// In-memory `language -> key -> text` dictionary.
#[derive(Debug, Clone, Default)]
pub struct DictionaryTranslator {
    entries: HashMap<String, HashMap<String, String>>,
}

impl DictionaryTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: &str, key: &str, text: &str) {
        self.entries
            .entry(language.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
    }

    pub fn with_entry(mut self, language: &str, key: &str, text: &str) -> Self {
        self.insert(language, key, text);
        self
    }

    /// Parse a TOML document of the form `[fr]\nhouse = "maison"`.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let entries: HashMap<String, HashMap<String, String>> =
            toml::from_str(contents).context("parsing translation dictionary")?;
        Ok(Self { entries })
    }

    /// Small built-in dictionary used by the console host.
    pub fn sample() -> Self {
        let mut dict = Self::new();
        for (language, pairs) in SAMPLE_ENTRIES {
            for (key, text) in *pairs {
                dict.insert(language, key, text);
            }
        }
        dict
    }
}

impl Translator for DictionaryTranslator {
    fn lookup(&self, language: &str, key: &str) -> Option<String> {
        self.entries
            .get(language)
            .and_then(|table| table.get(key))
            .filter(|text| !text.trim().is_empty())
            .cloned()
    }
}

const SAMPLE_ENTRIES: &[(&str, &[(&str, &str)])] = &[
    (
        "fr",
        &[
            ("house", "maison"),
            ("street", "rue"),
            ("morning", "matin"),
            ("baker", "boulanger"),
            ("birds", "oiseaux"),
            ("market", "marché"),
            ("brother", "frère"),
            ("evening", "soir"),
            ("family", "famille"),
            ("stories", "histoires"),
            ("dog", "petit chien"),
            ("wind", "vent"),
            (
                "s.the_old_house_stood_at_the_end_of_the_street",
                "La vieille maison se dressait au bout de la rue.",
            ),
        ],
    ),
    (
        "es",
        &[
            ("house", "casa"),
            ("street", "calle"),
            ("morning", "mañana"),
            ("baker", "panadero"),
            ("birds", "pájaros"),
            ("market", "mercado"),
            ("brother", "hermano"),
            ("evening", "tarde"),
            ("family", "familia"),
            ("stories", "cuentos"),
            ("dog", "perrito"),
            ("wind", "viento"),
        ],
    ),
    (
        "de",
        &[
            ("house", "Haus"),
            ("street", "Straße"),
            ("morning", "Morgen"),
            ("baker", "Bäcker"),
            ("birds", "Vögel"),
            ("dog", "kleiner Hund"),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entries_fall_back_to_key() {
        let dict = DictionaryTranslator::new().with_entry("fr", "house", "maison");
        assert_eq!(dict.translate("fr", "house"), "maison");
        assert_eq!(dict.translate("fr", "street"), "street");
        assert_eq!(dict.translate("de", "house"), "house");
    }

    #[test]
    fn blank_entries_are_treated_as_missing() {
        let dict = DictionaryTranslator::new().with_entry("fr", "house", "  ");
        assert_eq!(dict.lookup("fr", "house"), None);
        assert_eq!(dict.translate("fr", "house"), "house");
    }

    #[test]
    fn parses_toml_dictionaries() {
        let dict = DictionaryTranslator::from_toml_str("[fr]\nhouse = \"maison\"\n[es]\nhouse = \"casa\"\n")
            .expect("dictionary parses");
        assert_eq!(dict.translate("es", "house"), "casa");
    }
}
