//! Target languages, proficiency levels and the visitor's selection.

use crate::content::ContentTier;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub flag: String,
}

impl Language {
    fn new(code: &str, name: &str, flag: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            flag: flag.to_string(),
        }
    }
}

/// Languages offered by the picker, in display order.
pub fn supported_languages() -> Vec<Language> {
    vec![
        Language::new("es", "Spanish", "🇪🇸"),
        Language::new("fr", "French", "🇫🇷"),
        Language::new("de", "German", "🇩🇪"),
        Language::new("it", "Italian", "🇮🇹"),
        Language::new("pt", "Portuguese", "🇵🇹"),
        Language::new("nl", "Dutch", "🇳🇱"),
        Language::new("ja", "Japanese", "🇯🇵"),
        Language::new("en", "English", "🇬🇧"),
    ]
}

/// Look up a language by code or (case-insensitive) display name.
pub fn find_language(query: &str) -> Option<Language> {
    let query = query.trim();
    supported_languages()
        .into_iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(query) || lang.name.eq_ignore_ascii_case(query))
}

/// CEFR proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::A1,
        Level::A2,
        Level::B1,
        Level::B2,
        Level::C1,
        Level::C2,
    ];

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(text))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LanguageSelection {
    pub language: Language,
    pub level: Option<Level>,
    pub has_user_chosen_language: bool,
    pub has_user_chosen_level: bool,
}

impl LanguageSelection {
    /// Non-user-chosen selection on the fallback language.
    pub fn fallback(code: &str) -> Self {
        let language = find_language(code)
            .or_else(|| supported_languages().into_iter().next())
            .unwrap_or_else(|| Language::new(code, code, ""));
        Self {
            language,
            level: None,
            has_user_chosen_language: false,
            has_user_chosen_level: false,
        }
    }

    /// Both language and level were explicitly picked.
    pub fn is_complete(&self) -> bool {
        self.has_user_chosen_language && self.has_user_chosen_level && self.level.is_some()
    }

    pub fn tier(&self) -> ContentTier {
        ContentTier::for_level(self.level)
    }
}
