use crate::language::Language;
use serde::Serialize;
use ts_rs::TS;

/// Two-stage language then level dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Closed,
    LanguageOpen,
    /// Language tentatively chosen; nothing is committed until a level is picked.
    LevelOpen { language: Language },
}

impl PickerState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn menu(&self) -> Option<PickerMenu> {
        match self {
            Self::Closed => None,
            Self::LanguageOpen => Some(PickerMenu::Language),
            Self::LevelOpen { .. } => Some(PickerMenu::Level),
        }
    }

    pub fn pending_language(&self) -> Option<&Language> {
        match self {
            Self::LevelOpen { language } => Some(language),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PickerMenu {
    Language,
    Level,
}
