//! Demo reading content.
//!
//! Pages are immutable and keyed by page number. Each proficiency tier has its
//! own table; which one is read is a pure function of the selected level.

mod tables;

use crate::language::Level;
use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

pub use tables::StaticContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ContentTier {
    /// Single-word translations for beginners.
    WordLevel,
    /// Whole-sentence translations from B1 upward.
    SentenceLevel,
}

impl ContentTier {
    pub fn for_level(level: Option<Level>) -> Self {
        match level {
            None | Some(Level::A1) | Some(Level::A2) => ContentTier::WordLevel,
            Some(_) => ContentTier::SentenceLevel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableUnit {
    pub source_text: String,
    pub translation_key: Option<String>,
    pub revealed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Translatable(TranslatableUnit),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPage {
    pub number: u32,
    pub paragraphs: Vec<Vec<Segment>>,
}

impl ContentPage {
    pub fn translatable_units(&self) -> impl Iterator<Item = &TranslatableUnit> {
        self.paragraphs.iter().flatten().filter_map(|segment| match segment {
            Segment::Translatable(unit) => Some(unit),
            Segment::Plain(_) => None,
        })
    }

    pub fn revealed_units(&self) -> impl Iterator<Item = &TranslatableUnit> {
        self.translatable_units().filter(|unit| unit.revealed)
    }
}

pub type ContentLibrary = BTreeMap<u32, ContentPage>;

/// Source of the two static content tables.
pub trait ContentProvider {
    fn content(&self, tier: ContentTier) -> &ContentLibrary;

    fn page(&self, tier: ContentTier, number: u32) -> Option<&ContentPage> {
        self.content(tier).get(&number)
    }
}
