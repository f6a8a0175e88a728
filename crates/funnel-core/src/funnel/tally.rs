//! Cumulative "words read" statistic.
//!
//! The tally is derived, never stored authoritatively: it is recomputed from
//! the content tables whenever the page or reveal state settles.

use crate::content::{ContentProvider, ContentTier, TranslatableUnit};
use crate::text_utils::word_count;
use crate::translation::Translator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordTally {
    pub total: usize,
    /// Set for one flash animation after a milestone recompute.
    pub just_updated: bool,
}

impl WordTally {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Sum the words of every revealed unit on pages `1..=upto_page`.
pub fn recompute(
    content: &dyn ContentProvider,
    tier: ContentTier,
    translator: &dyn Translator,
    language: &str,
    upto_page: u32,
) -> usize {
    content
        .content(tier)
        .range(1..=upto_page.max(1))
        .filter(|(number, _)| **number <= upto_page)
        .flat_map(|(_, page)| page.revealed_units())
        .map(|unit| unit_word_count(unit, translator, language))
        .sum()
}

fn unit_word_count(unit: &TranslatableUnit, translator: &dyn Translator, language: &str) -> usize {
    let text = unit
        .translation_key
        .as_deref()
        .and_then(|key| translator.lookup(language, key))
        .unwrap_or_else(|| unit.source_text.clone());
    word_count(&text)
}
