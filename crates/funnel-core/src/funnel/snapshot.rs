//! Serializable view of the funnel for hosts that render it.

use super::state::{
    Funnel, GateStep, InterstitialStage, PickerMenu, RevealPhase, SequencerState, Submission,
};
use crate::content::ContentTier;
use crate::language::LanguageSelection;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct GateView {
    pub armed: bool,
    pub visible: bool,
    pub step: GateStep,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FunnelSnapshot {
    pub page_number: u32,
    pub page_number_text: String,
    pub total_pages: u32,
    pub click_count: u32,
    pub interstitial: Option<InterstitialStage>,
    pub interstitial_hiding: bool,
    pub words_read: usize,
    pub tally_just_updated: bool,
    pub revealed_letters: String,
    pub alphabet_stage: Option<u8>,
    pub selection: LanguageSelection,
    pub native_language: String,
    pub picker: Option<PickerMenu>,
    pub pending_language: Option<String>,
    pub gate: GateView,
    pub reveal_phase: RevealPhase,
    pub word_counts_active: bool,
    pub scroll_locked: bool,
    pub content_tier: ContentTier,
}

impl Funnel {
    pub fn snapshot(&self) -> FunnelSnapshot {
        let sequencer = self.engagement.sequencer();
        let (submitting, error) = match self.gate.submission() {
            Submission::Idle => (false, None),
            Submission::Submitting => (true, None),
            Submission::Failed(message) => (false, Some(message.clone())),
        };
        FunnelSnapshot {
            page_number: self.cursor.page(),
            page_number_text: self.cursor.text().to_string(),
            total_pages: self.cursor.total_pages(),
            click_count: self.engagement.click_count(),
            interstitial: sequencer.stage(),
            interstitial_hiding: matches!(sequencer, SequencerState::Hiding(_)),
            words_read: self.tally.total,
            tally_just_updated: self.tally.just_updated,
            revealed_letters: self.alphabet.letters(),
            alphabet_stage: self.alphabet.stage(),
            selection: self.selection.clone(),
            native_language: self.native_language.clone(),
            picker: self.picker.menu(),
            pending_language: self.picker.pending_language().map(|lang| lang.code.clone()),
            gate: GateView {
                armed: self.gate.is_armed(),
                visible: self.gate.is_visible(),
                step: self.gate.step(),
                submitting,
                error,
            },
            reveal_phase: self.reveal,
            word_counts_active: self.word_counts_active,
            scroll_locked: self.scroll_lock.is_engaged(),
            content_tier: self.content_tier(),
        }
    }
}
