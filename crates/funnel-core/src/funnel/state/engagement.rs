use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InterstitialStage {
    First,
    Second,
    Third,
}

impl InterstitialStage {
    /// Milestones 1, 2 and 3 each open one stage.
    pub fn for_milestone(click_count: u32) -> Option<Self> {
        match click_count {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            _ => None,
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, Self::Third)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    #[default]
    Idle,
    Showing(InterstitialStage),
    /// Exit animation; resolves to `Idle` after the hide delay.
    Hiding(InterstitialStage),
}

impl SequencerState {
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn stage(self) -> Option<InterstitialStage> {
        match self {
            Self::Idle => None,
            Self::Showing(stage) | Self::Hiding(stage) => Some(stage),
        }
    }
}

pub const TERMINAL_MILESTONE: u32 = 3;

#[derive(Debug, Clone, Default)]
pub struct EngagementState {
    pub(crate) click_count: u32,
    pub(crate) sequencer: SequencerState,
}

impl EngagementState {
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn sequencer(&self) -> SequencerState {
        self.sequencer
    }

    /// Count a successful forward move, returning the stage it opens, if any.
    pub(crate) fn record_forward(&mut self) -> Option<InterstitialStage> {
        self.click_count = self.click_count.saturating_add(1);
        InterstitialStage::for_milestone(self.click_count)
    }

    pub(crate) fn reset(&mut self) {
        self.click_count = 0;
        self.sequencer = SequencerState::Idle;
    }
}
