use super::super::state::{Funnel, InterstitialStage, SequencerState};
use super::Effect;
use crate::timers::TimerKind;
use crate::tracking::ConversionEvent;
use tracing::{debug, info};

impl Funnel {
    /// Side-effect batch for click counts 1, 2 and 3.
    pub(super) fn reach_milestone(&mut self, stage: InterstitialStage, effects: &mut Vec<Effect>) {
        let milestone = self.engagement.click_count;
        let added = self.alphabet.reveal_through(milestone, &mut self.rng);
        info!(
            milestone,
            ?stage,
            added = added.len(),
            letters = self.alphabet.len(),
            "Engagement milestone reached"
        );

        if self.word_counts_active {
            self.refresh_tally();
            self.tally.just_updated = true;
            self.schedule(TimerKind::TallyFlash, effects);
        }

        self.engagement.sequencer = SequencerState::Showing(stage);
        self.schedule(TimerKind::InterstitialDwell, effects);
        effects.push(Effect::Track(ConversionEvent::MilestoneReached { milestone }));
    }

    /// Visible stage to its exit animation; the pending dwell is superseded.
    pub(super) fn begin_hiding(&mut self, stage: InterstitialStage, effects: &mut Vec<Effect>) {
        self.cancel(TimerKind::InterstitialDwell, effects);
        self.engagement.sequencer = SequencerState::Hiding(stage);
        self.schedule(TimerKind::InterstitialHide, effects);
    }

    pub(super) fn on_interstitial_dwell_elapsed(&mut self, effects: &mut Vec<Effect>) {
        if let SequencerState::Showing(stage) = self.engagement.sequencer {
            debug!(?stage, "Interstitial dwell elapsed");
            self.begin_hiding(stage, effects);
        }
    }

    pub(super) fn on_interstitial_hidden(&mut self, effects: &mut Vec<Effect>) {
        let SequencerState::Hiding(stage) = self.engagement.sequencer else {
            return;
        };
        self.engagement.sequencer = SequencerState::Idle;
        self.refresh_tally();
        debug!(?stage, total = self.tally.total, "Interstitial dismissed");

        if stage.is_final() && self.gate.arm() {
            info!(
                delay_ms = self.config.gate_show_delay_ms,
                "Signup gate armed after final interstitial"
            );
            self.schedule(TimerKind::GateShow, effects);
        }
    }
}
