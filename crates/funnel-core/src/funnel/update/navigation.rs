use super::super::state::{Direction, Funnel, SequencerState, SubmitOutcome};
use super::{Effect, HostEffect};
use tracing::{debug, info};

impl Funnel {
    /// Single dispatcher for "next": the sequencer gets first claim on the click.
    pub(super) fn handle_next_clicked(&mut self, effects: &mut Vec<Effect>) {
        if self.gate.blocks_funnel() {
            debug!("Next ignored while signup gate is armed");
            return;
        }
        match self.engagement.sequencer {
            SequencerState::Showing(stage) => {
                debug!(?stage, "Next click dismisses interstitial");
                self.begin_hiding(stage, effects);
            }
            SequencerState::Hiding(stage) => {
                debug!(?stage, "Next click absorbed while interstitial hides");
            }
            SequencerState::Idle => {
                if self.cursor.advance(Direction::Forward).is_none() {
                    debug!(page = self.cursor.page(), "Already on last page");
                    return;
                }
                info!(page = self.cursor.page(), "Navigated to page");
                let stage = self.engagement.record_forward();
                self.after_page_moved(effects);
                if let Some(stage) = stage {
                    self.reach_milestone(stage, effects);
                }
            }
        }
    }

    pub(super) fn handle_previous_clicked(&mut self, effects: &mut Vec<Effect>) {
        if self.navigation_locked() {
            debug!("Previous ignored while navigation is locked");
            return;
        }
        if self.cursor.advance(Direction::Backward).is_some() {
            info!(page = self.cursor.page(), "Navigated to page");
            self.after_page_moved(effects);
        }
    }

    pub(super) fn handle_page_input_submitted(&mut self, effects: &mut Vec<Effect>) {
        if self.navigation_locked() {
            self.cursor.revert_text();
            return;
        }
        match self.cursor.submit() {
            SubmitOutcome::Moved(position) => {
                info!(page = position.page_number, "Jumped to page");
                self.after_page_moved(effects);
            }
            SubmitOutcome::Unchanged => {}
            SubmitOutcome::Reverted => {
                debug!(page = self.cursor.page(), "Reverted invalid page input");
            }
        }
    }

    fn navigation_locked(&self) -> bool {
        self.gate.blocks_funnel() || self.engagement.sequencer.is_active()
    }

    /// Page state has settled; refresh what depends on it.
    pub(super) fn after_page_moved(&mut self, effects: &mut Vec<Effect>) {
        if !self.word_counts_active {
            return;
        }
        self.refresh_tally();
        effects.push(Effect::Host(self.badge_reveal()));
    }

    pub(super) fn refresh_tally(&mut self) {
        if !self.word_counts_active {
            return;
        }
        self.tally.total = self.words_read_through(self.cursor.page());
        debug!(total = self.tally.total, page = self.cursor.page(), "Recomputed word tally");
    }

    pub(super) fn badge_reveal(&self) -> HostEffect {
        let page = self.cursor.page();
        let stagger = self.config.badge_stagger_ms;
        let count = self
            .content
            .page(self.content_tier(), page)
            .map(|content_page| content_page.revealed_units().count())
            .unwrap_or(0);
        HostEffect::RevealBadges {
            page,
            delays_ms: (0..count as u64).map(|idx| idx * stagger).collect(),
        }
    }
}
