use super::super::state::{Funnel, RevealPhase, TERMINAL_MILESTONE};
use super::{Effect, HostEffect};
use crate::timers::TimerKind;
use crate::tracking::ConversionEvent;
use tracing::{debug, info};

impl Funnel {
    /// Visibility is polled; any sample below the threshold restarts the dwell.
    pub(super) fn handle_visibility_sample(&mut self, ratio: f32, effects: &mut Vec<Effect>) {
        let visible = ratio.is_finite() && ratio >= self.config.visibility_threshold;
        match (self.reveal, visible) {
            (RevealPhase::AwaitingVisibility, true) => {
                debug!(ratio, "Widget visible; starting dwell");
                self.reveal = RevealPhase::Dwelling;
                self.schedule(TimerKind::VisibilityDwell, effects);
            }
            (RevealPhase::Dwelling, false) => {
                debug!(ratio, "Widget left viewport; dwell restarted");
                self.cancel(TimerKind::VisibilityDwell, effects);
                self.reveal = RevealPhase::AwaitingVisibility;
            }
            _ => {}
        }
    }

    pub(super) fn handle_scroll_settled(&mut self, effects: &mut Vec<Effect>) {
        self.release_scroll_lock(effects);
    }

    pub(super) fn on_visibility_dwell_elapsed(&mut self, effects: &mut Vec<Effect>) {
        if self.reveal != RevealPhase::Dwelling {
            return;
        }
        info!(page = self.cursor.page(), "Widget dwell complete; calculating word counts");
        self.reveal = RevealPhase::Calculating;
        if self.scroll_lock.engage() {
            effects.push(Effect::Host(HostEffect::LockScroll));
        }
        effects.push(Effect::Host(HostEffect::ScrollIntoView));
        effects.push(Effect::Track(ConversionEvent::WidgetRevealed));
        self.schedule(TimerKind::Calculating, effects);
    }

    pub(super) fn on_calculating_elapsed(&mut self, effects: &mut Vec<Effect>) {
        if self.reveal != RevealPhase::Calculating {
            return;
        }
        self.reveal = RevealPhase::RevealingBadges;
        effects.push(Effect::Host(self.badge_reveal()));
        self.schedule(TimerKind::TallyReveal, effects);
    }

    pub(super) fn on_tally_reveal_elapsed(&mut self, effects: &mut Vec<Effect>) {
        if self.reveal != RevealPhase::RevealingBadges {
            return;
        }
        self.word_counts_active = true;
        self.refresh_tally();
        self.tally.just_updated = true;
        self.schedule(TimerKind::TallyFlash, effects);

        // The initial letter batch is owed even if no milestone was reached yet.
        let milestone = self.engagement.click_count.min(TERMINAL_MILESTONE);
        self.alphabet.reveal_through(milestone, &mut self.rng);

        self.reveal = RevealPhase::Complete;
        self.release_scroll_lock(effects);
        info!(
            total = self.tally.total,
            letters = self.alphabet.len(),
            "Initial word-count reveal complete"
        );
    }

    /// Drop an unfinished reveal back to waiting for visibility and unlock scrolling.
    pub(super) fn abort_reveal(&mut self, effects: &mut Vec<Effect>) {
        if self.reveal.is_in_flight() {
            debug!(phase = ?self.reveal, "Aborting in-flight reveal");
            self.reveal = RevealPhase::AwaitingVisibility;
        }
        self.release_scroll_lock(effects);
    }

    pub(super) fn release_scroll_lock(&mut self, effects: &mut Vec<Effect>) {
        if self.scroll_lock.release() {
            debug!("Released scroll lock");
            effects.push(Effect::Host(HostEffect::ReleaseScroll));
        }
    }
}
