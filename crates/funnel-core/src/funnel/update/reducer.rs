use super::super::messages::Message;
use super::super::state::{Funnel, SequencerState};
use super::Effect;
use crate::timers::{TimerKind, TimerToken};
use tracing::{debug, info};

impl Funnel {
    /// Apply one message; the returned effects must be executed by the host runtime.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        if !self.liveness.is_alive() {
            debug!(?message, "Dropping message for disposed funnel");
            return effects;
        }

        match message {
            Message::VisibilitySampled { ratio } => self.handle_visibility_sample(ratio, &mut effects),
            Message::ScrollSettled => self.handle_scroll_settled(&mut effects),
            Message::NextClicked => self.handle_next_clicked(&mut effects),
            Message::PreviousClicked => self.handle_previous_clicked(&mut effects),
            Message::PageInputChanged(text) => self.cursor.set_text(text),
            Message::PageInputSubmitted => self.handle_page_input_submitted(&mut effects),
            Message::LanguageMenuToggled => self.handle_language_menu_toggled(),
            Message::LevelMenuOpened => self.handle_level_menu_opened(),
            Message::LanguageChosen(code) => self.handle_language_chosen(&code),
            Message::LevelChosen(level) => self.handle_level_chosen(level, &mut effects),
            Message::PickerDismissed => self.handle_picker_dismissed(),
            Message::StartLearningClicked => self.handle_start_learning(&mut effects),
            Message::GateContinue => self.handle_gate_continue(),
            Message::GateEditTarget => self.handle_gate_edit_target(),
            Message::EmailSubmitted(email) => self.handle_email_submitted(email, &mut effects),
            Message::OAuthRequested(provider) => self.handle_oauth_requested(provider, &mut effects),
            Message::SignupFinished(result) => self.handle_signup_finished(result, &mut effects),
            Message::OAuthResolved(result) => self.handle_oauth_resolved(result, &mut effects),
            Message::SignupErrorDismissed => self.handle_signup_error_dismissed(),
            Message::GateClosed => self.handle_gate_closed(&mut effects),
            Message::VisitorContextChanged(context) => {
                self.handle_visitor_context_changed(context, &mut effects);
            }
            Message::TimerFired(token) => self.handle_timer_fired(token, &mut effects),
            Message::Unmounted => self.handle_unmounted(&mut effects),
        }

        effects
    }

    fn handle_timer_fired(&mut self, token: TimerToken, effects: &mut Vec<Effect>) {
        if !self.timers.fire(token) {
            debug!(kind = ?token.kind, generation = token.generation, "Ignoring stale timer");
            return;
        }
        match token.kind {
            TimerKind::VisibilityDwell => self.on_visibility_dwell_elapsed(effects),
            TimerKind::Calculating => self.on_calculating_elapsed(effects),
            TimerKind::TallyReveal => self.on_tally_reveal_elapsed(effects),
            TimerKind::TallyFlash => self.tally.just_updated = false,
            TimerKind::InterstitialDwell => self.on_interstitial_dwell_elapsed(effects),
            TimerKind::InterstitialHide => self.on_interstitial_hidden(effects),
            TimerKind::GateShow => self.on_gate_show_elapsed(effects),
        }
    }

    fn handle_unmounted(&mut self, effects: &mut Vec<Effect>) {
        self.cancel_all_timers(effects);
        self.engagement.sequencer = SequencerState::Idle;
        self.tally.just_updated = false;
        self.abort_reveal(effects);
        self.liveness.dispose();
        info!(effects = effects.len(), "Reader funnel unmounted");
    }
}
