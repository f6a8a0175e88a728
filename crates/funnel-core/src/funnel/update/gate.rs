use super::super::state::{Funnel, GateStep, PickerState, SequencerState, Submission};
use super::{Effect, HostEffect};
use crate::auth::{OAuthRequest, RegistrationError, SignupOutcome, SignupRequest};
use crate::language::Level;
use crate::timers::TimerKind;
use crate::tracking::ConversionEvent;
use tracing::{debug, info, warn};

const SELECTION_REQUIRED: &str = "Choose your language and level before signing up.";

impl Funnel {
    pub(super) fn on_gate_show_elapsed(&mut self, effects: &mut Vec<Effect>) {
        if self.gate.show() {
            info!("Signup gate shown");
            effects.push(Effect::Track(ConversionEvent::SignupStarted { manual: false }));
        }
    }

    /// "Start Learning" short-circuits the automatic path.
    pub(super) fn handle_start_learning(&mut self, effects: &mut Vec<Effect>) {
        if self.gate.is_visible() {
            return;
        }
        self.cancel(TimerKind::GateShow, effects);
        self.cancel(TimerKind::InterstitialDwell, effects);
        self.cancel(TimerKind::InterstitialHide, effects);
        self.engagement.sequencer = SequencerState::Idle;
        self.gate.show();
        info!(clicks = self.engagement.click_count, "Signup gate opened manually");
        effects.push(Effect::Track(ConversionEvent::SignupStarted { manual: true }));
    }

    pub(super) fn handle_gate_continue(&mut self) {
        if !self.gate.is_visible() {
            return;
        }
        match self.gate.step {
            GateStep::NativeLanguage => self.gate.step = GateStep::TargetConfirmation,
            GateStep::TargetConfirmation if self.selection.is_complete() => {
                self.gate.step = GateStep::Registration;
            }
            GateStep::TargetConfirmation => {
                debug!("Selection incomplete; reopening picker from gate");
                self.handle_level_menu_opened();
            }
            GateStep::Registration | GateStep::Registered => {}
        }
    }

    pub(super) fn handle_gate_edit_target(&mut self) {
        if self.gate.is_visible()
            && matches!(
                self.gate.step,
                GateStep::TargetConfirmation | GateStep::Registration
            )
        {
            self.picker = PickerState::LanguageOpen;
        }
    }

    pub(super) fn handle_email_submitted(&mut self, email: String, effects: &mut Vec<Effect>) {
        let Some((target_language, level)) = self.registration_context() else {
            return;
        };
        self.gate.submission = Submission::Submitting;
        debug!(target = %target_language, %level, "Submitting email registration");
        effects.push(Effect::SubmitSignup(SignupRequest {
            email: email.trim().to_string(),
            native_language: self.native_language.clone(),
            target_language,
            level,
        }));
    }

    pub(super) fn handle_oauth_requested(&mut self, provider: String, effects: &mut Vec<Effect>) {
        let Some((target_language, level)) = self.registration_context() else {
            return;
        };
        self.gate.submission = Submission::Submitting;
        effects.push(Effect::Track(ConversionEvent::OAuthStarted {
            provider: provider.clone(),
        }));
        effects.push(Effect::ResolveOAuth(OAuthRequest {
            provider,
            native_language: self.native_language.clone(),
            target_language,
            level,
        }));
    }

    /// Gatekeeper for both registration paths.
    fn registration_context(&mut self) -> Option<(String, Level)> {
        if !self.gate.is_visible() || self.gate.step != GateStep::Registration {
            debug!(step = ?self.gate.step, "Registration not available at this step");
            return None;
        }
        if self.gate.submission == Submission::Submitting {
            debug!("Registration already in flight");
            return None;
        }
        match self.selection.level {
            Some(level) if self.selection.is_complete() => {
                Some((self.selection.language.code.clone(), level))
            }
            _ => {
                self.gate.submission = Submission::Failed(SELECTION_REQUIRED.to_string());
                None
            }
        }
    }

    pub(super) fn handle_signup_finished(
        &mut self,
        result: Result<SignupOutcome, RegistrationError>,
        effects: &mut Vec<Effect>,
    ) {
        if self.gate.submission != Submission::Submitting {
            debug!("Ignoring registration result with nothing in flight");
            return;
        }
        match result {
            Ok(outcome) => {
                info!("Registration completed");
                self.gate.submission = Submission::Idle;
                self.gate.step = GateStep::Registered;
                effects.push(Effect::Track(ConversionEvent::SignupCompleted));
                effects.push(Effect::Host(HostEffect::RegistrationSucceeded {
                    token: outcome.token,
                }));
            }
            Err(err) => self.fail_submission(err, effects),
        }
    }

    pub(super) fn handle_oauth_resolved(
        &mut self,
        result: Result<String, RegistrationError>,
        effects: &mut Vec<Effect>,
    ) {
        if self.gate.submission != Submission::Submitting {
            return;
        }
        match result {
            Ok(url) => {
                self.gate.submission = Submission::Idle;
                effects.push(Effect::Host(HostEffect::RedirectTo { url }));
            }
            Err(err) => self.fail_submission(err, effects),
        }
    }

    /// Inline, dismissable; the language selection is left untouched.
    fn fail_submission(&mut self, err: RegistrationError, effects: &mut Vec<Effect>) {
        warn!("Registration failed: {err}");
        let reason = err.to_string();
        self.gate.submission = Submission::Failed(reason.clone());
        effects.push(Effect::Track(ConversionEvent::SignupFailed { reason }));
    }

    pub(super) fn handle_signup_error_dismissed(&mut self) {
        if matches!(self.gate.submission, Submission::Failed(_)) {
            self.gate.submission = Submission::Idle;
        }
    }

    /// The only way out of a shown gate; resets the funnel for reuse.
    pub(super) fn handle_gate_closed(&mut self, effects: &mut Vec<Effect>) {
        if !self.gate.blocks_funnel() {
            return;
        }
        self.cancel_all_timers(effects);
        self.gate.close();
        self.engagement.reset();
        self.alphabet.reset();
        self.tally.reset();
        self.abort_reveal(effects);
        self.picker = PickerState::Closed;
        info!("Signup gate closed; funnel reset");
        effects.push(Effect::Track(ConversionEvent::GateClosed));
    }
}
