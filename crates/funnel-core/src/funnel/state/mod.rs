mod alphabet;
mod cursor;
mod engagement;
mod gate;
mod picker;
mod reveal;

use super::tally::{self, WordTally};
use super::update::Effect;
use crate::config::FunnelConfig;
use crate::content::{ContentProvider, ContentTier};
use crate::language::{LanguageSelection, find_language};
use crate::liveness::LivenessToken;
use crate::timers::{TimerKind, Timers};
use crate::translation::Translator;
use crate::visitor::VisitorContext;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

pub use alphabet::{ALPHABET, AlphabetProgress, BATCH_SIZES};
pub use cursor::{Direction, PageCursor, ReadingPosition, SubmitOutcome};
pub use engagement::{EngagementState, InterstitialStage, SequencerState, TERMINAL_MILESTONE};
pub use gate::{GateStep, SignupGate, Submission};
pub use picker::{PickerMenu, PickerState};
pub use reveal::{RevealPhase, ScrollLock};

/// Reader-demo funnel composed of its sub-machines.
pub struct Funnel {
    pub(super) config: FunnelConfig,
    pub(super) content: Box<dyn ContentProvider>,
    pub(super) translator: Box<dyn Translator>,
    pub(super) rng: StdRng,
    pub(super) liveness: LivenessToken,
    pub(super) timers: Timers,
    pub(super) cursor: PageCursor,
    pub(super) engagement: EngagementState,
    pub(super) tally: WordTally,
    pub(super) alphabet: AlphabetProgress,
    pub(super) selection: LanguageSelection,
    pub(super) native_language: String,
    pub(super) picker: PickerState,
    pub(super) gate: SignupGate,
    pub(super) reveal: RevealPhase,
    /// Word counts have been shown at least once in this instance.
    pub(super) word_counts_active: bool,
    pub(super) scroll_lock: ScrollLock,
}

impl Funnel {
    pub fn new(
        config: FunnelConfig,
        visitor: &VisitorContext,
        content: Box<dyn ContentProvider>,
        translator: Box<dyn Translator>,
    ) -> Self {
        let config = config.sanitized();
        let rng = match config.alphabet_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let selection = selection_from_context(visitor, &config.fallback_language);
        debug!(
            language = %selection.language.code,
            level = ?selection.level,
            start_page = config.start_page,
            "Mounted reader funnel"
        );
        Self {
            cursor: PageCursor::new(config.start_page, config.total_pages),
            native_language: visitor.native_language.clone(),
            content,
            translator,
            rng,
            liveness: LivenessToken::new(),
            timers: Timers::default(),
            engagement: EngagementState::default(),
            tally: WordTally::default(),
            alphabet: AlphabetProgress::default(),
            selection,
            picker: PickerState::Closed,
            gate: SignupGate::default(),
            reveal: RevealPhase::AwaitingVisibility,
            word_counts_active: false,
            scroll_lock: ScrollLock::default(),
            config,
        }
    }

    /// Share a host-owned liveness token (e.g. one flipped by a signal handler).
    pub fn with_liveness(mut self, liveness: LivenessToken) -> Self {
        self.liveness = liveness;
        self
    }

    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    pub fn liveness(&self) -> &LivenessToken {
        &self.liveness
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn engagement(&self) -> &EngagementState {
        &self.engagement
    }

    pub fn tally(&self) -> WordTally {
        self.tally
    }

    pub fn alphabet(&self) -> &AlphabetProgress {
        &self.alphabet
    }

    pub fn selection(&self) -> &LanguageSelection {
        &self.selection
    }

    pub fn native_language(&self) -> &str {
        &self.native_language
    }

    pub fn picker(&self) -> &PickerState {
        &self.picker
    }

    pub fn gate(&self) -> &SignupGate {
        &self.gate
    }

    pub fn reveal_phase(&self) -> RevealPhase {
        self.reveal
    }

    pub fn word_counts_active(&self) -> bool {
        self.word_counts_active
    }

    pub fn scroll_lock(&self) -> ScrollLock {
        self.scroll_lock
    }

    pub fn content_tier(&self) -> ContentTier {
        self.selection.tier()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    pub fn is_timer_pending(&self, kind: TimerKind) -> bool {
        self.timers.is_pending(kind)
    }

    /// Pure recompute against the current selection.
    pub fn words_read_through(&self, page: u32) -> usize {
        tally::recompute(
            self.content.as_ref(),
            self.content_tier(),
            self.translator.as_ref(),
            &self.selection.language.code,
            page,
        )
    }

    pub(super) fn visitor_context(&self) -> VisitorContext {
        VisitorContext {
            native_language: self.native_language.clone(),
            target_language: Some(self.selection.language.code.clone()),
            level: self.selection.level,
            has_chosen_language: self.selection.has_user_chosen_language,
            has_chosen_level: self.selection.has_user_chosen_level,
        }
    }

    pub(super) fn schedule(&mut self, kind: TimerKind, effects: &mut Vec<Effect>) {
        let after = match kind {
            TimerKind::VisibilityDwell => self.config.visibility_dwell(),
            TimerKind::Calculating => self.config.calculating(),
            TimerKind::TallyReveal => self.config.tally_reveal_delay(),
            TimerKind::TallyFlash => self.config.tally_flash(),
            TimerKind::InterstitialDwell => self.config.interstitial_dwell(),
            TimerKind::InterstitialHide => self.config.interstitial_hide(),
            TimerKind::GateShow => self.config.gate_show_delay(),
        };
        effects.extend(
            self.timers
                .schedule(kind, after)
                .into_iter()
                .map(Effect::Timer),
        );
    }

    pub(super) fn cancel(&mut self, kind: TimerKind, effects: &mut Vec<Effect>) {
        if let Some(command) = self.timers.cancel(kind) {
            effects.push(Effect::Timer(command));
        }
    }

    pub(super) fn cancel_all_timers(&mut self, effects: &mut Vec<Effect>) {
        effects.extend(self.timers.cancel_all().into_iter().map(Effect::Timer));
    }
}

/// Local mirror of the store's selection; unknown or unset languages fall back.
pub(super) fn selection_from_context(
    context: &VisitorContext,
    fallback_language: &str,
) -> LanguageSelection {
    let chosen = context
        .target_language
        .as_deref()
        .filter(|_| context.has_chosen_language)
        .and_then(find_language);
    match chosen {
        Some(language) => {
            let level = context.level.filter(|_| context.has_chosen_level);
            LanguageSelection {
                language,
                level,
                has_user_chosen_language: true,
                has_user_chosen_level: level.is_some(),
            }
        }
        None => LanguageSelection::fallback(fallback_language),
    }
}
