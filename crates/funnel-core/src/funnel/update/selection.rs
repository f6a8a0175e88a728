use super::super::state::{Funnel, PickerState, selection_from_context};
use super::Effect;
use crate::language::{Language, LanguageSelection, Level, find_language};
use crate::tracking::ConversionEvent;
use crate::visitor::VisitorContext;
use tracing::{debug, info, warn};

impl Funnel {
    pub(super) fn handle_language_menu_toggled(&mut self) {
        self.picker = match self.picker {
            PickerState::Closed => PickerState::LanguageOpen,
            _ => PickerState::Closed,
        };
    }

    /// Opens level selection directly once a language was explicitly picked.
    pub(super) fn handle_level_menu_opened(&mut self) {
        self.picker = if self.selection.has_user_chosen_language {
            PickerState::LevelOpen {
                language: self.selection.language.clone(),
            }
        } else {
            PickerState::LanguageOpen
        };
    }

    pub(super) fn handle_language_chosen(&mut self, code: &str) {
        if self.picker != PickerState::LanguageOpen {
            debug!(code, "Language choice ignored; language menu not open");
            return;
        }
        match find_language(code) {
            Some(language) => {
                debug!(code = %language.code, "Language chosen; awaiting level");
                self.picker = PickerState::LevelOpen { language };
            }
            None => warn!(code, "Unknown language choice"),
        }
    }

    pub(super) fn handle_level_chosen(&mut self, level: Level, effects: &mut Vec<Effect>) {
        let PickerState::LevelOpen { language } = &self.picker else {
            debug!(%level, "Level choice ignored; level menu not open");
            return;
        };
        let language = language.clone();
        self.picker = PickerState::Closed;
        self.commit_selection(language, level, effects);
    }

    /// Click outside aborts; nothing is committed.
    pub(super) fn handle_picker_dismissed(&mut self) {
        if self.picker.is_open() {
            debug!("Picker dismissed without commit");
        }
        self.picker = PickerState::Closed;
    }

    fn commit_selection(&mut self, language: Language, level: Level, effects: &mut Vec<Effect>) {
        info!(language = %language.code, %level, "Committed language selection");
        self.selection = LanguageSelection {
            language,
            level: Some(level),
            has_user_chosen_language: true,
            has_user_chosen_level: true,
        };
        self.reset_progress(effects);
        effects.push(Effect::PersistVisitor(self.visitor_context()));
        effects.push(Effect::Track(ConversionEvent::LanguageSelected {
            language: self.selection.language.code.clone(),
            level,
        }));
    }

    /// Store notifications; our own writes echo back and are no-ops.
    pub(super) fn handle_visitor_context_changed(
        &mut self,
        context: VisitorContext,
        effects: &mut Vec<Effect>,
    ) {
        self.native_language = context.native_language.clone();
        let incoming = selection_from_context(&context, &self.config.fallback_language);
        if incoming == self.selection {
            return;
        }
        let identity_changed = incoming.language.code != self.selection.language.code
            || incoming.level != self.selection.level;
        info!(
            language = %incoming.language.code,
            level = ?incoming.level,
            identity_changed,
            "Synced selection from visitor store"
        );
        self.selection = incoming;
        if identity_changed {
            self.reset_progress(effects);
        }
    }

    /// Hard reset boundary for a selection change.
    pub(super) fn reset_progress(&mut self, effects: &mut Vec<Effect>) {
        self.cancel_all_timers(effects);
        self.gate.disarm_if_hidden();
        self.engagement.reset();
        self.alphabet.reset();
        self.tally.reset();
        self.abort_reveal(effects);
        debug!(tier = ?self.content_tier(), "Reset funnel progress");
    }
}
