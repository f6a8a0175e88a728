use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GateStep {
    /// Read-only, auto-detected native language.
    #[default]
    NativeLanguage,
    /// Target language and level; editing re-enters the picker.
    TargetConfirmation,
    Registration,
    Registered,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    Failed(String),
}

/// Terminal registration overlay.
#[derive(Debug, Clone, Default)]
pub struct SignupGate {
    armed: bool,
    visible: bool,
    pub(crate) step: GateStep,
    pub(crate) submission: Submission,
}

impl SignupGate {
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn step(&self) -> GateStep {
        self.step
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    /// Armed or shown gates stop the reader from advancing.
    pub fn blocks_funnel(&self) -> bool {
        self.armed || self.visible
    }

    /// Returns `true` only on the first call.
    pub fn arm(&mut self) -> bool {
        let newly = !self.armed;
        self.armed = true;
        newly
    }

    /// Arms as well; returns `true` only when it was not yet visible.
    pub fn show(&mut self) -> bool {
        self.armed = true;
        if self.visible {
            return false;
        }
        self.visible = true;
        self.step = GateStep::NativeLanguage;
        self.submission = Submission::Idle;
        true
    }

    /// Drop a pending arm that never became visible.
    pub(crate) fn disarm_if_hidden(&mut self) {
        if !self.visible {
            self.armed = false;
        }
    }

    pub(crate) fn close(&mut self) {
        *self = Self::default();
    }
}
