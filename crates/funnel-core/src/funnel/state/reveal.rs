use serde::Serialize;
use ts_rs::TS;

/// Initial word-count reveal protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RevealPhase {
    #[default]
    AwaitingVisibility,
    /// Widget is at least half visible; waiting out the continuous dwell.
    Dwelling,
    Calculating,
    RevealingBadges,
    Complete,
}

impl RevealPhase {
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            Self::Dwelling | Self::Calculating | Self::RevealingBadges
        )
    }
}

/// Scroll lock whose release is idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollLock {
    engaged: bool,
}

impl ScrollLock {
    pub fn is_engaged(self) -> bool {
        self.engaged
    }

    pub fn engage(&mut self) -> bool {
        let newly = !self.engaged;
        self.engaged = true;
        newly
    }

    /// `true` only for the call that actually released it.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.engaged, false)
    }
}
