//! The reader demo funnel: state, messages, the reducer and its effects.

mod messages;
mod snapshot;
mod state;
mod tally;
mod update;

#[cfg(test)]
mod tests;

pub use messages::Message;
pub use snapshot::{FunnelSnapshot, GateView};
pub use state::{
    ALPHABET, AlphabetProgress, BATCH_SIZES, Direction, EngagementState, Funnel, GateStep,
    InterstitialStage, PageCursor, PickerMenu, PickerState, ReadingPosition, RevealPhase,
    ScrollLock, SequencerState, SignupGate, Submission, SubmitOutcome, TERMINAL_MILESTONE,
};
pub use tally::{WordTally, recompute};
pub use update::{Effect, HostEffect};
