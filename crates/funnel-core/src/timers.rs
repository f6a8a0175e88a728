//! Generation-tagged timer registry.
//!
//! At most one timer per kind is pending. Scheduling a kind supersedes the
//! previous one, and a fired token only counts if it is still the pending one;
//! anything else is a stale callback and gets dropped.

use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    VisibilityDwell,
    Calculating,
    TallyReveal,
    TallyFlash,
    InterstitialDwell,
    InterstitialHide,
    GateShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Schedule { token: TimerToken, after: Duration },
    Cancel(TimerToken),
}

#[derive(Debug, Default)]
pub struct Timers {
    next_generation: u64,
    pending: HashMap<TimerKind, u64>,
}

impl Timers {
    /// Returns the commands to run: a cancel for any superseded timer, then the schedule.
    pub fn schedule(&mut self, kind: TimerKind, after: Duration) -> Vec<TimerCommand> {
        let mut commands = Vec::with_capacity(2);
        commands.extend(self.cancel(kind));
        self.next_generation = self.next_generation.wrapping_add(1);
        let token = TimerToken {
            kind,
            generation: self.next_generation,
        };
        self.pending.insert(kind, token.generation);
        commands.push(TimerCommand::Schedule { token, after });
        commands
    }

    pub fn cancel(&mut self, kind: TimerKind) -> Option<TimerCommand> {
        self.pending
            .remove(&kind)
            .map(|generation| TimerCommand::Cancel(TimerToken { kind, generation }))
    }

    pub fn cancel_all(&mut self) -> Vec<TimerCommand> {
        let mut kinds: Vec<TimerKind> = self.pending.keys().copied().collect();
        kinds.sort();
        kinds
            .into_iter()
            .filter_map(|kind| self.cancel(kind))
            .collect()
    }

    /// Consume a fired token; `false` means it was cancelled or superseded.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        match self.pending.get(&token.kind) {
            Some(generation) if *generation == token.generation => {
                self.pending.remove(&token.kind);
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.contains_key(&kind)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled_token(commands: &[TimerCommand]) -> TimerToken {
        match commands.last() {
            Some(TimerCommand::Schedule { token, .. }) => *token,
            other => panic!("expected schedule, got {other:?}"),
        }
    }

    #[test]
    fn rescheduling_supersedes_previous_timer() {
        let mut timers = Timers::default();
        let first = scheduled_token(&timers.schedule(TimerKind::TallyFlash, Duration::from_secs(1)));
        let commands = timers.schedule(TimerKind::TallyFlash, Duration::from_secs(1));
        assert_eq!(commands[0], TimerCommand::Cancel(first));
        let second = scheduled_token(&commands);

        assert!(!timers.fire(first), "superseded timer must be ignored");
        assert!(timers.fire(second));
        assert!(!timers.fire(second), "a token fires at most once");
    }

    #[test]
    fn cancelled_timers_do_not_fire() {
        let mut timers = Timers::default();
        let token = scheduled_token(&timers.schedule(TimerKind::GateShow, Duration::ZERO));
        assert_eq!(timers.cancel(TimerKind::GateShow), Some(TimerCommand::Cancel(token)));
        assert!(!timers.fire(token));
        assert!(timers.cancel(TimerKind::GateShow).is_none());
    }

    #[test]
    fn cancel_all_clears_every_kind() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::InterstitialDwell, Duration::ZERO);
        timers.schedule(TimerKind::Calculating, Duration::ZERO);
        let commands = timers.cancel_all();
        assert_eq!(commands.len(), 2);
        assert_eq!(timers.pending_count(), 0);
    }
}
